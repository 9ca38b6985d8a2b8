//! Mock metrics provider for testing
//!
//! Lays text out on a fixed character grid and records how it was used, so
//! tests can check surface cleanup and simulate an unavailable or broken
//! measurement environment.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::LineFiller;
use crate::error::{LayoutError, Result};
use crate::layout::{LineHeight, TextStyle};
use crate::metrics::{ScratchSurface, TextMetrics};

/// Pixel height of one mock line.
pub const MOCK_LINE_HEIGHT_PX: f32 = 20.0;

#[derive(Debug, Default)]
struct Counters {
    opened: AtomicUsize,
    closed: AtomicUsize,
    measurements: AtomicUsize,
}

/// A provider with a fixed number of characters per line
pub struct MockMetrics {
    chars_per_line: usize,
    available: AtomicBool,
    collapsed: bool,
    counters: Counters,
}

impl MockMetrics {
    /// Every line holds `chars_per_line` characters, spaces included.
    pub fn new(chars_per_line: usize) -> Self {
        Self {
            chars_per_line: chars_per_line.max(1),
            available: AtomicBool::new(true),
            collapsed: false,
            counters: Counters::default(),
        }
    }

    /// A surface that reports zero height for everything, like a hidden element.
    pub fn collapsed() -> Self {
        Self {
            collapsed: true,
            ..Self::new(1)
        }
    }

    /// Toggle whether `open_surface` succeeds
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn surfaces_opened(&self) -> usize {
        self.counters.opened.load(Ordering::SeqCst)
    }

    pub fn surfaces_closed(&self) -> usize {
        self.counters.closed.load(Ordering::SeqCst)
    }

    /// Number of `rendered_height` calls across all surfaces
    pub fn measurements(&self) -> usize {
        self.counters.measurements.load(Ordering::SeqCst)
    }

    /// Lines `paragraphs` occupy on this grid; lets tests compute expectations by hand.
    pub fn count_lines(&self, paragraphs: &[&str]) -> u32 {
        paragraphs
            .iter()
            .map(|p| {
                let mut filler = LineFiller::new(self.chars_per_line as f32, 1.0);
                for word in p.split_whitespace() {
                    filler.push_word(word.chars().count() as f32);
                }
                filler.lines()
            })
            .sum()
    }
}

impl TextMetrics for MockMetrics {
    fn open_surface(&self, _style: &TextStyle) -> Result<Box<dyn ScratchSurface + '_>> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(LayoutError::MeasurementUnavailable(
                "mock surface disabled".to_string(),
            ));
        }
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockSurface { metrics: self }))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

struct MockSurface<'a> {
    metrics: &'a MockMetrics,
}

impl ScratchSurface for MockSurface<'_> {
    fn rendered_height(&mut self, paragraphs: &[&str]) -> f32 {
        self.metrics.counters.measurements.fetch_add(1, Ordering::SeqCst);
        if self.metrics.collapsed {
            return 0.0;
        }
        self.metrics.count_lines(paragraphs) as f32 * MOCK_LINE_HEIGHT_PX
    }

    fn line_height(&self) -> LineHeight {
        LineHeight::Px(MOCK_LINE_HEIGHT_PX)
    }
}

impl Drop for MockSurface<'_> {
    fn drop(&mut self) {
        self.metrics.counters.closed.fetch_add(1, Ordering::SeqCst);
    }
}
