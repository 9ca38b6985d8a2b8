//! Font-metrics estimate: fixed advance per terminal column.
//!
//! Good enough for hosts without a real layout engine. Wide (CJK) characters
//! count as two columns via `unicode-width`.

use unicode_width::UnicodeWidthChar;

use super::LineFiller;
use crate::error::Result;
use crate::layout::{LineHeight, TextStyle};
use crate::metrics::{ScratchSurface, TextMetrics};

/// Default advance per column, as a fraction of the font size.
pub const DEFAULT_ADVANCE_FACTOR: f32 = 0.6;

#[derive(Debug, Clone)]
pub struct EstimatedMetrics {
    line_height: LineHeight,
    advance_factor: f32,
    paragraph_gap_lines: u32,
}

impl EstimatedMetrics {
    pub fn new() -> Self {
        Self {
            line_height: LineHeight::Multiplier(1.5),
            advance_factor: DEFAULT_ADVANCE_FACTOR,
            paragraph_gap_lines: 0,
        }
    }

    pub fn with_line_height(mut self, line_height: LineHeight) -> Self {
        self.line_height = line_height;
        self
    }

    /// Non-positive or non-finite factors fall back to the default.
    pub fn with_advance_factor(mut self, factor: f32) -> Self {
        self.advance_factor = if factor.is_finite() && factor > 0.0 {
            factor
        } else {
            DEFAULT_ADVANCE_FACTOR
        };
        self
    }

    /// Blank lines rendered between consecutive paragraphs.
    pub fn with_paragraph_gap(mut self, lines: u32) -> Self {
        self.paragraph_gap_lines = lines;
        self
    }
}

impl Default for EstimatedMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMetrics for EstimatedMetrics {
    fn open_surface(&self, style: &TextStyle) -> Result<Box<dyn ScratchSurface + '_>> {
        let advance_px = style.font_size_px * self.advance_factor;
        Ok(Box::new(EstimatedSurface {
            line_width_px: style.container_width_px as f32,
            advance_px,
            line_height: self.line_height,
            line_height_px: self.line_height.resolve_px(style.font_size_px),
            paragraph_gap_lines: self.paragraph_gap_lines,
        }))
    }

    fn name(&self) -> &'static str {
        "estimated"
    }
}

struct EstimatedSurface {
    line_width_px: f32,
    advance_px: f32,
    line_height: LineHeight,
    line_height_px: f32,
    paragraph_gap_lines: u32,
}

impl EstimatedSurface {
    fn word_width(&self, word: &str) -> f32 {
        let columns: usize = word.chars().map(|c| c.width().unwrap_or(0)).sum();
        columns as f32 * self.advance_px
    }

    fn paragraph_lines(&self, paragraph: &str) -> u32 {
        let mut filler = LineFiller::new(self.line_width_px, self.advance_px);
        for word in paragraph.split_whitespace() {
            filler.push_word(self.word_width(word));
        }
        filler.lines()
    }
}

impl ScratchSurface for EstimatedSurface {
    fn rendered_height(&mut self, paragraphs: &[&str]) -> f32 {
        let mut lines = 0u32;
        let mut rendered = 0u32;
        for paragraph in paragraphs {
            let n = self.paragraph_lines(paragraph);
            if n == 0 {
                continue;
            }
            if rendered > 0 {
                lines += self.paragraph_gap_lines;
            }
            lines += n;
            rendered += 1;
        }
        lines as f32 * self.line_height_px
    }

    fn line_height(&self) -> LineHeight {
        self.line_height
    }
}
