//! Character-budget chunking used when measured fitting cannot be trusted.

use std::fmt;

use crate::layout::LayoutParams;
use crate::paginator::{PARAGRAPH_SEPARATOR, Page};

/// Assumed average glyph advance, as a fraction of the font size.
const CHAR_WIDTH_FACTOR: f32 = 0.6;
const MIN_CHARS_PER_LINE: usize = 30;
const MIN_CHARS_PER_PAGE: usize = 500;

/// Below this share of the input surviving a pass, the pass is treated as lossy.
const MIN_KEPT_RATIO: f64 = 0.9;
/// A lone measured page longer than this many page budgets is treated as under-split.
const MAX_SINGLE_PAGE_RATIO: f64 = 1.1;

/// Why the measured pages were thrown away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    ContentLoss { kept: usize, total: usize },
    UnderSplit { chars: usize, budget: usize },
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContentLoss { kept, total } => {
                write!(f, "measured pages kept only {kept} of {total} characters")
            }
            Self::UnderSplit { chars, budget } => write!(
                f,
                "measured pass produced one page of {chars} characters (page budget {budget})"
            ),
        }
    }
}

/// Estimated characters per line for the given layout.
pub fn chars_per_line(params: &LayoutParams) -> usize {
    let per_line = params.container_width_px as f32 / (params.font_size_px * CHAR_WIDTH_FACTOR);
    if per_line.is_finite() {
        (per_line.floor() as usize).max(MIN_CHARS_PER_LINE)
    } else {
        MIN_CHARS_PER_LINE
    }
}

/// Estimated characters per page for the given layout.
pub fn chars_per_page(params: &LayoutParams) -> usize {
    (chars_per_line(params) * params.max_lines() as usize).max(MIN_CHARS_PER_PAGE)
}

/// Decide whether measured `pages` of `normalized` must be discarded.
///
/// Pages only drop the whitespace between them, so loss shows up when long
/// whitespace runs fall on page breaks.
pub fn check(normalized: &str, pages: &[Page], budget: usize) -> Option<FallbackReason> {
    let total = normalized.chars().count();
    let kept = reconstructed_len(pages);

    if (kept as f64) < total as f64 * MIN_KEPT_RATIO {
        return Some(FallbackReason::ContentLoss { kept, total });
    }
    if pages.len() == 1 && total as f64 > budget as f64 * MAX_SINGLE_PAGE_RATIO {
        return Some(FallbackReason::UnderSplit {
            chars: total,
            budget,
        });
    }
    None
}

/// Character length of the pages joined back together with the paragraph separator.
fn reconstructed_len(pages: &[Page]) -> usize {
    let separators = pages.len().saturating_sub(1) * PARAGRAPH_SEPARATOR.chars().count();
    pages.iter().map(|p| p.text.chars().count()).sum::<usize>() + separators
}

/// Slice `text` into contiguous pages of at most `budget` characters.
pub fn chunk_by_chars(text: &str, budget: usize) -> Vec<Page> {
    let budget = budget.max(1);
    let mut pages = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in text.char_indices() {
        if count == budget {
            pages.push(Page::from_range(text, start..idx));
            start = idx;
            count = 0;
        }
        count += 1;
    }

    if start < text.len() || pages.is_empty() {
        pages.push(Page::from_range(text, start..text.len()));
    }

    pages
}
