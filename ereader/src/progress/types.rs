//! Reading progress record.

use chrono::{DateTime, Utc};
use reflow::{LayoutParams, ReadingPosition, WidthClass};
use serde::{Deserialize, Serialize};

/// Where a reader left off in a book, and the layout that position belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Content hash of the book file
    pub book_id: String,
    pub chapter_idx: usize,
    pub page_idx: usize,
    pub font_size_px: f32,
    pub width: WidthClass,
    #[serde(default)]
    pub font_family: Option<String>,
    /// Zero in records written before the column width was saved
    #[serde(default)]
    pub container_width_px: u32,
    /// When the record was last written
    pub updated_at: DateTime<Utc>,
}

impl Progress {
    pub fn new(book_id: String, position: ReadingPosition, params: &LayoutParams) -> Self {
        Self {
            book_id,
            chapter_idx: position.chapter_idx,
            page_idx: position.page_idx,
            font_size_px: params.font_size_px,
            width: params.width_class,
            font_family: params.font_family.clone(),
            container_width_px: params.container_width_px,
            updated_at: Utc::now(),
        }
    }

    pub fn position(&self) -> ReadingPosition {
        ReadingPosition::new(self.chapter_idx, self.page_idx)
    }

    /// The layout the saved position was paginated under.
    ///
    /// Records without a column width borrow it from `current`.
    pub fn layout_params(&self, current: &LayoutParams) -> LayoutParams {
        let container_width_px = match self.container_width_px {
            0 => current.container_width_px,
            px => px,
        };
        let mut params = LayoutParams::new(self.font_size_px, self.width, container_width_px);
        params.font_family = self.font_family.clone();
        params
    }

    /// Whether `params` paginate the same way the saved position was computed.
    pub fn matches_layout(&self, params: &LayoutParams) -> bool {
        self.layout_params(params) == *params
    }
}
