//! Pagination engine for the ereader workspace
//!
//! Splits chapter text into screen-sized pages:
//! - Measured fitting against a pluggable [`TextMetrics`] provider
//! - Binary search over words when a paragraph has to break across pages
//! - Character-chunk fallback when a measured pass looks lossy or under-split
//! - Reading navigation that keeps its place across layout changes

pub mod chapter;
pub mod error;
pub mod fallback;
pub mod layout;
pub mod metrics;
pub mod paginator;
pub mod providers;
pub mod reader;

pub use chapter::Chapter;
pub use error::{LayoutError, Result};
pub use layout::{LayoutParams, LineHeight, TextStyle, WidthClass};
pub use metrics::{ScratchSurface, TextMetrics, escape_markup};
pub use paginator::{
    PARAGRAPH_SEPARATOR, Page, PaginationResult, Paginator, Strategy, normalize, paginate,
};
pub use providers::{EstimatedMetrics, MockMetrics};
pub use reader::{Reader, ReadingPosition};
