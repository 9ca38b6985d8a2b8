//! Saved reading progress, one record per book.

mod persistence;
mod types;

pub use persistence::{compute_book_id, load_progress, save_progress};
pub use types::Progress;
