//! Text ingestion: cleanup and chapter detection.

pub mod chapters;
mod cleaner;

pub use chapters::split_chapters;
