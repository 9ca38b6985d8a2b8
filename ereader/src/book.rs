// Plain-text book loading

use anyhow::{Context, Result, bail};
use reflow::Chapter;
use std::fs;
use std::path::Path;

use crate::progress::compute_book_id;
use crate::text::split_chapters;

/// A text book split into chapters
#[derive(Debug)]
pub struct Book {
    /// Title derived from the file name
    pub title: String,
    /// Stable id used to key saved progress
    pub book_id: String,
    /// Chapters in reading order
    pub chapters: Vec<Chapter>,
}

impl Book {
    /// Total word count across all chapters
    pub fn total_words(&self) -> usize {
        self.chapters.iter().map(Chapter::word_count).sum()
    }
}

/// Read a text file and split it into chapters
pub fn load_book(path: &Path) -> Result<Book> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let raw = String::from_utf8_lossy(&bytes);

    let chapters = split_chapters(&raw);
    if chapters.is_empty() {
        bail!("{} contains no readable text", path.display());
    }

    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy().replace(['_', '-'], " "))
        .unwrap_or_else(|| "Unknown".to_string());

    Ok(Book {
        title,
        book_id: compute_book_id(path)?,
        chapters,
    })
}
