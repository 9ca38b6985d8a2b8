//! Page-by-page navigation over a paginated book.

use serde::{Deserialize, Serialize};

use crate::chapter::Chapter;
use crate::error::Result;
use crate::layout::LayoutParams;
use crate::metrics::TextMetrics;
use crate::paginator::{Page, Paginator};

/// Where the reader is: chapter index and page index within that chapter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingPosition {
    pub chapter_idx: usize,
    pub page_idx: usize,
}

impl ReadingPosition {
    pub fn new(chapter_idx: usize, page_idx: usize) -> Self {
        Self {
            chapter_idx,
            page_idx,
        }
    }
}

/// A book being read under one layout.
///
/// Only the current chapter is paginated; moving into another chapter
/// paginates that one.
pub struct Reader<M: TextMetrics> {
    chapters: Vec<Chapter>,
    paginator: Paginator<M>,
    params: LayoutParams,
    position: ReadingPosition,
    page_count: usize,
}

impl<M: TextMetrics> Reader<M> {
    /// Open `chapters` at the first page.
    pub fn new(chapters: Vec<Chapter>, metrics: M, params: LayoutParams) -> Result<Self> {
        let mut reader = Self {
            chapters,
            paginator: Paginator::new(metrics),
            params,
            position: ReadingPosition::default(),
            page_count: 0,
        };
        reader.repaginate(None)?;
        Ok(reader)
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn current_chapter(&self) -> Option<&Chapter> {
        self.chapters.get(self.position.chapter_idx)
    }

    pub fn position(&self) -> ReadingPosition {
        self.position
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Pages in the current chapter.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.paginator
            .current()
            .and_then(|result| result.page(self.position.page_idx))
    }

    /// Advance one page, moving into the next chapter at the end of this one.
    ///
    /// Returns false at the end of the book.
    pub fn next_page(&mut self) -> Result<bool> {
        if self.position.page_idx + 1 < self.page_count {
            self.position.page_idx += 1;
            return Ok(true);
        }
        if self.position.chapter_idx + 1 >= self.chapters.len() {
            return Ok(false);
        }
        self.position = ReadingPosition::new(self.position.chapter_idx + 1, 0);
        self.repaginate(None)?;
        Ok(true)
    }

    /// Go back one page, landing on the last page of the previous chapter when needed.
    ///
    /// Returns false at the start of the book.
    pub fn prev_page(&mut self) -> Result<bool> {
        if self.position.page_idx > 0 {
            self.position.page_idx -= 1;
            return Ok(true);
        }
        if self.position.chapter_idx == 0 {
            return Ok(false);
        }
        self.position = ReadingPosition::new(self.position.chapter_idx - 1, usize::MAX);
        self.repaginate(None)?;
        Ok(true)
    }

    /// Jump to a position; out-of-range indices are clamped.
    pub fn goto(&mut self, position: ReadingPosition) -> Result<()> {
        let last_chapter = self.chapters.len().saturating_sub(1);
        self.position =
            ReadingPosition::new(position.chapter_idx.min(last_chapter), position.page_idx);
        self.repaginate(None)
    }

    /// Switch layout and re-paginate, staying on the page that holds the
    /// start of the text that was on screen.
    pub fn set_layout(&mut self, params: LayoutParams) -> Result<()> {
        let anchor = self.current_page().map(|page| page.byte_range.start);
        self.params = params;
        self.repaginate(anchor)
    }

    /// Progress through the book by chapter, 0..=100.
    pub fn percent_complete(&self) -> u8 {
        if self.chapters.is_empty() {
            return 0;
        }
        let pct = (self.position.chapter_idx + 1) * 100 / self.chapters.len();
        pct.min(100) as u8
    }

    fn repaginate(&mut self, anchor: Option<usize>) -> Result<()> {
        let Some(chapter) = self.chapters.get(self.position.chapter_idx) else {
            self.page_count = 0;
            self.position = ReadingPosition::default();
            return Ok(());
        };

        let result = self.paginator.paginate(&chapter.content, &self.params)?;
        self.page_count = result.page_count();

        let page_idx = match anchor {
            Some(offset) => result
                .pages
                .iter()
                .rposition(|page| page.byte_range.start <= offset)
                .unwrap_or(0),
            None => self.position.page_idx,
        };
        self.position.page_idx = page_idx.min(self.page_count.saturating_sub(1));
        Ok(())
    }
}
