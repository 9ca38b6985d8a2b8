use serde::{Deserialize, Serialize};

/// A chapter as produced by ingestion. Paragraphs in `content` are separated by blank lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Chapter {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            summary: None,
        }
    }

    /// Approximate word count of the chapter body
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}
