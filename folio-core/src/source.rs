//! Capabilities the view controller and the server depend on

use crate::error::Result;
use crate::types::{Book, BookId};
use async_trait::async_trait;

/// Maximum number of characters sent for summarization
pub const SOURCE_TEXT_LIMIT_CHARS: usize = 5000;

/// Returned when the generation backend produces no text
pub const NO_ANALYSIS_PLACEHOLDER: &str = "(No analysis.)";

/// Something that can produce a book for a catalog id
#[async_trait]
pub trait BookSource: Send + Sync {
    /// Fetch the content and metadata of a book. Single attempt, no retry.
    async fn fetch(&self, id: BookId) -> Result<Book>;
}

/// Something that can summarize text
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `text`; implementations send at most
    /// [`SOURCE_TEXT_LIMIT_CHARS`] characters of it.
    async fn summarize(&self, text: &str) -> Result<String>;
}

/// Cut `text` to at most `limit` characters, on a char boundary
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
