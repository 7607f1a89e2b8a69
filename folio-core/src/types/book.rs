//! The Book record and its metadata projection

use super::BookId;
use serde::{Deserialize, Serialize};

/// A book as scraped from Project Gutenberg
///
/// The catalog id is not part of the record; it is the key the book is
/// cached under.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    /// The full plain-text contents of the book
    pub content: String,

    /// Title and author from the catalog page
    pub metadata: BookMetadata,
}

impl Book {
    pub fn new(content: impl Into<String>, metadata: BookMetadata) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }

    /// Get the book title
    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    /// Get the book author
    pub fn author(&self) -> &str {
        &self.metadata.author
    }
}

/// Title and author, either of which may be empty when the catalog page
/// did not carry it
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookMetadata {
    pub title: String,
    pub author: String,
}

impl BookMetadata {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
        }
    }
}

/// One row of the saved-books listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MetadataEntry {
    pub book_id: BookId,
    pub metadata: BookMetadata,
}

impl MetadataEntry {
    pub fn new(book_id: BookId, book: &Book) -> Self {
        Self {
            book_id,
            metadata: book.metadata.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_json_shape() {
        let book = Book::new("text", BookMetadata::new("Alice", "Bob"));
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["content"], "text");
        assert_eq!(json["metadata"]["title"], "Alice");
        assert_eq!(json["metadata"]["author"], "Bob");
    }

    #[test]
    fn test_metadata_entry_uses_camel_case() {
        let book = Book::new("text", BookMetadata::new("Alice", "Bob"));
        let entry = MetadataEntry::new(BookId::new(1234).unwrap(), &book);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["bookId"], 1234);
        assert_eq!(json["metadata"]["title"], "Alice");
    }
}
