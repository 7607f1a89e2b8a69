//! Project Gutenberg book fetcher
//!
//! A book is two documents: the plain-text file and the catalog page, whose
//! bibliographic table (`#bibrec`) carries the title and author.

use crate::error::{FetchError, Result};
use crate::source::BookSource;
use crate::types::{Book, BookId, BookMetadata};
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};

pub const DEFAULT_GUTENBERG_URL: &str = "https://www.gutenberg.org";

/// Fetches books straight from Project Gutenberg (or a mirror)
#[derive(Debug, Clone)]
pub struct GutenbergClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for GutenbergClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GutenbergClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_GUTENBERG_URL)
    }

    /// Point the client at a mirror
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// URL of the plain-text file
    pub fn content_url(&self, id: BookId) -> String {
        format!("{}/files/{}/{}-0.txt", self.base_url, id, id)
    }

    /// URL of the catalog page
    pub fn metadata_url(&self, id: BookId) -> String {
        format!("{}/ebooks/{}", self.base_url, id)
    }

    async fn get_text(&self, url: &str) -> std::result::Result<String, FetchError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl BookSource for GutenbergClient {
    async fn fetch(&self, id: BookId) -> Result<Book> {
        tracing::info!("Fetching book {} from {}", id, self.base_url);

        let content = self.get_text(&self.content_url(id)).await?;
        let page = self.get_text(&self.metadata_url(id)).await?;
        let metadata = parse_metadata(&page);

        if metadata.title.is_empty() || metadata.author.is_empty() {
            tracing::warn!(
                "Catalog page for book {} is missing fields (title: {:?}, author: {:?})",
                id,
                metadata.title,
                metadata.author
            );
        }

        Ok(Book::new(content, metadata))
    }
}

/// Extract title and author from a catalog page.
///
/// Fields that cannot be found come back as empty strings.
pub fn parse_metadata(html: &str) -> BookMetadata {
    let document = Html::parse_document(html);
    BookMetadata {
        title: bibrec_field(&document, "Title"),
        author: bibrec_field(&document, "Author"),
    }
}

/// Text of the `td` right after the first `#bibrec` header containing `label`
fn bibrec_field(document: &Html, label: &str) -> String {
    let header_selector = Selector::parse("#bibrec th").unwrap();

    document
        .select(&header_selector)
        .find(|th| th.text().collect::<String>().contains(label))
        .and_then(|th| th.next_siblings().find_map(ElementRef::wrap))
        .filter(|cell| cell.value().name() == "td")
        .map(|td| td.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_PAGE: &str = r#"
        <html><body>
        <table class="bibrec" id="bibrec">
          <tr>
            <th>Author</th>
            <td><a href="/ebooks/author/35">Carroll, Lewis, 1832-1898</a></td>
          </tr>
          <tr>
            <th>Illustrator</th>
            <td>Tenniel, John, 1820-1914</td>
          </tr>
          <tr>
            <th>Title</th>
            <td>
              Alice's Adventures in Wonderland
            </td>
          </tr>
          <tr>
            <th>Uniform Title</th>
            <td>Alice in Wonderland</td>
          </tr>
        </table>
        </body></html>
    "#;

    #[test]
    fn test_parse_metadata() {
        let metadata = parse_metadata(CATALOG_PAGE);
        assert_eq!(metadata.title, "Alice's Adventures in Wonderland");
        assert_eq!(metadata.author, "Carroll, Lewis, 1832-1898");
    }

    #[test]
    fn test_parse_metadata_missing_fields_are_empty() {
        let metadata = parse_metadata("<html><body><p>Not a catalog page</p></body></html>");
        assert_eq!(metadata, BookMetadata::default());
    }

    #[test]
    fn test_parse_metadata_ignores_tables_outside_bibrec() {
        let html = r#"
            <table><tr><th>Title</th><td>Wrong</td></tr></table>
            <table id="bibrec"><tr><th>Author</th><td>Right Author</td></tr></table>
        "#;
        let metadata = parse_metadata(html);
        assert_eq!(metadata.title, "");
        assert_eq!(metadata.author, "Right Author");
    }

    #[test]
    fn test_header_without_value_cell() {
        let html = r#"<table id="bibrec"><tr><th>Title</th><th>Oops</th></tr></table>"#;
        assert_eq!(parse_metadata(html).title, "");
    }

    #[test]
    fn test_urls() {
        let client = GutenbergClient::with_base_url("http://mirror.test/");
        let id = BookId::new(1342).unwrap();
        assert_eq!(
            client.content_url(id),
            "http://mirror.test/files/1342/1342-0.txt"
        );
        assert_eq!(client.metadata_url(id), "http://mirror.test/ebooks/1342");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_error() {
        let client = GutenbergClient::with_base_url("http://127.0.0.1:1");
        let err = client.fetch(BookId::new(1).unwrap()).await.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::UpstreamFetch);
        assert!(err.to_string().contains("127.0.0.1:1/files/1/1-0.txt"));
    }
}
