//! Plain-text rendering of the page

use super::PageState;
use crate::types::MetadataEntry;

/// Render the book area of the page
pub fn render_page(state: &PageState) -> String {
    match state {
        PageState::NoneSelected => String::new(),
        PageState::Loading => "(LOADING BOOK ... )".to_string(),
        PageState::Error(failure) => format!("ERROR: {}", failure.message),
        PageState::Loaded { book, summary } => {
            let mut out = format!("{}\n{}\n\n", book.title(), book.author());
            match summary {
                Some(analysis) => {
                    out.push_str("[back] Back to Book Content  [exit] Exit Book\n\n");
                    out.push_str("LLM Analysis:\n");
                    out.push_str(analysis);
                }
                None => {
                    out.push_str("[summary] Generate LLM Analysis  [exit] Exit Book\n\n");
                    out.push_str(&book.content);
                }
            }
            out
        }
    }
}

/// Render the saved-books table
pub fn render_saved(entries: &[MetadataEntry]) -> String {
    if entries.is_empty() {
        return "No saved books yet!".to_string();
    }

    let ids: Vec<String> = entries.iter().map(|e| e.book_id.to_string()).collect();
    let id_width = ids
        .iter()
        .map(|id| id.len())
        .chain(["Book Id".len()])
        .max()
        .unwrap_or_default();
    let title_width = entries
        .iter()
        .map(|e| e.metadata.title.chars().count())
        .chain(["Title".len()])
        .max()
        .unwrap_or_default();

    let mut out = format!(
        "{:<id_width$}  {:<title_width$}  Author\n",
        "Book Id", "Title"
    );
    for (id, entry) in ids.iter().zip(entries) {
        out.push_str(&format!(
            "{:<id_width$}  {:<title_width$}  {}\n",
            id, entry.metadata.title, entry.metadata.author
        ));
    }
    out.truncate(out.trim_end().len());
    out
}
