//! The page state machine's states

use crate::error::Failure;
use crate::types::Book;

/// What the page is showing. Exactly one is active at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageState {
    /// Nothing selected yet, or the last book was exited
    #[default]
    NoneSelected,

    /// A fetch is in flight
    Loading,

    /// A book is displayed; `summary` is set after a successful analysis
    Loaded { book: Book, summary: Option<String> },

    /// The last operation failed
    Error(Failure),
}

impl PageState {
    pub fn book(&self) -> Option<&Book> {
        match self {
            PageState::Loaded { book, .. } => Some(book),
            _ => None,
        }
    }

    pub fn summary(&self) -> Option<&str> {
        match self {
            PageState::Loaded { summary, .. } => summary.as_deref(),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            PageState::Error(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PageState::Loading)
    }
}
