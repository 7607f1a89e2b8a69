//! The page controller
//!
//! [`ViewController`] owns the page state, the search input and the book
//! cache. Each network-bound action is split in two: `begin_*` performs
//! the synchronous part of the transition and hands back a pending request,
//! `complete_*` applies the result. Every state change bumps a generation
//! counter and pending requests carry the generation they were issued
//! under, so a result that arrives after the user moved on is dropped.

mod render;
mod state;

pub use render::{render_page, render_saved};
pub use state::PageState;

use crate::cache::BookCache;
use crate::error::{Failure, FolioError, Result};
use crate::source::{BookSource, Summarizer};
use crate::types::{Book, BookId, MetadataEntry};

/// Identifies the state a request was issued from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ticket(u64);

/// A fetch the controller is waiting on
#[derive(Debug)]
pub struct PendingFetch {
    ticket: Ticket,
    book_id: BookId,
}

impl PendingFetch {
    pub fn book_id(&self) -> BookId {
        self.book_id
    }
}

/// A summary the controller is waiting on
#[derive(Debug)]
pub struct PendingSummary {
    ticket: Ticket,
    text: String,
}

impl PendingSummary {
    /// The book content to summarize
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Drives the page state machine against a cache
pub struct ViewController<C> {
    cache: C,
    state: PageState,
    input: String,
    generation: u64,
}

impl<C: BookCache> ViewController<C> {
    pub fn new(cache: C) -> Self {
        Self {
            cache,
            state: PageState::NoneSelected,
            input: String::new(),
            generation: 0,
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Current contents of the search field
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Saved books, in the order they were cached
    pub fn saved(&self) -> &[MetadataEntry] {
        self.cache.list()
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Forget every saved book. The displayed page is left alone.
    pub fn clear_saved(&mut self) -> Result<()> {
        self.cache.clear()?;
        tracing::info!("Cleared saved books");
        Ok(())
    }

    fn current_ticket(&self) -> Ticket {
        Ticket(self.generation)
    }

    fn transition(&mut self, next: PageState) -> Ticket {
        self.generation += 1;
        self.state = next;
        self.current_ticket()
    }

    fn fail(&mut self, err: FolioError) {
        tracing::debug!("Page error ({}): {}", err.kind(), err);
        self.transition(PageState::Error(Failure::from(err)));
    }

    /// Start a search for the id in the input field.
    ///
    /// Invalid input and cache hits settle the page immediately and return
    /// `None`; otherwise the page is `Loading` and the returned fetch must
    /// be completed with [`complete_fetch`](Self::complete_fetch).
    pub fn begin_search(&mut self) -> Option<PendingFetch> {
        let book_id = match self.input.parse::<BookId>() {
            Ok(id) => id,
            Err(e) => {
                self.fail(e.into());
                return None;
            }
        };

        let ticket = self.transition(PageState::Loading);

        if let Some(book) = self.cache.get(book_id) {
            tracing::debug!("Cache hit for book {}", book_id);
            self.transition(PageState::Loaded {
                book,
                summary: None,
            });
            return None;
        }

        tracing::debug!("Cache miss for book {}", book_id);
        Some(PendingFetch { ticket, book_id })
    }

    /// Apply a fetch result. Returns `false` if the fetch was superseded.
    pub fn complete_fetch(&mut self, pending: PendingFetch, result: Result<Book>) -> bool {
        if pending.ticket != self.current_ticket() {
            tracing::debug!("Discarding stale fetch of book {}", pending.book_id);
            return false;
        }

        match result {
            Ok(book) => {
                if let Err(e) = self.cache.put(pending.book_id, &book) {
                    tracing::warn!("Failed to save book {}: {}", pending.book_id, e);
                }
                self.transition(PageState::Loaded {
                    book,
                    summary: None,
                });
            }
            Err(e) => self.fail(e),
        }
        true
    }

    /// Search, fetching from `source` on a cache miss
    pub async fn search<S: BookSource + ?Sized>(&mut self, source: &S) {
        if let Some(pending) = self.begin_search() {
            let result = source.fetch(pending.book_id).await;
            self.complete_fetch(pending, result);
        }
    }

    /// Start summarizing the loaded book.
    ///
    /// Returns `None` unless a book is loaded without a summary.
    pub fn begin_summary(&mut self) -> Option<PendingSummary> {
        let PageState::Loaded {
            book,
            summary: None,
        } = &self.state
        else {
            return None;
        };

        let text = book.content.clone();
        self.generation += 1;
        Some(PendingSummary {
            ticket: self.current_ticket(),
            text,
        })
    }

    /// Apply a summary result. Returns `false` if the request was superseded.
    pub fn complete_summary(&mut self, pending: PendingSummary, result: Result<String>) -> bool {
        if pending.ticket != self.current_ticket() {
            tracing::debug!("Discarding stale summary");
            return false;
        }

        match result {
            Ok(analysis) => match &mut self.state {
                PageState::Loaded { summary, .. } => *summary = Some(analysis),
                _ => return false,
            },
            Err(e) => self.fail(e),
        }
        true
    }

    /// Summarize the loaded book with `summarizer`
    pub async fn request_summary<S: Summarizer + ?Sized>(&mut self, summarizer: &S) {
        if let Some(pending) = self.begin_summary() {
            let result = summarizer.summarize(&pending.text).await;
            self.complete_summary(pending, result);
        }
    }

    /// Drop the summary and show the book content again
    pub fn back_to_content(&mut self) -> bool {
        match &mut self.state {
            PageState::Loaded { summary, .. } if summary.is_some() => {
                *summary = None;
                true
            }
            _ => false,
        }
    }

    /// Leave the loaded book and clear the search field
    pub fn exit(&mut self) -> bool {
        if !matches!(self.state, PageState::Loaded { .. }) {
            return false;
        }
        self.transition(PageState::NoneSelected);
        self.input.clear();
        true
    }

    /// Render the book area of the page
    pub fn render(&self) -> String {
        render_page(&self.state)
    }
}
