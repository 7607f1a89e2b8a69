//! Folio Core Library
//!
//! This crate provides the types, cache and clients for browsing Project
//! Gutenberg books, plus the page controller that ties them together.
//! Books are looked up in the local cache first and fetched (then cached)
//! on a miss; summaries are generated on demand and never cached.

pub mod api;
pub mod cache;
pub mod controller;
pub mod error;
pub mod remote;
pub mod source;
pub mod types;
pub mod upstream;

pub use cache::{BookCache, FileCache, LocalCache, MemoryCache};
pub use controller::{PageState, ViewController};
pub use error::{ErrorKind, Failure, FolioError, Result};
pub use remote::RemoteClient;
pub use source::{BookSource, Summarizer};
pub use types::{Book, BookId, BookMetadata, MetadataEntry};
pub use upstream::{GroqClient, GutenbergClient};
