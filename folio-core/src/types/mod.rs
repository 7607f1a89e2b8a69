//! Core types shared by the cache, the clients and the view controller

mod book;
mod id;

pub use book::{Book, BookMetadata, MetadataEntry};
pub use id::BookId;
