//! Error types for Folio Core

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using FolioError
pub type Result<T> = std::result::Result<T, FolioError>;

/// Top-level error type for all Folio operations
#[derive(Debug, Error)]
pub enum FolioError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl FolioError {
    /// Stable discriminant for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            FolioError::Input(_) => ErrorKind::Input,
            FolioError::Fetch(_) => ErrorKind::UpstreamFetch,
            FolioError::Generation(_) => ErrorKind::UpstreamGeneration,
            FolioError::Cache(_) => ErrorKind::Cache,
        }
    }

    /// Rebuild an error reported by a Folio server
    pub fn from_remote(kind: ErrorKind, message: String) -> Self {
        match kind {
            ErrorKind::Input => InputError::Rejected(message).into(),
            ErrorKind::UpstreamFetch => FetchError::Rejected(message).into(),
            ErrorKind::UpstreamGeneration => GenerationError::Rejected(message).into(),
            ErrorKind::Cache => CacheError::Rejected(message).into(),
        }
    }
}

/// Malformed or missing user input
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Book id is missing")]
    Empty,

    #[error("Book id is not a number: {0:?}")]
    NotANumber(String),

    #[error("Book id is out of range: {0}")]
    OutOfRange(String),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("{0}")]
    Rejected(String),
}

/// Failures talking to the book source or metadata page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid response from {url}: {message}")]
    Body { url: String, message: String },

    #[error("{0}")]
    Rejected(String),
}

/// Failures talking to the text generation backend
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("No API key configured for the generation backend")]
    MissingApiKey,

    #[error("Generation request failed: {0}")]
    Transport(String),

    #[error("Generation backend returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid generation response: {0}")]
    Body(String),

    #[error("{0}")]
    Rejected(String),
}

/// Errors from the persisted book cache
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Rejected(String),
}

/// Error discriminant exposed at the API boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Input,
    UpstreamFetch,
    UpstreamGeneration,
    Cache,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Input => "input",
            ErrorKind::UpstreamFetch => "upstream_fetch",
            ErrorKind::UpstreamGeneration => "upstream_generation",
            ErrorKind::Cache => "cache",
        };
        f.write_str(name)
    }
}

/// A rendered failure: what the page shows and what the API returns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub kind: ErrorKind,
    pub message: String,
}

impl Failure {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<&FolioError> for Failure {
    fn from(err: &FolioError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

impl From<FolioError> for Failure {
    fn from(err: FolioError) -> Self {
        Self::from(&err)
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
