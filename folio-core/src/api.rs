//! JSON bodies of the Folio HTTP API

use crate::error::{ErrorKind, Failure, FolioError, GenerationError, Result};
use crate::types::Book;
use serde::{Deserialize, Serialize};

/// `analysis` value returned when no summary could be produced
pub const ANALYSIS_ERROR_MARKER: &str = "Error. ";

/// Response of `GET /api/fetchbook/{bookId}`
///
/// Always sent with status 200; clients branch on `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum BookResponse {
    Success {
        book: Book,
    },
    Error {
        message: String,
        #[serde(rename = "errorKind", default = "default_error_kind")]
        error_kind: ErrorKind,
    },
}

fn default_error_kind() -> ErrorKind {
    ErrorKind::UpstreamFetch
}

impl BookResponse {
    pub fn into_result(self) -> Result<Book> {
        match self {
            BookResponse::Success { book } => Ok(book),
            BookResponse::Error {
                message,
                error_kind,
            } => Err(FolioError::from_remote(error_kind, message)),
        }
    }
}

impl From<Result<Book>> for BookResponse {
    fn from(result: Result<Book>) -> Self {
        match result {
            Ok(book) => BookResponse::Success { book },
            Err(e) => BookResponse::from(e),
        }
    }
}

impl From<FolioError> for BookResponse {
    fn from(err: FolioError) -> Self {
        BookResponse::Error {
            message: err.to_string(),
            error_kind: err.kind(),
        }
    }
}

/// Body of `POST /api/generateanalysis`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub text: String,
}

/// Response of `POST /api/generateanalysis`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub analysis: String,

    /// Present when `analysis` is the error marker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Failure>,
}

impl AnalysisResponse {
    pub fn into_result(self) -> Result<String> {
        match self.error {
            Some(failure) => Err(FolioError::from_remote(failure.kind, failure.message)),
            None if self.analysis == ANALYSIS_ERROR_MARKER => Err(GenerationError::Rejected(
                "The server could not generate an analysis".to_string(),
            )
            .into()),
            None => Ok(self.analysis),
        }
    }
}

impl From<Result<String>> for AnalysisResponse {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(analysis) => Self {
                analysis,
                error: None,
            },
            Err(e) => Self {
                analysis: ANALYSIS_ERROR_MARKER.to_string(),
                error: Some(Failure::from(e)),
            },
        }
    }
}
