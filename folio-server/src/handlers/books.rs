//! Book lookup handlers

use crate::state::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use folio_core::api::BookResponse;
use folio_core::error::InputError;
use folio_core::{BookId, FolioError};

/// Fetch a book by catalog id.
///
/// Always answers 200; failures are reported in the body.
pub async fn fetch_book(
    State(state): State<AppState>,
    book_id: Result<Path<String>, PathRejection>,
) -> Json<BookResponse> {
    let book_id = match book_id {
        Ok(Path(book_id)) => book_id,
        Err(rejection) => {
            tracing::debug!("Rejected book id path: {}", rejection);
            return Json(FolioError::from(InputError::NotANumber(rejection.body_text())).into());
        }
    };

    let id = match book_id.parse::<BookId>() {
        Ok(id) => id,
        Err(e) => {
            tracing::debug!("Rejected book id {:?}: {}", book_id, e);
            return Json(FolioError::from(e).into());
        }
    };

    let result = state.books.fetch(id).await;
    if let Err(e) = &result {
        tracing::warn!("Fetching book {} failed: {}", id, e);
    }

    Json(result.into())
}

/// `/api/fetchbook` without an id
pub async fn fetch_book_missing_id() -> Json<BookResponse> {
    Json(FolioError::from(InputError::Empty).into())
}
