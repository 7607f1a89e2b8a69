//! Summary generation handler

use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use folio_core::api::AnalysisResponse;
use folio_core::error::InputError;
use folio_core::FolioError;
use serde_json::Value;

/// Summarize the `text` field of the request body.
///
/// Always answers 200. A malformed body or a backend failure yields the
/// error marker as `analysis` together with an `error` object.
pub async fn generate_analysis(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Json<AnalysisResponse> {
    let text = match payload {
        Ok(Json(body)) => body.get("text").and_then(Value::as_str).map(str::to_owned),
        Err(rejection) => {
            tracing::debug!("Rejected analysis body: {}", rejection);
            None
        }
    };

    let Some(text) = text else {
        let result: folio_core::Result<String> = Err(FolioError::from(InputError::MalformedBody(
            "expected a JSON object with a string \"text\" field".to_string(),
        )));
        return Json(result.into());
    };

    let result = state.summarizer.summarize(&text).await;
    if let Err(e) = &result {
        tracing::warn!("Analysis failed: {}", e);
    }

    Json(result.into())
}
