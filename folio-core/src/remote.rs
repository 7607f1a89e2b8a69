//! Client for a running Folio server

use crate::api::{AnalysisRequest, AnalysisResponse, BookResponse};
use crate::error::{FetchError, GenerationError, Result};
use crate::source::{truncate_chars, BookSource, Summarizer, SOURCE_TEXT_LIMIT_CHARS};
use crate::types::{Book, BookId};
use async_trait::async_trait;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Fetches books and summaries through the Folio HTTP API
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl BookSource for RemoteClient {
    async fn fetch(&self, id: BookId) -> Result<Book> {
        let url = format!("{}/api/fetchbook/{}", self.base_url, id);
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            }
            .into());
        }

        let body: BookResponse = response.json().await.map_err(|e| FetchError::Body {
            url: url.clone(),
            message: e.to_string(),
        })?;

        body.into_result()
    }
}

#[async_trait]
impl Summarizer for RemoteClient {
    async fn summarize(&self, text: &str) -> Result<String> {
        let url = format!("{}/api/generateanalysis", self.base_url);
        let request = AnalysisRequest {
            text: truncate_chars(text, SOURCE_TEXT_LIMIT_CHARS).to_string(),
        };
        tracing::debug!("POST {} ({} chars)", url, request.text.chars().count());

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let body: AnalysisResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Body(e.to_string()))?;

        body.into_result()
    }
}
