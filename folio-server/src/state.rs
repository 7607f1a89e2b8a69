//! Application state

use crate::config::ServerConfig;
use folio_core::{BookSource, GroqClient, GutenbergClient, Summarizer};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Where books come from
    pub books: Arc<dyn BookSource>,

    /// Where summaries come from
    pub summarizer: Arc<dyn Summarizer>,
}

impl AppState {
    pub fn new(books: impl BookSource + 'static, summarizer: impl Summarizer + 'static) -> Self {
        Self {
            books: Arc::new(books),
            summarizer: Arc::new(summarizer),
        }
    }

    /// Create state backed by Project Gutenberg and Groq
    pub fn from_config(config: &ServerConfig) -> Self {
        let books = GutenbergClient::with_base_url(&config.gutenberg_url);
        let summarizer = GroqClient::new(config.groq_api_key.clone())
            .with_base_url(&config.groq_url)
            .with_model(&config.groq_model);

        tracing::info!("Summaries use model {}", summarizer.model());
        if !summarizer.has_api_key() {
            tracing::warn!("GROQ_API_KEY is not set; analysis requests will fail");
        }

        Self::new(books, summarizer)
    }
}
