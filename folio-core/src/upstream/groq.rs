//! Groq chat-completions summarizer (OpenAI-compatible API)

use crate::error::{GenerationError, Result};
use crate::source::{truncate_chars, Summarizer, NO_ANALYSIS_PLACEHOLDER, SOURCE_TEXT_LIMIT_CHARS};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const DEFAULT_GROQ_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_MODEL: &str = "llama3-8b-8192";

const PROMPT_PREFIX: &str = "Please summarize the following text:\n\n";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Summarizes text with a Groq-hosted model
#[derive(Clone)]
pub struct GroqClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GroqClient {
    /// Create a client; without a key every request fails with
    /// [`GenerationError::MissingApiKey`]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_GROQ_URL.to_string(),
            model: DEFAULT_GROQ_MODEL.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Use another OpenAI-compatible endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// Pull a readable message out of an error body
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_owned))
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl Summarizer for GroqClient {
    async fn summarize(&self, text: &str) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or(GenerationError::MissingApiKey)?;

        let prompt = format!(
            "{}{}",
            PROMPT_PREFIX,
            truncate_chars(text, SOURCE_TEXT_LIMIT_CHARS)
        );
        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: &prompt,
            }],
        };

        tracing::info!("Requesting summary from {} ({})", self.base_url, self.model);

        let response = self
            .http
            .post(self.url())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            }
            .into());
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Body(e.to_string()))?;

        let analysis = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .unwrap_or_else(|| NO_ANALYSIS_PLACEHOLDER.to_string());

        Ok(analysis)
    }
}
