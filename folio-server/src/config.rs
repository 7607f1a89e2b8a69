//! Server configuration from the environment

use anyhow::{Context, Result};
use folio_core::upstream::{DEFAULT_GROQ_MODEL, DEFAULT_GROQ_URL, DEFAULT_GUTENBERG_URL};
use std::fmt;
use std::net::SocketAddr;

/// Origins allowed by the CORS layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsOrigins {
    /// Local development origins
    #[default]
    Localhost,

    /// `*`
    Any,

    /// An explicit list
    List(Vec<String>),
}

impl CorsOrigins {
    /// Parse `*` or a comma-separated list of origins
    pub fn parse(value: &str) -> Self {
        if value.trim() == "*" {
            return CorsOrigins::Any;
        }
        CorsOrigins::List(
            value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }
}

/// Everything the server reads at startup
#[derive(Clone)]
pub struct ServerConfig {
    /// Address to listen on (`FOLIO_BIND`)
    pub bind: SocketAddr,

    /// CORS policy (`FOLIO_CORS_ORIGINS`)
    pub cors_origins: CorsOrigins,

    /// Project Gutenberg base URL (`FOLIO_GUTENBERG_URL`)
    pub gutenberg_url: String,

    /// Chat-completions base URL (`FOLIO_GROQ_URL`)
    pub groq_url: String,

    /// Model used for summaries (`FOLIO_GROQ_MODEL`)
    pub groq_model: String,

    /// Secret key for the generation backend (`GROQ_API_KEY`)
    pub groq_api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cors_origins: CorsOrigins::default(),
            gutenberg_url: DEFAULT_GUTENBERG_URL.to_string(),
            groq_url: DEFAULT_GROQ_URL.to_string(),
            groq_model: DEFAULT_GROQ_MODEL.to_string(),
            groq_api_key: None,
        }
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind", &self.bind)
            .field("cors_origins", &self.cors_origins)
            .field("gutenberg_url", &self.gutenberg_url)
            .field("groq_url", &self.groq_url)
            .field("groq_model", &self.groq_model)
            .field("groq_api_key", &self.groq_api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ServerConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(bind) = lookup("FOLIO_BIND") {
            config.bind = bind
                .parse()
                .with_context(|| format!("FOLIO_BIND is not a socket address: {}", bind))?;
        }
        if let Some(origins) = lookup("FOLIO_CORS_ORIGINS") {
            config.cors_origins = CorsOrigins::parse(&origins);
        }
        if let Some(url) = lookup("FOLIO_GUTENBERG_URL") {
            config.gutenberg_url = url;
        }
        if let Some(url) = lookup("FOLIO_GROQ_URL") {
            config.groq_url = url;
        }
        if let Some(model) = lookup("FOLIO_GROQ_MODEL") {
            config.groq_model = model;
        }
        config.groq_api_key = lookup("GROQ_API_KEY").filter(|k| !k.trim().is_empty());

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind.port(), 3000);
        assert_eq!(config.cors_origins, CorsOrigins::Localhost);
        assert_eq!(config.gutenberg_url, DEFAULT_GUTENBERG_URL);
        assert!(config.groq_api_key.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("FOLIO_BIND", "0.0.0.0:8080"),
            ("FOLIO_CORS_ORIGINS", "https://a.test, https://b.test"),
            ("FOLIO_GROQ_MODEL", "llama-3.1-8b-instant"),
            ("GROQ_API_KEY", "gsk_secret"),
        ]))
        .unwrap();

        assert_eq!(config.bind.port(), 8080);
        assert_eq!(
            config.cors_origins,
            CorsOrigins::List(vec!["https://a.test".into(), "https://b.test".into()])
        );
        assert_eq!(config.groq_model, "llama-3.1-8b-instant");
        assert_eq!(config.groq_api_key.as_deref(), Some("gsk_secret"));
    }

    #[test]
    fn test_bad_bind_address() {
        assert!(ServerConfig::from_lookup(lookup(&[("FOLIO_BIND", "nowhere")])).is_err());
    }

    #[test]
    fn test_cors_any() {
        assert_eq!(CorsOrigins::parse("*"), CorsOrigins::Any);
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ServerConfig {
            groq_api_key: Some("gsk_secret".to_string()),
            ..ServerConfig::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("gsk_secret"));
        assert!(debug.contains("<redacted>"));
    }
}
