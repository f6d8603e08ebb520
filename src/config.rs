//! NewsAPI configuration.
//!
//! The bot never reads the environment itself. The binary resolves settings
//! from CLI flags, environment variables (through clap), and an optional YAML
//! file, then hands a [`NewsApiConfig`] to the bot.
//!
//! # File Format
//!
//! ```yaml
//! news_api:
//!   api_key: "0123456789abcdef"
//!   endpoint: "https://newsapi.org/v2/everything"
//! ```

use crate::error::{BotError, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use tracing::{info, instrument};
use url::Url;

/// Default NewsAPI search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://newsapi.org/v2/everything";

/// Settings needed to query the news-search API.
#[derive(Clone)]
pub struct NewsApiConfig {
    /// Secret sent as `apiKey`. `None` makes every call fail before any request.
    pub api_key: Option<String>,
    /// Base URL the query string is appended to.
    pub endpoint: Url,
}

impl NewsApiConfig {
    /// Build a config for the default endpoint.
    ///
    /// A blank key is treated the same as no key.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Configuration`] if [`DEFAULT_ENDPOINT`] does not parse.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Ok(Self {
            api_key: normalize_key(api_key),
            endpoint: parse_endpoint(DEFAULT_ENDPOINT)?,
        })
    }

    /// Replace the endpoint, rejecting anything that is not an absolute http(s) URL.
    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self> {
        self.endpoint = parse_endpoint(endpoint)?;
        Ok(self)
    }

    /// The configured key, or a [`BotError::Configuration`] if there is none.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| BotError::Configuration("NEWS_API_KEY is not configured".to_string()))
    }
}

impl fmt::Debug for NewsApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

/// On-disk configuration file.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub news_api: NewsApiSection,
}

/// The `news_api` section of [`ConfigFile`].
#[derive(Debug, Default, Deserialize)]
pub struct NewsApiSection {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl ConfigFile {
    /// Parse a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| BotError::Configuration(format!("invalid config file: {e}")))
    }

    /// Read and parse a YAML config file.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path) -> Result<Self> {
        let yaml = tokio::fs::read_to_string(path).await.map_err(|e| {
            BotError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        let file = Self::from_yaml(&yaml)?;
        info!("Loaded configuration file");
        Ok(file)
    }

    /// Merge with higher-priority overrides (flags/environment) into a [`NewsApiConfig`].
    pub fn resolve(
        self,
        api_key_override: Option<String>,
        endpoint_override: Option<String>,
    ) -> Result<NewsApiConfig> {
        let api_key = normalize_key(api_key_override).or(normalize_key(self.news_api.api_key));
        let config = NewsApiConfig::new(api_key)?;
        match endpoint_override.or(self.news_api.endpoint) {
            Some(endpoint) => config.with_endpoint(&endpoint),
            None => Ok(config),
        }
    }
}

fn normalize_key(key: Option<String>) -> Option<String> {
    key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty())
}

fn parse_endpoint(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| BotError::Configuration(format!("invalid endpoint {raw:?}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(BotError::Configuration(format!(
            "endpoint must use http or https, got {other:?}"
        ))),
    }
}
