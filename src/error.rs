//! Error taxonomy for a single bot invocation.
//!
//! Every failure is surfaced to the caller as a [`BotError`]. Nothing is
//! swallowed or turned into an empty reply: a query that matches zero
//! articles is a success, but a broken upstream is always an error.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    /// The caller's input did not match `{ query: string }`.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A required setting (the NewsAPI key, a usable endpoint) is missing.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The upstream could not be reached or the body could not be read.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The upstream answered, but not with a usable article list.
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// The assembled reply does not satisfy the output schema.
    #[error("Output schema error: {0}")]
    OutputSchema(String),
}

/// Ways a reachable upstream can fail to deliver articles.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("HTTP {status}{}", describe(.code, .message))]
    HttpStatus {
        status: u16,
        code: Option<String>,
        message: Option<String>,
    },

    #[error("response status {status:?}{}", describe(.code, .message))]
    Status {
        status: String,
        code: Option<String>,
        message: Option<String>,
    },

    #[error("could not decode response body: {0}")]
    Decode(String),

    #[error("successful response is missing the articles list")]
    MissingArticles,
}

fn describe(code: &Option<String>, message: &Option<String>) -> String {
    match (code, message) {
        (Some(c), Some(m)) => format!(" ({c}: {m})"),
        (Some(c), None) => format!(" ({c})"),
        (None, Some(m)) => format!(" ({m})"),
        (None, None) => String::new(),
    }
}

impl BotError {
    /// Short stable name of the error kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            BotError::Validation(_) => "validation",
            BotError::Configuration(_) => "configuration",
            BotError::Network(_) => "network",
            BotError::Upstream(_) => "upstream",
            BotError::OutputSchema(_) => "output_schema",
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_display_includes_upstream_details() {
        let err = UpstreamError::HttpStatus {
            status: 401,
            code: Some("apiKeyInvalid".to_string()),
            message: Some("Your API key is invalid.".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "HTTP 401 (apiKeyInvalid: Your API key is invalid.)"
        );
    }

    #[test]
    fn test_status_display_without_details() {
        let err = UpstreamError::Status {
            status: "error".to_string(),
            code: None,
            message: None,
        };
        assert_eq!(err.to_string(), "response status \"error\"");
    }

    #[test]
    fn test_upstream_converts_into_bot_error() {
        let err: BotError = UpstreamError::MissingArticles.into();
        assert_eq!(err.kind(), "upstream");
        assert!(err.to_string().starts_with("Upstream error:"));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(BotError::Validation("x".into()).kind(), "validation");
        assert_eq!(BotError::Configuration("x".into()).kind(), "configuration");
        assert_eq!(BotError::OutputSchema("x".into()).kind(), "output_schema");
    }
}
