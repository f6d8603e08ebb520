//! Data models for the bot's input, its reply, and the upstream payload.
//!
//! This module defines the core data structures used throughout the crate:
//! - [`TechNewsBotInput`]: The caller's query
//! - [`Reply`] and [`NewsItem`]: The structured answer returned to the caller
//! - [`ApiResponse`], [`Article`], [`ArticleSource`]: The NewsAPI response shape
//!
//! Upstream models use camelCase field names to match the NewsAPI JSON.

use serde::{Deserialize, Serialize};

/// Greeting placed before the list of news items on every successful reply.
pub const INTRO: &str = "Here are the latest tech news related to your query:";

/// Summary used when an article carries no description.
pub const NO_SUMMARY: &str = "No summary available.";

/// Maximum number of news items in a reply.
pub const MAX_NEWS_ITEMS: usize = 5;

/// Marker NewsAPI puts in `status` on success.
pub const STATUS_OK: &str = "ok";

/// The user's question about tech news.
///
/// Unknown fields in the incoming JSON are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TechNewsBotInput {
    /// Free text; the empty string is accepted.
    pub query: String,
}

/// One normalized article in a [`Reply`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsItem {
    /// The headline of the article.
    pub title: String,
    /// A brief summary, never empty.
    pub summary: String,
    /// Display name of the publisher (e.g. "The Verge").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Direct link to the full article.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// The structured answer: a friendly intro plus up to five news items.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Reply {
    pub intro: String,
    pub news: Vec<NewsItem>,
}

/// Top-level body returned by the NewsAPI `everything` endpoint.
///
/// Error bodies share the same envelope with `status: "error"` and
/// `code`/`message` set instead of `articles`. Articles are kept as raw JSON
/// so that only the ones actually used are decoded into [`Article`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status: String,
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub articles: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A single article as returned by NewsAPI.
///
/// `title` is required; an article without one is an unexpected shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub source: Option<ArticleSource>,
    #[serde(default)]
    pub url: Option<String>,
}

/// The publisher block nested in an [`Article`].
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_news_item_omits_missing_optionals() {
        let item = NewsItem {
            title: "Chip shortage eases".to_string(),
            summary: NO_SUMMARY.to_string(),
            source: None,
            url: None,
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"title": "Chip shortage eases", "summary": "No summary available."})
        );
    }

    #[test]
    fn test_input_ignores_unknown_fields() {
        let input: TechNewsBotInput =
            serde_json::from_str(r#"{"query": "rust", "locale": "en-GB"}"#).unwrap();
        assert_eq!(input.query, "rust");
    }

    #[test]
    fn test_api_response_deserialization() {
        let json = r#"{
            "status": "ok",
            "totalResults": 1,
            "articles": [{
                "source": {"id": "the-verge", "name": "The Verge"},
                "author": "Jane Doe",
                "title": "New GPU announced",
                "description": "A faster GPU.",
                "url": "https://www.theverge.com/gpu",
                "urlToImage": null,
                "publishedAt": "2025-05-06T12:00:00Z",
                "content": "..."
            }]
        }"#;

        let resp: ApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.status, "ok");
        assert_eq!(resp.total_results, Some(1));
        let raw = resp.articles.unwrap();
        assert_eq!(raw.len(), 1);
        let article: Article = serde_json::from_value(raw[0].clone()).unwrap();
        assert_eq!(article.title, "New GPU announced");
        assert_eq!(
            article.source.as_ref().and_then(|s| s.name.as_deref()),
            Some("The Verge")
        );
    }

    #[test]
    fn test_api_error_body_deserialization() {
        let json = r#"{
            "status": "error",
            "code": "apiKeyInvalid",
            "message": "Your API key is invalid or incorrect."
        }"#;

        let resp: ApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.status, "error");
        assert!(resp.articles.is_none());
        assert_eq!(resp.code.as_deref(), Some("apiKeyInvalid"));
    }

    #[test]
    fn test_article_with_null_title_is_rejected() {
        let json = r#"{"title": null, "description": "x"}"#;
        assert!(serde_json::from_str::<Article>(json).is_err());
    }
}
