//! NewsAPI access: request building, transport, and response checking.
//!
//! # Architecture
//!
//! - [`NewsTransport`]: Core trait performing one HTTP GET
//! - [`HttpTransport`]: `reqwest`-backed implementation used in production
//! - [`search_articles`]: Builds the URL, performs exactly one GET, and turns
//!   the response into a list of [`Article`]s or an error
//!
//! There is no retry and no timeout override; the caller abandons the future
//! to cancel.

use crate::config::NewsApiConfig;
use crate::error::{BotError, Result, UpstreamError};
use crate::models::{ApiResponse, Article, MAX_NEWS_ITEMS, STATUS_OK};
use crate::utils::{looks_truncated, truncate_for_log};
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Language sent as `language`.
pub const LANGUAGE: &str = "en";

/// Ordering sent as `sortBy`.
pub const SORT_BY: &str = "relevancy";

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for issuing the single outbound GET.
///
/// Implementors return [`BotError::Network`] for transport failures and an
/// [`HttpReply`] for anything the server actually answered, including non-2xx.
pub trait NewsTransport {
    async fn get(&self, url: &Url) -> Result<HttpReply>;
}

impl<T: NewsTransport> NewsTransport for &T {
    async fn get(&self, url: &Url) -> Result<HttpReply> {
        (**self).get(url).await
    }
}

/// [`NewsTransport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NewsTransport for HttpTransport {
    #[instrument(level = "debug", skip_all, fields(host = url.host_str().unwrap_or("")))]
    async fn get(&self, url: &Url) -> Result<HttpReply> {
        let t0 = Instant::now();
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| {
                // the URL carries the API key
                let e = e.without_url();
                warn!(elapsed_ms = t0.elapsed().as_millis() as u64, error = %e, "GET failed");
                BotError::Network(e)
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| BotError::Network(e.without_url()))?;

        debug!(
            status,
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "GET completed"
        );
        Ok(HttpReply { status, body })
    }
}

/// Build the search URL for `query`.
///
/// The query and key are percent-encoded component-wise (space becomes `%20`).
/// Any query string or fragment already on `endpoint` is discarded.
///
/// # Arguments
///
/// * `endpoint` - Base search URL, e.g. `https://newsapi.org/v2/everything`
/// * `query` - The user's free-text query, possibly empty
/// * `api_key` - The NewsAPI key sent as `apiKey`
///
/// # Returns
///
/// The full GET URL with `q`, `language`, `sortBy`, and `apiKey` set, or a
/// [`BotError::Configuration`] if the result does not parse.
pub fn build_request_url(endpoint: &Url, query: &str, api_key: &str) -> Result<Url> {
    let mut base = endpoint.clone();
    base.set_query(None);
    base.set_fragment(None);

    let raw = format!(
        "{}?q={}&language={}&sortBy={}&apiKey={}",
        base,
        urlencoding::encode(query),
        LANGUAGE,
        SORT_BY,
        urlencoding::encode(api_key)
    );
    Url::parse(&raw).map_err(|e| BotError::Configuration(format!("cannot build request URL: {e}")))
}

/// Turn an upstream reply into its article list.
///
/// Only the first [`MAX_NEWS_ITEMS`] entries are decoded; anything after them
/// is never inspected, so a malformed article further down the list does not
/// fail the call.
///
/// # Arguments
///
/// * `reply` - Status and body of the single GET
///
/// # Returns
///
/// At most [`MAX_NEWS_ITEMS`] articles in upstream order.
///
/// # Errors
///
/// Non-2xx, an undecodable envelope or selected article, a non-`ok` status,
/// and an `ok` response without `articles` are all [`UpstreamError`]s. No
/// partial results.
pub fn parse_response(reply: &HttpReply) -> Result<Vec<Article>> {
    if !reply.is_success() {
        let details = serde_json::from_str::<ApiResponse>(&reply.body).ok();
        let (code, message) = details.map(|d| (d.code, d.message)).unwrap_or_default();
        error!(
            status = reply.status,
            code = code.as_deref().unwrap_or(""),
            body_preview = %truncate_for_log(&reply.body, 300),
            "Upstream returned non-success HTTP status"
        );
        return Err(UpstreamError::HttpStatus {
            status: reply.status,
            code,
            message,
        }
        .into());
    }

    let decoded: ApiResponse = serde_json::from_str(&reply.body).map_err(|e| {
        let reason = if looks_truncated(&e) {
            format!("{e} (body looks truncated)")
        } else {
            e.to_string()
        };
        error!(
            error = %reason,
            body_preview = %truncate_for_log(&reply.body, 300),
            "Upstream body did not decode"
        );
        UpstreamError::Decode(reason)
    })?;

    if decoded.status != STATUS_OK {
        error!(
            status = %decoded.status,
            code = decoded.code.as_deref().unwrap_or(""),
            "Upstream reported failure"
        );
        return Err(UpstreamError::Status {
            status: decoded.status,
            code: decoded.code,
            message: decoded.message,
        }
        .into());
    }

    let raw = decoded.articles.ok_or(UpstreamError::MissingArticles)?;
    let upstream_count = raw.len();
    let articles = raw
        .into_iter()
        .take(MAX_NEWS_ITEMS)
        .enumerate()
        .map(|(i, value)| {
            serde_json::from_value::<Article>(value).map_err(|e| {
                error!(index = i, error = %e, "Upstream article did not decode");
                UpstreamError::Decode(format!("article {i}: {e}"))
            })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    debug!(
        upstream_count,
        selected = articles.len(),
        total_results = decoded.total_results,
        "Decoded upstream articles"
    );
    Ok(articles)
}

/// Search NewsAPI for `query` with exactly one GET.
///
/// A missing API key fails with [`BotError::Configuration`] before the
/// transport is touched.
///
/// # Arguments
///
/// * `transport` - Performs the GET
/// * `config` - API key and endpoint
/// * `query` - The user's free-text query
///
/// # Returns
///
/// Up to [`MAX_NEWS_ITEMS`] articles in upstream order, or the first error
/// from configuration, transport, or [`parse_response`].
#[instrument(level = "info", skip_all, fields(query = %query))]
pub async fn search_articles<T: NewsTransport>(
    transport: &T,
    config: &NewsApiConfig,
    query: &str,
) -> Result<Vec<Article>> {
    let api_key = config.require_api_key()?;
    let url = build_request_url(&config.endpoint, query, api_key)?;

    let t0 = Instant::now();
    let reply = transport.get(&url).await?;
    let articles = parse_response(&reply)?;

    info!(
        status = reply.status,
        count = articles.len(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "Fetched articles"
    );
    Ok(articles)
}
