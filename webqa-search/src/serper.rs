//! Serper search provider client.
//!
//! Sends `POST {endpoint}` with a JSON body `{"q": query}` and an
//! `X-API-KEY` header, then reads only the `organic` section of the reply.

use async_trait::async_trait;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::searcher::Searcher;
use crate::types::{OrganicResult, SearchHit, SearchResponse};

/// User-Agent sent to the search provider.
const CLIENT_USER_AGENT: &str = concat!("webqa/", env!("CARGO_PKG_VERSION"));

/// Longest provider error message carried into a [`SearchError::Upstream`].
const MAX_ERROR_MESSAGE_CHARS: usize = 200;

/// Search provider client backed by the Serper JSON API.
pub struct SerperSearcher {
    api_key: String,
    endpoint: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for SerperSearcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerperSearcher")
            .field("endpoint", &self.endpoint)
            .field("api_key_set", &!self.api_key.is_empty())
            .finish()
    }
}

impl SerperSearcher {
    /// Create a client for the endpoint and timeout in `config`.
    ///
    /// An empty `api_key` is accepted; the provider will reject the call
    /// and the rejection surfaces as [`SearchError::Upstream`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` is invalid, or
    /// [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>, config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let client = http::build_client(config.timeout_seconds, Some(CLIENT_USER_AGENT))?;
        Ok(Self {
            api_key: api_key.into(),
            endpoint: config.endpoint.clone(),
            client,
        })
    }
}

#[async_trait]
impl Searcher for SerperSearcher {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, SearchError> {
        tracing::debug!(query, limit, "search provider request");

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-API-KEY", &self.api_key)
            .json(&serde_json::json!({ "q": query }))
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("search request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "search provider rejected request");
            return Err(SearchError::Upstream {
                status: status.as_u16(),
                message: upstream_message(status, &body),
            });
        }

        let payload: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(format!("invalid search response: {e}")))?;

        let raw = payload.organic.len();
        let hits = select_hits(payload.organic, limit);
        tracing::debug!(raw, kept = hits.len(), "search provider returned results");
        Ok(hits)
    }
}

/// Keep the valid hits among the first `limit` raw organic entries.
///
/// The window is taken over raw entries before filtering, so fewer than
/// `limit` hits come back when an entry inside the window lacks a title
/// or link, even if valid entries exist further down the list.
pub fn select_hits(organic: Vec<OrganicResult>, limit: usize) -> Vec<SearchHit> {
    organic
        .into_iter()
        .take(limit)
        .filter_map(OrganicResult::into_hit)
        .collect()
}

/// Pull a short human-readable message out of a provider error body.
fn upstream_message(status: reqwest::StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from));

    let message = match from_json {
        Some(m) => m,
        None => body.trim().to_owned(),
    };

    if message.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_owned();
    }
    message.chars().take(MAX_ERROR_MESSAGE_CHARS).collect()
}
