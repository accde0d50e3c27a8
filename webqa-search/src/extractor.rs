//! Page fetching plus text extraction, absorbing every per-page failure.
//!
//! One unreachable or broken source must not abort a batch, so
//! [`ContentExtractor::extract`] has no error channel: failures are logged
//! and the page contributes an empty string.

use async_trait::async_trait;
use url::Url;

use crate::config::SearchConfig;
use crate::content::extract_article_text;
use crate::error::SearchError;
use crate::http;

/// Fetches a URL and renders its meaningful text.
#[async_trait]
pub trait ContentExtractor: Send + Sync {
    /// Return the extracted text of the page at `url`, or an empty string
    /// if the page could not be fetched or yielded no text.
    async fn extract(&self, url: &str) -> String;
}

/// Reasons a single page produced no text.
#[derive(Debug, thiserror::Error)]
enum FetchFailure {
    #[error("unsupported URL: {0}")]
    InvalidUrl(String),
    #[error("request timed out")]
    Timeout,
    #[error("request failed: {0}")]
    Network(String),
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("body read failed: {0}")]
    Body(String),
}

/// [`ContentExtractor`] that downloads pages over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpExtractor {
    client: reqwest::Client,
}

impl HttpExtractor {
    /// Create an extractor using the page timeout and User-Agent in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` is invalid, or
    /// [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let client = http::build_client(config.page_timeout_seconds, config.user_agent.as_deref())?;
        Ok(Self { client })
    }

    async fn fetch(&self, url: &str) -> Result<String, FetchFailure> {
        let parsed = Url::parse(url).map_err(|e| FetchFailure::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchFailure::InvalidUrl(format!(
                "scheme {:?} is not fetched",
                parsed.scheme()
            )));
        }

        let response = self.client.get(parsed).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchFailure::Timeout
            } else {
                FetchFailure::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Status(status.as_u16()));
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchFailure::Timeout
            } else {
                FetchFailure::Body(e.to_string())
            }
        })
    }
}

#[async_trait]
impl ContentExtractor for HttpExtractor {
    async fn extract(&self, url: &str) -> String {
        match self.fetch(url).await {
            Ok(html) => {
                let text = extract_article_text(&html);
                tracing::debug!(url, bytes = html.len(), chars = text.len(), "page extracted");
                text
            }
            Err(err) => {
                tracing::warn!(url, error = %err, "could not fetch page");
                String::new()
            }
        }
    }
}
