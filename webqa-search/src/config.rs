//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls the provider endpoint, how many hits are kept,
//! and the timeouts for the provider call and for each page fetch. It is
//! deserializable so the host application can embed it as a TOML section.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Default search provider endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://google.serper.dev/search";

/// Default number of raw organic results considered per query.
pub const DEFAULT_LIMIT: usize = 2;

/// Default page fetch timeout in seconds.
pub const DEFAULT_PAGE_TIMEOUT_SECS: u64 = 10;

/// Configuration for the searcher and the page extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Search provider URL that receives the `{"q": ...}` POST.
    pub endpoint: String,
    /// Number of raw organic entries scanned per query.
    pub limit: usize,
    /// Timeout for the search provider call in seconds.
    pub timeout_seconds: u64,
    /// Timeout for each page fetch in seconds.
    pub page_timeout_seconds: u64,
    /// Custom User-Agent for page fetches. If `None`, rotates through a
    /// built-in list of browser User-Agents.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            limit: DEFAULT_LIMIT,
            timeout_seconds: DEFAULT_PAGE_TIMEOUT_SECS,
            page_timeout_seconds: DEFAULT_PAGE_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `endpoint` must be an absolute `http`/`https` URL
    /// - `limit` must be greater than 0
    /// - both timeouts must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        match url::Url::parse(&self.endpoint) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            _ => {
                return Err(SearchError::Config(format!(
                    "endpoint must be an http(s) URL, got {:?}",
                    self.endpoint
                )));
            }
        }
        if self.limit == 0 {
            return Err(SearchError::Config("limit must be greater than 0".into()));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.page_timeout_seconds == 0 {
            return Err(SearchError::Config(
                "page_timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
