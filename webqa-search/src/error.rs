//! Error types for the webqa-search crate.
//!
//! Only the searcher returns these to callers. Page fetch failures are
//! absorbed inside the extractor and never surface as a [`SearchError`].
//! No API keys appear in error messages.

/// Errors that can occur while querying the search provider.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The search provider answered with a non-success HTTP status.
    #[error("search provider returned HTTP {status}: {message}")]
    Upstream {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Provider error body, or the canonical reason phrase when empty.
        message: String,
    },

    /// The HTTP request to the provider could not be completed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The provider response could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Returns true when the failure originated on the provider side
    /// (bad status, unreachable, or an undecodable body).
    pub fn is_upstream(&self) -> bool {
        !matches!(self, Self::Config(_))
    }
}

/// Convenience type alias for webqa-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
