//! Trait definition for pluggable search backends.
//!
//! The pipeline only depends on [`Searcher`], so the real provider client
//! can be swapped for a canned implementation in tests.

use async_trait::async_trait;

use crate::error::SearchError;
use crate::types::SearchHit;

/// A search backend that turns a free-text query into ranked hits.
///
/// Implementations must return at most `limit` hits, each with a
/// non-empty title and link, in provider rank order.
#[async_trait]
pub trait Searcher: Send + Sync {
    /// Perform one search.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] when the provider cannot be reached, answers
    /// with a non-success status, or sends a body that cannot be decoded.
    /// These errors are not retried.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, SearchError>;
}
