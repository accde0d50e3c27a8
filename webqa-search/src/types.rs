//! Core types for search hits and the search provider's wire format.

use serde::{Deserialize, Serialize};

/// One search result record with a title and URL.
///
/// Hits are request-scoped values: produced by a searcher, consumed by
/// the concatenator, then dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// The title of the result page.
    pub title: String,
    /// The URL of the result page.
    pub link: String,
}

impl SearchHit {
    /// Create a new hit.
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }

    /// Both fields must be non-empty for a hit to be emitted.
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && !self.link.trim().is_empty()
    }
}

/// Top-level search provider response.
///
/// Only the organic results are modelled; knowledge-graph, search
/// parameters and other sections are ignored during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    /// Regular web results, in provider rank order.
    #[serde(default)]
    pub organic: Vec<OrganicResult>,
}

/// A single raw organic result as returned by the provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganicResult {
    /// Page title.
    #[serde(default)]
    pub title: Option<String>,
    /// Page URL.
    #[serde(default)]
    pub link: Option<String>,
    /// Snippet shown on the results page. Carried but unused downstream.
    #[serde(default)]
    pub snippet: Option<String>,
}

impl OrganicResult {
    /// Convert into a [`SearchHit`], or `None` when title or link is missing.
    pub fn into_hit(self) -> Option<SearchHit> {
        let hit = SearchHit::new(self.title?, self.link?);
        hit.is_valid().then_some(hit)
    }
}
