//! # webqa-search
//!
//! Retrieval half of the webqa pipeline: ask a search provider for the top
//! results of a query, download each result page, and turn the pages into
//! one labelled block of grounding text.
//!
//! ## Design
//!
//! - [`Searcher`] wraps the search provider; [`SerperSearcher`] is the
//!   production client
//! - [`ContentExtractor`] fetches a page and keeps its headings and
//!   paragraphs; [`HttpExtractor`] is the production implementation
//! - [`concatenate`] walks hits in rank order and labels each source
//!
//! Both seams are traits so callers can substitute test doubles.
//!
//! ## Failure model
//!
//! - Search provider failures are returned as [`SearchError`]
//! - Page failures are logged and degrade to an empty contribution
//! - API keys never appear in logs or error messages

pub mod concat;
pub mod config;
pub mod content;
pub mod error;
pub mod extractor;
pub mod http;
pub mod searcher;
pub mod serper;
pub mod types;

pub use concat::concatenate;
pub use config::{SearchConfig, DEFAULT_LIMIT};
pub use content::extract_article_text;
pub use error::{Result, SearchError};
pub use extractor::{ContentExtractor, HttpExtractor};
pub use searcher::Searcher;
pub use serper::SerperSearcher;
pub use types::SearchHit;

