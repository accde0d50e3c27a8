//! The request handler: search, then concatenate, then generate.
//!
//! Stages run strictly one after another inside a request. Only the search
//! stage can fail the request; extraction and generation absorb their own
//! failures.

use std::sync::Arc;
use std::time::Instant;

use tracing::Instrument;
use uuid::Uuid;
use webqa_search::{
    ContentExtractor, DEFAULT_LIMIT, HttpExtractor, Searcher, SerperSearcher, concatenate,
};

use crate::answer::{CompletionGenerator, Generator};
use crate::config::{Secrets, WebqaConfig};
use crate::error::Result;
use crate::llm::{OpenAiClient, OpenAiConfig};

/// Sequences the three stages for one query.
#[derive(Clone)]
pub struct QueryPipeline {
    searcher: Arc<dyn Searcher>,
    extractor: Arc<dyn ContentExtractor>,
    generator: Arc<dyn Generator>,
    limit: usize,
}

impl QueryPipeline {
    /// Assemble a pipeline from explicit collaborators.
    pub fn new(
        searcher: Arc<dyn Searcher>,
        extractor: Arc<dyn ContentExtractor>,
        generator: Arc<dyn Generator>,
    ) -> Self {
        Self {
            searcher,
            extractor,
            generator,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Override how many raw search results are considered.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Build the production pipeline: Serper search, HTTP page extraction,
    /// and OpenAI-backed generation.
    ///
    /// Missing API keys do not fail construction; the providers will
    /// reject the calls at request time.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or an HTTP client cannot
    /// be built.
    pub fn from_config(config: &WebqaConfig, secrets: &Secrets) -> Result<Self> {
        config.validate()?;

        let searcher = SerperSearcher::new(
            secrets.search_api_key.clone().unwrap_or_default(),
            &config.search,
        )?;
        let extractor = HttpExtractor::new(&config.search)?;

        let llm_config = OpenAiConfig::new(secrets.llm_api_key.clone().unwrap_or_default())
            .with_base_url(config.llm.base_url.clone())
            .with_timeout(std::time::Duration::from_secs(config.llm.timeout_seconds));
        let provider = OpenAiClient::new(llm_config)?;
        let generator = CompletionGenerator::new(Arc::new(provider), &config.llm);

        Ok(Self::new(Arc::new(searcher), Arc::new(extractor), Arc::new(generator))
            .with_limit(config.search.limit))
    }

    /// Answer one query.
    ///
    /// # Errors
    ///
    /// Returns [`crate::WebqaError::Search`] when the search stage fails.
    /// No other stage produces an error.
    pub async fn handle(&self, query: &str) -> Result<String> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("query", %request_id);
        self.run(query).instrument(span).await
    }

    async fn run(&self, query: &str) -> Result<String> {
        let started = Instant::now();
        tracing::info!(query, "received query");

        let hits = self.searcher.search(query, self.limit).await.map_err(|e| {
            tracing::error!(error = %e, "search failed");
            e
        })?;
        tracing::info!(hits = hits.len(), "search complete");

        let content = concatenate(&hits, self.extractor.as_ref()).await;
        tracing::info!(chars = content.len(), "content concatenated");

        let answer = self.generator.generate(&content, query).await;
        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "answer generated"
        );
        Ok(answer)
    }
}
