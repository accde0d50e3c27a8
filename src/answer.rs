//! Answer generation grounded in concatenated source text.
//!
//! Generation failures never reach the caller: they are logged and replaced
//! by [`FALLBACK_ANSWER`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::LlmConfig;
use crate::llm::{ChatCompletionRequest, ChatMessage, CompletionProvider};

/// System instruction sent with every completion request.
pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that provides accurate information based on the given content.";

/// Answer returned when the completion provider fails.
pub const FALLBACK_ANSWER: &str = "An error occurred while generating the answer.";

/// Turns grounding content and a query into a user-visible answer.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Produce an answer. Always returns non-empty text.
    async fn generate(&self, content: &str, query: &str) -> String;
}

/// Build the user turn: content embedded verbatim between delimiters,
/// followed by the literal query.
pub fn build_prompt(content: &str, query: &str) -> String {
    format!(
        "Based on the following content, answer the query in a concise and informative manner:\n\
         \n\
         --- Content Start ---\n\
         {content}\n\
         --- Content End ---\n\
         \n\
         Query: {query}"
    )
}

/// [`Generator`] backed by a chat completion provider.
pub struct CompletionGenerator {
    provider: Arc<dyn CompletionProvider>,
    model: String,
    max_tokens: u32,
    temperature: f64,
}

impl CompletionGenerator {
    /// Create a generator using the model and sampling settings in `config`.
    pub fn new(provider: Arc<dyn CompletionProvider>, config: &LlmConfig) -> Self {
        Self {
            provider,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    /// The exact request sent for `content` and `query`.
    pub fn build_request(&self, content: &str, query: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(build_prompt(content, query)),
            ],
            max_tokens: Some(self.max_tokens),
            temperature: Some(self.temperature),
        }
    }
}

#[async_trait]
impl Generator for CompletionGenerator {
    async fn generate(&self, content: &str, query: &str) -> String {
        let request = self.build_request(content, query);
        tracing::debug!(
            provider = self.provider.name(),
            model = %self.model,
            content_chars = content.len(),
            "requesting completion"
        );

        match self.provider.complete(&request).await {
            Ok(answer) if !answer.trim().is_empty() => answer,
            Ok(_) => {
                tracing::warn!(provider = self.provider.name(), "completion was empty");
                FALLBACK_ANSWER.to_owned()
            }
            Err(err) => {
                tracing::error!(
                    provider = self.provider.name(),
                    code = err.code(),
                    error = %err,
                    "completion failed"
                );
                FALLBACK_ANSWER.to_owned()
            }
        }
    }
}
