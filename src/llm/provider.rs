//! Provider trait for completion backends.

use async_trait::async_trait;

use super::error::LlmError;
use super::types::ChatCompletionRequest;

/// A backend that turns a chat completion request into answer text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name used in logs.
    fn name(&self) -> &str;

    /// Send one non-streaming completion request and return the first
    /// choice's message text, unmodified.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError`] for transport failures, non-success statuses,
    /// and responses without a usable first choice.
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<String, LlmError>;
}
