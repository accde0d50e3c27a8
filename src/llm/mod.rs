//! Completion provider client.
//!
//! Wraps an OpenAI-compatible chat completion endpoint behind the
//! [`CompletionProvider`] trait so the answer generator can be exercised
//! against test doubles.

pub mod error;
pub mod openai;
pub mod provider;
pub mod types;

pub use error::LlmError;
pub use openai::{OpenAiClient, OpenAiConfig};
pub use provider::CompletionProvider;
pub use types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
