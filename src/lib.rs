//! webqa: answers natural-language questions from live web sources.
//!
//! A query flows through a strictly linear pipeline:
//! Search provider → page fetch + extraction → concatenation → LLM answer
//!
//! # Architecture
//!
//! - **Search and extraction** live in the `webqa-search` crate
//! - **Completion client**: OpenAI-compatible chat completions ([`llm`])
//! - **Answer generation**: grounding prompt plus fallback handling ([`answer`])
//! - **Request handler**: sequences the stages for one query ([`pipeline`])
//! - **HTTP surface**: `POST /query` via `axum` ([`server`])
//!
//! Every collaborator is injected as a trait object, so each stage can be
//! replaced by a test double.

pub mod answer;
pub mod config;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod server;

pub use answer::{CompletionGenerator, FALLBACK_ANSWER, Generator};
pub use config::{Secrets, WebqaConfig};
pub use error::{Result, WebqaError};
pub use pipeline::QueryPipeline;
pub use server::QueryServer;
