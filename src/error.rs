//! Error types for the webqa service.

use crate::llm::LlmError;
use webqa_search::SearchError;

/// Top-level error type for the question-answering service.
#[derive(Debug, thiserror::Error)]
pub enum WebqaError {
    /// The search stage failed; the request cannot proceed.
    #[error("search error: {0}")]
    Search(#[from] SearchError),

    /// Completion client construction failed.
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// HTTP server error (bind, serve).
    #[error("server error: {0}")]
    Server(String),

    /// Invalid client request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, WebqaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_error_converts() {
        let err: WebqaError = SearchError::Upstream {
            status: 401,
            message: "Unauthorized".into(),
        }
        .into();
        assert!(matches!(err, WebqaError::Search(_)));
        assert_eq!(
            err.to_string(),
            "search error: search provider returned HTTP 401: Unauthorized"
        );
    }

    #[test]
    fn display_config() {
        let err = WebqaError::Config("limit must be greater than 0".into());
        assert_eq!(err.to_string(), "config error: limit must be greater than 0");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WebqaError>();
    }
}
