//! Error types for the completion client.
//!
//! Each error variant carries a stable error code (SCREAMING_SNAKE_CASE)
//! that is included in the Display output and accessible via [`LlmError::code()`].

/// Stable error codes for programmatic error handling.
pub mod error_codes {
    /// Invalid or missing configuration.
    pub const CONFIG_INVALID: &str = "CONFIG_INVALID";

    /// Authentication failed (invalid/missing API key).
    pub const AUTH_FAILED: &str = "AUTH_FAILED";

    /// Request to the provider could not be completed.
    pub const REQUEST_FAILED: &str = "REQUEST_FAILED";

    /// Request timed out.
    pub const TIMEOUT_ERROR: &str = "TIMEOUT_ERROR";

    /// Provider answered with a non-success status.
    pub const PROVIDER_ERROR: &str = "PROVIDER_ERROR";

    /// Provider answered, but not with a usable completion.
    pub const MALFORMED_RESPONSE: &str = "MALFORMED_RESPONSE";
}

/// Errors produced by the completion client.
///
/// The Display impl formats as `[CODE] message`.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Invalid or missing configuration.
    #[error("[{}] {}", error_codes::CONFIG_INVALID, .0)]
    ConfigError(String),

    /// Authentication failed (invalid/missing API key).
    #[error("[{}] {}", error_codes::AUTH_FAILED, .0)]
    AuthError(String),

    /// Request to the provider could not be completed.
    #[error("[{}] {}", error_codes::REQUEST_FAILED, .0)]
    RequestError(String),

    /// Request timed out.
    #[error("[{}] {}", error_codes::TIMEOUT_ERROR, .0)]
    TimeoutError(String),

    /// Provider answered with a non-success status.
    #[error("[{}] {}", error_codes::PROVIDER_ERROR, .0)]
    ProviderError(String),

    /// Provider answered, but not with a usable completion.
    #[error("[{}] {}", error_codes::MALFORMED_RESPONSE, .0)]
    MalformedResponse(String),
}

impl LlmError {
    /// Returns the stable error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError(_) => error_codes::CONFIG_INVALID,
            Self::AuthError(_) => error_codes::AUTH_FAILED,
            Self::RequestError(_) => error_codes::REQUEST_FAILED,
            Self::TimeoutError(_) => error_codes::TIMEOUT_ERROR,
            Self::ProviderError(_) => error_codes::PROVIDER_ERROR,
            Self::MalformedResponse(_) => error_codes::MALFORMED_RESPONSE,
        }
    }

    /// Returns the inner message without the code prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::ConfigError(m)
            | Self::AuthError(m)
            | Self::RequestError(m)
            | Self::TimeoutError(m)
            | Self::ProviderError(m)
            | Self::MalformedResponse(m) => m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_variants() {
        assert_eq!(LlmError::ConfigError("x".into()).code(), "CONFIG_INVALID");
        assert_eq!(LlmError::AuthError("x".into()).code(), "AUTH_FAILED");
        assert_eq!(LlmError::RequestError("x".into()).code(), "REQUEST_FAILED");
        assert_eq!(LlmError::TimeoutError("x".into()).code(), "TIMEOUT_ERROR");
        assert_eq!(LlmError::ProviderError("x".into()).code(), "PROVIDER_ERROR");
        assert_eq!(
            LlmError::MalformedResponse("x".into()).code(),
            "MALFORMED_RESPONSE"
        );
    }

    #[test]
    fn display_includes_code_prefix() {
        let err = LlmError::AuthError("invalid key".into());
        assert_eq!(err.to_string(), "[AUTH_FAILED] invalid key");
        assert_eq!(err.message(), "invalid key");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LlmError>();
    }
}
