//! OpenAI chat completion client.
//!
//! Sends non-streaming requests to `{base_url}/v1/chat/completions` and
//! maps HTTP and decoding failures to [`LlmError`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use webqa::llm::{ChatCompletionRequest, ChatMessage, CompletionProvider, OpenAiClient, OpenAiConfig};
//!
//! # async fn example() -> Result<(), webqa::llm::LlmError> {
//! let client = OpenAiClient::new(OpenAiConfig::new("sk-..."))?;
//! let request = ChatCompletionRequest {
//!     model: "gpt-3.5-turbo".into(),
//!     messages: vec![ChatMessage::user("Hello")],
//!     max_tokens: Some(50),
//!     temperature: Some(0.7),
//! };
//! let text = client.complete(&request).await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;

use super::error::LlmError;
use super::provider::CompletionProvider;
use super::types::{ChatCompletionRequest, ChatCompletionResponse};

/// Default provider base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Default completion timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the OpenAI client.
#[derive(Clone)]
pub struct OpenAiConfig {
    /// API key for authentication.
    pub api_key: String,
    /// Base URL (defaults to `https://api.openai.com`).
    pub base_url: String,
    /// Timeout covering the whole request.
    pub timeout: Duration,
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl OpenAiConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// OpenAI-compatible chat completion client.
pub struct OpenAiClient {
    config: OpenAiConfig,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

impl OpenAiClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigError`] if the HTTP client cannot be built.
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::ConfigError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn map_http_error(status: reqwest::StatusCode, body: &str) -> LlmError {
        let message = extract_error_message(body);
        match status.as_u16() {
            401 | 403 => LlmError::AuthError(format!("OpenAI authentication failed: {message}")),
            _ => LlmError::ProviderError(format!("OpenAI HTTP {}: {message}", status.as_u16())),
        }
    }
}

/// Extract an error message from an OpenAI error response body.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &ChatCompletionRequest) -> Result<String, LlmError> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::TimeoutError(format!("OpenAI request timed out: {e}"))
                } else {
                    LlmError::RequestError(format!("OpenAI request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(Self::map_http_error(status, &body_text));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(format!("invalid completion body: {e}")))?;

        if let Some(usage) = &parsed.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "completion usage"
            );
        }

        parsed
            .first_content()
            .map(str::to_owned)
            .ok_or_else(|| LlmError::MalformedResponse("response contained no message content".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let client =
            OpenAiClient::new(OpenAiConfig::new("k").with_base_url("http://localhost:8080/"))
                .expect("client");
        assert_eq!(client.endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn map_401_to_auth_error() {
        let err = OpenAiClient::map_http_error(
            reqwest::StatusCode::UNAUTHORIZED,
            r#"{"error":{"message":"Incorrect API key provided"}}"#,
        );
        assert_eq!(err.code(), "AUTH_FAILED");
        assert!(err.message().contains("Incorrect API key provided"));
    }

    #[test]
    fn map_500_to_provider_error_with_raw_body() {
        let err = OpenAiClient::map_http_error(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            "upstream exploded",
        );
        assert_eq!(err.code(), "PROVIDER_ERROR");
        assert_eq!(err.message(), "OpenAI HTTP 500: upstream exploded");
    }

    #[test]
    fn debug_output_hides_key() {
        let config = OpenAiConfig::new("sk-very-secret");
        assert!(!format!("{config:?}").contains("sk-very-secret"));
        let client = OpenAiClient::new(config).expect("client");
        assert!(!format!("{client:?}").contains("sk-very-secret"));
    }
}
