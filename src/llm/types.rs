//! OpenAI-compatible chat completion wire types.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// OpenAI-compatible chat completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Model ID to use for completion.
    pub model: String,
    /// Conversation messages.
    pub messages: Vec<ChatMessage>,
    /// Maximum number of tokens to generate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0–2.0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// A single message in a chat conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the message author (`system`, `user`, `assistant`).
    pub role: String,
    /// The content of the message.
    pub content: String,
}

impl ChatMessage {
    /// A `system` instruction.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_owned(),
            content: content.into(),
        }
    }

    /// A `user` turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_owned(),
            content: content.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// OpenAI-compatible chat completion response.
///
/// Only `choices` is required; providers differ in which metadata they send.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    /// Unique identifier for the completion.
    #[serde(default)]
    pub id: Option<String>,
    /// Model used for the completion.
    #[serde(default)]
    pub model: Option<String>,
    /// List of completion choices.
    pub choices: Vec<Choice>,
    /// Token usage statistics.
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if the provider sent one.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }
}

/// A single completion choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    /// Index of this choice in the list.
    #[serde(default)]
    pub index: u32,
    /// The generated message.
    pub message: AssistantMessage,
    /// Reason the model stopped generating (`stop`, `length`, etc.).
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The assistant message inside a [`Choice`]. `content` is null for
/// refusals and tool-call-only replies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantMessage {
    /// The role, normally `assistant`.
    #[serde(default)]
    pub role: Option<String>,
    /// The generated text.
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage statistics for a completion. Missing counts read as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Usage {
    /// Number of tokens in the prompt.
    pub prompt_tokens: u32,
    /// Number of tokens in the completion.
    pub completion_tokens: u32,
    /// Total tokens (prompt + completion).
    pub total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_omits_unset_options() {
        let request = ChatCompletionRequest {
            model: "gpt-3.5-turbo".into(),
            messages: vec![ChatMessage::user("hi")],
            max_tokens: None,
            temperature: None,
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert!(json.get("max_tokens").is_none());
        assert!(json.get("temperature").is_none());
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn parse_full_openai_response() {
        let body = r#"{
            "id": "chatcmpl-B9MBs8CjcvOU2jLn4n570S5qMJKcT",
            "object": "chat.completion",
            "created": 1741569952,
            "model": "gpt-4.1-2025-04-14",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Hello! How can I assist you today?", "refusal": null, "annotations": []},
                "logprobs": null,
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 19, "completion_tokens": 10, "total_tokens": 29},
            "service_tier": "default"
        }"#;
        let response: ChatCompletionResponse = serde_json::from_str(body).expect("deserialize");
        assert_eq!(
            response.first_content(),
            Some("Hello! How can I assist you today?")
        );
        assert_eq!(response.usage.map(|u| u.total_tokens), Some(29));
    }

    #[test]
    fn null_content_has_no_text() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        let response: ChatCompletionResponse = serde_json::from_str(body).expect("deserialize");
        assert!(response.first_content().is_none());
    }

    #[test]
    fn empty_choices_has_no_text() {
        let response: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices": []}"#).expect("deserialize");
        assert!(response.first_content().is_none());
    }

    #[test]
    fn partial_usage_still_parses() {
        let body = r#"{
            "choices": [{"message": {"content": "Paris."}}],
            "usage": {"prompt_tokens": 5, "completion_tokens": 2}
        }"#;
        let response: ChatCompletionResponse = serde_json::from_str(body).expect("deserialize");
        assert_eq!(response.first_content(), Some("Paris."));
        let usage = response.usage.expect("usage");
        assert_eq!(usage.prompt_tokens, 5);
        assert_eq!(usage.total_tokens, 0);
    }
}
