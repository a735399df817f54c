//! LLM request/response types for Parley.
//!
//! These types model the data shapes for a single, non-streaming completion
//! call: the assembled prompt, the reply, usage tracking, and error handling.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::chat::TurnRole;

/// Role of a message in an LLM conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl From<TurnRole> for MessageRole {
    fn from(role: TurnRole) -> Self {
        match role {
            TurnRole::Human => MessageRole::User,
            TurnRole::Assistant => MessageRole::Assistant,
        }
    }
}

/// A single message in an LLM conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Request to an LLM provider for a completion.
///
/// `messages` is the fully assembled prompt: the system instruction first,
/// then replayed history, then the new user query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// Response from an LLM provider for a completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub content: String,
    pub model: String,
    pub stop_reason: StopReason,
    pub usage: Usage,
}

/// Reason why the LLM stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    ContentFilter,
}

/// Token usage for a completion request/response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Errors from LLM provider operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("rate limited")]
    RateLimited,

    #[error("provider overloaded: {0}")]
    Overloaded(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("context length exceeded")]
    ContextLengthExceeded,

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Capabilities of an LLM provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderCapabilities {
    pub max_context_tokens: u32,
    pub max_output_tokens: u32,
}

/// Type of LLM provider backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderType {
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "openai_compatible")]
    OpenAiCompatible,
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderType::Gemini => write!(f, "gemini"),
            ProviderType::OpenAi => write!(f, "openai"),
            ProviderType::OpenAiCompatible => write!(f, "openai_compatible"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_role_maps_to_message_role() {
        assert_eq!(MessageRole::from(TurnRole::Human), MessageRole::User);
        assert_eq!(MessageRole::from(TurnRole::Assistant), MessageRole::Assistant);
    }

    #[test]
    fn test_provider_type_config_values() {
        let parsed: ProviderType = serde_json::from_str("\"openai_compatible\"").unwrap();
        assert_eq!(parsed, ProviderType::OpenAiCompatible);
        assert_eq!(serde_json::to_string(&ProviderType::OpenAi).unwrap(), "\"openai\"");
        assert_eq!(ProviderType::Gemini.to_string(), "gemini");
        assert!(serde_json::from_str::<ProviderType>("\"google\"").is_err());
    }

    #[test]
    fn test_completion_request_skips_missing_temperature() {
        let req = CompletionRequest {
            model: "gemini-2.0-flash".to_string(),
            messages: vec![Message::new(MessageRole::User, "hi")],
            max_tokens: 1024,
            temperature: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("temperature"));
        assert!(json.contains("\"role\":\"user\""));
    }

    #[test]
    fn test_llm_error_display() {
        assert_eq!(LlmError::AuthenticationFailed.to_string(), "authentication failed");
        let err = LlmError::Provider {
            message: "quota exhausted".to_string(),
        };
        assert_eq!(err.to_string(), "provider error: quota exhausted");
    }
}
