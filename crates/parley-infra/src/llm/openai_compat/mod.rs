//! Model invoker for any endpoint speaking the OpenAI chat completions
//! protocol: Google Gemini (the default), OpenAI, and self-hosted gateways.
//!
//! Uses [`async_openai`] for the wire types and HTTP client.

pub mod endpoint;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::error::{ApiError, OpenAIError};
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
    CreateChatCompletionResponse, FinishReason,
};
use secrecy::ExposeSecret;

use parley_core::llm::provider::LlmProvider;
use parley_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, Message, MessageRole, ProviderCapabilities,
    StopReason, Usage,
};

use self::endpoint::EndpointProfile;
use crate::config::ModelCredentials;

/// Chat completions client bound to one endpoint and one model.
///
/// Does NOT derive Debug; the client holds the API key.
pub struct OpenAiCompatibleProvider {
    client: Client<OpenAIConfig>,
    profile: EndpointProfile,
    model: String,
}

impl OpenAiCompatibleProvider {
    /// Build the invoker from resolved credentials. A configured base URL
    /// overrides the provider's default endpoint.
    pub fn from_credentials(creds: &ModelCredentials) -> Self {
        let profile = EndpointProfile::resolve(creds.provider, creds.base_url.as_deref());
        let config = OpenAIConfig::new()
            .with_api_key(creds.api_key.expose_secret())
            .with_api_base(&profile.base_url);

        Self {
            client: Client::with_config(config),
            profile,
            model: creds.model.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.profile.base_url
    }

    fn wire_request(&self, request: &CompletionRequest) -> CreateChatCompletionRequest {
        let model = match request.model.as_str() {
            "" => self.model.clone(),
            model => model.to_string(),
        };

        CreateChatCompletionRequest {
            model,
            messages: request.messages.iter().map(wire_message).collect(),
            max_completion_tokens: Some(request.max_tokens),
            temperature: request.temperature.map(|t| t as f32),
            ..Default::default()
        }
    }
}

fn wire_message(msg: &Message) -> ChatCompletionRequestMessage {
    let text = msg.content.clone();
    match msg.role {
        MessageRole::System => {
            ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                content: ChatCompletionRequestSystemMessageContent::Text(text),
                name: None,
            })
        }
        MessageRole::User => ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
            content: ChatCompletionRequestUserMessageContent::Text(text),
            name: None,
        }),
        #[allow(deprecated)]
        MessageRole::Assistant => {
            ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                content: Some(ChatCompletionRequestAssistantMessageContent::Text(text)),
                refusal: None,
                name: None,
                audio: None,
                tool_calls: None,
                function_call: None,
            })
        }
    }
}

/// Take the first choice of a chat completions response as the reply.
fn read_reply(response: CreateChatCompletionResponse) -> Result<CompletionResponse, LlmError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::Deserialization("response contained no choices".to_string()))?;

    let stop_reason = match choice.finish_reason {
        Some(FinishReason::Length) => StopReason::MaxTokens,
        Some(FinishReason::ContentFilter) => StopReason::ContentFilter,
        _ => StopReason::EndTurn,
    };

    let usage = response.usage.map_or_else(Usage::default, |u| Usage {
        input_tokens: u.prompt_tokens,
        output_tokens: u.completion_tokens,
    });

    Ok(CompletionResponse {
        id: response.id,
        content: choice.message.content.unwrap_or_default(),
        model: response.model,
        stop_reason,
        usage,
    })
}

impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.profile.name
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &self.profile.capabilities
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let response = self
            .client
            .chat()
            .create(self.wire_request(request))
            .await
            .map_err(map_openai_error)?;
        read_reply(response)
    }
}

fn map_openai_error(err: OpenAIError) -> LlmError {
    match &err {
        OpenAIError::ApiError(api_err) => map_api_error(api_err),
        OpenAIError::Reqwest(http_err) => match http_err.status() {
            Some(status) => map_http_status(status.as_u16(), err.to_string()),
            None => LlmError::Provider {
                message: err.to_string(),
            },
        },
        OpenAIError::JSONDeserialize(_, content) => {
            LlmError::Deserialization(format!("failed to parse response: {content}"))
        }
        OpenAIError::InvalidArgument(msg) => LlmError::InvalidRequest(msg.clone()),
        _ => LlmError::Provider {
            message: err.to_string(),
        },
    }
}

/// Classify an error body. OpenAI reports `code`/`type`; Gemini's compatible
/// endpoint mostly reports Google status names inside `message`.
fn map_api_error(api_err: &ApiError) -> LlmError {
    let code = api_err.code.as_deref().unwrap_or_default();
    let kind = api_err.r#type.as_deref().unwrap_or_default();
    let message = api_err.message.as_str();
    let mentions = |needles: &[&str]| needles.iter().any(|n| message.contains(n));

    if code == "authentication_error"
        || kind == "authentication_error"
        || mentions(&["Incorrect API key", "API key not valid"])
    {
        LlmError::AuthenticationFailed
    } else if code == "rate_limit_exceeded"
        || kind == "rate_limit_error"
        || mentions(&["RESOURCE_EXHAUSTED"])
    {
        LlmError::RateLimited
    } else if code == "context_length_exceeded" || mentions(&["maximum context length"]) {
        LlmError::ContextLengthExceeded
    } else if code == "server_error" || kind == "overloaded_error" || mentions(&["UNAVAILABLE"]) {
        LlmError::Overloaded(message.to_string())
    } else {
        LlmError::Provider {
            message: message.to_string(),
        }
    }
}

fn map_http_status(status: u16, detail: String) -> LlmError {
    match status {
        401 | 403 => LlmError::AuthenticationFailed,
        429 => LlmError::RateLimited,
        503 | 529 => LlmError::Overloaded(detail),
        _ => LlmError::Provider { message: detail },
    }
}
