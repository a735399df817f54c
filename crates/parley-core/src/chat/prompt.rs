//! Prompt assembly for a single chat turn.
//!
//! The prompt layout is fixed:
//!
//! ```text
//! [system instruction]
//! [history turn 1] ... [history turn n]   (stored order)
//! [new user query]
//! ```
//!
//! Nothing is truncated or summarised. An over-long prompt is the model
//! endpoint's problem to reject.

use parley_types::chat::ChatTurn;
use parley_types::config::{DEFAULT_SYSTEM_PROMPT, ModelSettings, PromptSettings};
use parley_types::llm::{CompletionRequest, Message, MessageRole};

/// Builds model-ready requests from replayed history and a new query.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    system: String,
    model: String,
    max_tokens: u32,
    temperature: Option<f64>,
}

impl PromptAssembler {
    /// Create an assembler for `model` with the default system instruction.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            system: DEFAULT_SYSTEM_PROMPT.to_string(),
            model: model.into(),
            max_tokens: ModelSettings::default().max_tokens,
            temperature: None,
        }
    }

    /// Create an assembler from file settings and a resolved model id.
    pub fn from_settings(model: &str, settings: &ModelSettings, prompt: &PromptSettings) -> Self {
        Self {
            system: prompt.system.clone(),
            model: model.to_string(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = system.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn system(&self) -> &str {
        &self.system
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ordered message list: system, history, then the query as a user turn.
    pub fn assemble(&self, history: &[ChatTurn], query: &str) -> Vec<Message> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Message::new(MessageRole::System, self.system.clone()));
        messages.extend(
            history
                .iter()
                .map(|turn| Message::new(turn.role.into(), turn.content.clone())),
        );
        messages.push(Message::new(MessageRole::User, query));
        messages
    }

    /// Wrap [`Self::assemble`] into a completion request.
    pub fn build_request(&self, history: &[ChatTurn], query: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages: self.assemble(history, query),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}
