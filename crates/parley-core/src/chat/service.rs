//! Chat service running the full turn pipeline.
//!
//! router -> memory (replay) -> prompt assembler -> model -> memory (append
//! human turn, then assistant turn). The first error stops the turn and is
//! returned unchanged; nothing is retried.

use std::time::Instant;

use parley_types::chat::{ChatTurn, ConversationKey, Transcript, TurnRole};
use parley_types::error::StoreError;
use parley_types::llm::{LlmError, Usage};
use thiserror::Error;
use tracing::{Instrument, info, info_span, instrument};

use crate::llm::provider::LlmProvider;

use super::prompt::PromptAssembler;
use super::router::SessionRouter;
use super::store::MessageStore;

/// Errors surfaced by a chat turn.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("model call failed: {0}")]
    Model(#[from] LlmError),
}

/// Result of one completed turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub reply: String,
    /// The whole conversation after the turn, both new turns included.
    pub turns: Vec<ChatTurn>,
    pub usage: Usage,
}

/// Orchestrates conversation replay, prompt assembly and the model call.
///
/// Generic over the store and the model invoker so parley-core never depends
/// on parley-infra.
pub struct ChatService<S: MessageStore, P: LlmProvider> {
    router: SessionRouter<S>,
    assembler: PromptAssembler,
    provider: P,
}

impl<S: MessageStore, P: LlmProvider> ChatService<S, P> {
    pub fn new(router: SessionRouter<S>, assembler: PromptAssembler, provider: P) -> Self {
        Self {
            router,
            assembler,
            provider,
        }
    }

    pub fn assembler(&self) -> &PromptAssembler {
        &self.assembler
    }

    /// Run one turn and return the assistant's reply.
    pub async fn handle_turn(
        &self,
        user_id: &str,
        conversation_id: &str,
        query: &str,
    ) -> Result<String, ChatError> {
        let outcome = self
            .run_turn(ConversationKey::new(user_id, conversation_id), query)
            .await?;
        Ok(outcome.reply)
    }

    /// Run one turn on the user's default conversation and render the
    /// resulting transcript.
    pub async fn chat(&self, user_id: &str, query: &str) -> Result<Transcript, ChatError> {
        let key = ConversationKey::default_for(user_id);
        let outcome = self.run_turn(key.clone(), query).await?;
        Ok(Transcript::from_turns(&key, &outcome.turns))
    }

    /// Run one turn and keep everything the pipeline produced.
    ///
    /// Both turns are appended only after the model replied. If the process
    /// dies between the reply and the appends, the human turn is lost.
    #[instrument(skip_all, fields(conversation = %key))]
    pub async fn run_turn(&self, key: ConversationKey, query: &str) -> Result<TurnOutcome, ChatError> {
        let mut memory = self.router.route(key).await?;

        let request = self.assembler.build_request(memory.all_messages(), query);
        let started = Instant::now();
        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
        );
        let response = self.provider.complete(&request).instrument(span).await?;

        memory.add_message(TurnRole::Human, query).await?;
        memory
            .add_message(TurnRole::Assistant, response.content.clone())
            .await?;

        info!(
            provider = self.provider.name(),
            model = %response.model,
            history = request.messages.len() - 2,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            response_ms = started.elapsed().as_millis() as u64,
            "Turn completed"
        );

        Ok(TurnOutcome {
            reply: response.content,
            turns: memory.into_messages(),
            usage: response.usage,
        })
    }

    /// Replay a conversation for display.
    pub async fn transcript(&self, key: ConversationKey) -> Result<Transcript, ChatError> {
        Ok(self.router.transcript(key).await?)
    }

    /// Delete every stored turn of a conversation.
    pub async fn clear(&self, key: ConversationKey) -> Result<(), ChatError> {
        Ok(self.router.clear(key).await?)
    }

    /// Count stored turns across all conversations.
    pub async fn count_turns(&self) -> Result<u64, ChatError> {
        Ok(self.router.store().count_turns().await?)
    }
}
