//! Hand-written doubles shared by the unit tests in this crate.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use parley_types::chat::ChatTurn;
use parley_types::error::StoreError;
use parley_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities, StopReason, Usage,
};

use crate::chat::store::MessageStore;
use crate::llm::provider::LlmProvider;

const UNLIMITED_WRITES: usize = usize::MAX;

/// In-memory `MessageStore` whose reads and writes can be switched to fail.
pub struct InMemoryStore {
    rows: Mutex<Vec<ChatTurn>>,
    fail_reads: AtomicBool,
    /// Writes still allowed before every further write fails.
    writes_left: AtomicUsize,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            fail_reads: AtomicBool::new(false),
            writes_left: AtomicUsize::new(UNLIMITED_WRITES),
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        let left = if fail { 0 } else { UNLIMITED_WRITES };
        self.writes_left.store(left, Ordering::SeqCst);
    }

    /// Let `n` writes succeed, then fail every write after them.
    pub fn fail_writes_after(&self, n: usize) {
        self.writes_left.store(n, Ordering::SeqCst);
    }

    fn take_write(&self) -> Result<(), StoreError> {
        self.writes_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| match left {
                0 => None,
                UNLIMITED_WRITES => Some(UNLIMITED_WRITES),
                n => Some(n - 1),
            })
            .map(|_| ())
            .map_err(|_| StoreError::WriteFailed("connection reset".to_string()))
    }

    /// Every stored row, across all partitions, in insertion order.
    pub fn rows(&self) -> Vec<ChatTurn> {
        self.rows.lock().unwrap().clone()
    }
}

impl MessageStore for InMemoryStore {
    async fn append(&self, turn: &ChatTurn) -> Result<(), StoreError> {
        self.take_write()?;
        self.rows.lock().unwrap().push(turn.clone());
        Ok(())
    }

    async fn list(&self, user_id: &str, conversation_id: &str) -> Result<Vec<ChatTurn>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::ReadFailed("connection reset".to_string()));
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id && t.conversation_id == conversation_id)
            .cloned()
            .collect())
    }

    async fn clear(&self, user_id: &str, conversation_id: &str) -> Result<(), StoreError> {
        self.take_write()?;
        self.rows
            .lock()
            .unwrap()
            .retain(|t| !(t.user_id == user_id && t.conversation_id == conversation_id));
        Ok(())
    }

    async fn count_turns(&self) -> Result<u64, StoreError> {
        Ok(self.rows.lock().unwrap().len() as u64)
    }
}

#[derive(Clone)]
enum Script {
    Reply(String),
    Fail,
}

/// `LlmProvider` that answers every request with a fixed script and keeps
/// the requests it saw.
pub struct ScriptedProvider {
    script: Script,
    capabilities: ProviderCapabilities,
    seen: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl ScriptedProvider {
    pub fn replying(reply: &str) -> Self {
        Self {
            script: Script::Reply(reply.to_string()),
            capabilities: ProviderCapabilities {
                max_context_tokens: 32_000,
                max_output_tokens: 1_024,
            },
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            script: Script::Fail,
            ..Self::replying("")
        }
    }

    /// Handle to the recorded requests, usable after the provider is moved
    /// into a service.
    pub fn requests(&self) -> Arc<Mutex<Vec<CompletionRequest>>> {
        Arc::clone(&self.seen)
    }
}

impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.seen.lock().unwrap().push(request.clone());
        match &self.script {
            Script::Reply(text) => Ok(CompletionResponse {
                id: "resp-1".to_string(),
                content: text.clone(),
                model: request.model.clone(),
                stop_reason: StopReason::EndTurn,
                usage: Usage {
                    input_tokens: 12,
                    output_tokens: 3,
                },
            }),
            Script::Fail => Err(LlmError::Provider {
                message: "quota exceeded".to_string(),
            }),
        }
    }
}
