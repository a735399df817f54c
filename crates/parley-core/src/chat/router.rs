//! Session router: maps a conversation key to its memory adapter.

use std::sync::Arc;

use parley_types::chat::{ConversationKey, Transcript};
use parley_types::error::StoreError;
use tracing::info;

use super::memory::ConversationMemory;
use super::store::MessageStore;

/// Hands out `ConversationMemory` instances over one shared store handle.
///
/// There is no adapter cache: every call builds a fresh adapter, which
/// replays the full history from the store.
pub struct SessionRouter<S: MessageStore> {
    store: Arc<S>,
}

impl<S: MessageStore> Clone for SessionRouter<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: MessageStore> SessionRouter<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Build the adapter for `(user_id, conversation_id)`.
    pub async fn get_or_create(
        &self,
        user_id: &str,
        conversation_id: &str,
    ) -> Result<ConversationMemory<S>, StoreError> {
        self.route(ConversationKey::new(user_id, conversation_id))
            .await
    }

    pub async fn route(&self, key: ConversationKey) -> Result<ConversationMemory<S>, StoreError> {
        ConversationMemory::initialize(Arc::clone(&self.store), key).await
    }

    /// Replay a conversation for display.
    pub async fn transcript(&self, key: ConversationKey) -> Result<Transcript, StoreError> {
        let memory = self.route(key).await?;
        Ok(Transcript::from_turns(memory.key(), memory.all_messages()))
    }

    /// Delete every stored turn of a conversation.
    pub async fn clear(&self, key: ConversationKey) -> Result<(), StoreError> {
        let mut memory = self.route(key).await?;
        memory.clear().await?;
        info!(conversation = %memory.key(), "Conversation cleared");
        Ok(())
    }
}
