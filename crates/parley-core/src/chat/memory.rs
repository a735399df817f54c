//! Write-through conversation memory.
//!
//! `ConversationMemory` mirrors one `(user_id, conversation_id)` partition of a
//! `MessageStore`. It is populated by a full replay when constructed and then
//! only changes through its own operations, each of which hits the store first.

use std::sync::Arc;

use parley_types::chat::{ChatTurn, ConversationKey, TurnRole};
use parley_types::error::StoreError;
use tracing::debug;

use super::store::MessageStore;

/// In-memory view of one conversation backed by a `MessageStore`.
///
/// Invariant: `messages` never runs ahead of the store. A turn is pushed only
/// after its `append` returned `Ok`, and the view is emptied only after the
/// store's `clear` succeeded.
pub struct ConversationMemory<S: MessageStore> {
    store: Arc<S>,
    key: ConversationKey,
    messages: Vec<ChatTurn>,
}

impl<S: MessageStore> ConversationMemory<S> {
    /// Build the view by replaying every stored turn of `key`.
    ///
    /// A failed read fails construction with the store's `ReadFailed`.
    pub async fn initialize(store: Arc<S>, key: ConversationKey) -> Result<Self, StoreError> {
        let messages = store.list(&key.user_id, &key.conversation_id).await?;
        debug!(conversation = %key, turns = messages.len(), "Replayed conversation history");

        Ok(Self {
            store,
            key,
            messages,
        })
    }

    pub fn key(&self) -> &ConversationKey {
        &self.key
    }

    pub fn user_id(&self) -> &str {
        &self.key.user_id
    }

    pub fn conversation_id(&self) -> &str {
        &self.key.conversation_id
    }

    /// Persist a turn, then mirror it.
    ///
    /// On store failure the error is returned and `messages` is untouched.
    pub async fn add_message(
        &mut self,
        role: TurnRole,
        content: impl Into<String>,
    ) -> Result<(), StoreError> {
        let turn = ChatTurn::new(&self.key, role, content);
        self.store.append(&turn).await?;
        self.messages.push(turn);
        Ok(())
    }

    /// Delete the conversation from the store, then empty the view.
    pub async fn clear(&mut self) -> Result<(), StoreError> {
        self.store
            .clear(&self.key.user_id, &self.key.conversation_id)
            .await?;
        self.messages.clear();
        Ok(())
    }

    /// Current view, as of construction plus this instance's own writes.
    pub fn all_messages(&self) -> &[ChatTurn] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<ChatTurn> {
        self.messages
    }
}
