//! MessageStore trait definition.
//!
//! The durable, append-only log of chat turns, partitioned by
//! `(user_id, conversation_id)`. Follows the same RPITIT pattern as
//! `LlmProvider`.

use parley_types::chat::ChatTurn;
use parley_types::error::StoreError;

/// Repository trait for chat turn persistence.
///
/// Implementations live in parley-infra (e.g., `SqliteMessageStore`).
///
/// Each `append` is its own atomic unit; there are no transactions spanning
/// several turns and no locking across concurrent writers. Two writers on the
/// same partition interleave in whatever order the backend commits them.
pub trait MessageStore: Send + Sync {
    /// Insert one immutable turn.
    ///
    /// The write is visible to subsequent `list` calls on the same store as
    /// soon as this returns `Ok`. Fails with `StoreError::WriteFailed`.
    fn append(
        &self,
        turn: &ChatTurn,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// All turns of a pair in insertion order; empty when there are none.
    ///
    /// Fails with `StoreError::ReadFailed`.
    fn list(
        &self,
        user_id: &str,
        conversation_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<ChatTurn>, StoreError>> + Send;

    /// Delete every turn of a pair. Clearing an empty pair succeeds.
    fn clear(
        &self,
        user_id: &str,
        conversation_id: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Count stored turns across all conversations.
    fn count_turns(&self) -> impl std::future::Future<Output = Result<u64, StoreError>> + Send;
}
