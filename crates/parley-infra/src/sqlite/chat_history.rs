//! SQLite message store implementation.
//!
//! Implements `MessageStore` from `parley-core` using sqlx with split
//! read/write pools: raw queries, a private Row struct, writes on the single
//! writer connection and reads on the reader pool.

use parley_core::chat::store::MessageStore;
use parley_types::chat::{ChatTurn, TurnRole};
use parley_types::error::StoreError;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `MessageStore`.
///
/// Replay order is the `id` column (AUTOINCREMENT), i.e. commit order on the
/// single writer connection.
pub struct SqliteMessageStore {
    pool: DatabasePool,
}

impl SqliteMessageStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain ChatTurn.
struct ChatHistoryRow {
    user_id: String,
    conversation_id: String,
    message_type: String,
    content: String,
}

impl ChatHistoryRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            user_id: row.try_get("user_id")?,
            conversation_id: row.try_get("conversation_id")?,
            message_type: row.try_get("message_type")?,
            content: row.try_get("content")?,
        })
    }

    fn into_turn(self) -> Result<ChatTurn, StoreError> {
        let role: TurnRole = self
            .message_type
            .parse()
            .map_err(|e: String| StoreError::ReadFailed(e))?;

        Ok(ChatTurn {
            user_id: self.user_id,
            conversation_id: self.conversation_id,
            role,
            content: self.content,
        })
    }
}

impl MessageStore for SqliteMessageStore {
    async fn append(&self, turn: &ChatTurn) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO chat_history (user_id, conversation_id, message_type, content)
               VALUES (?, ?, ?, ?)"#,
        )
        .bind(&turn.user_id)
        .bind(&turn.conversation_id)
        .bind(turn.role.as_str())
        .bind(&turn.content)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        Ok(())
    }

    async fn list(&self, user_id: &str, conversation_id: &str) -> Result<Vec<ChatTurn>, StoreError> {
        let rows = sqlx::query(
            r#"SELECT user_id, conversation_id, message_type, content
               FROM chat_history
               WHERE user_id = ? AND conversation_id = ?
               ORDER BY id ASC"#,
        )
        .bind(user_id)
        .bind(conversation_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| StoreError::ReadFailed(e.to_string()))?;

        let mut turns = Vec::with_capacity(rows.len());
        for row in &rows {
            let history_row =
                ChatHistoryRow::from_row(row).map_err(|e| StoreError::ReadFailed(e.to_string()))?;
            turns.push(history_row.into_turn()?);
        }

        Ok(turns)
    }

    async fn clear(&self, user_id: &str, conversation_id: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM chat_history WHERE user_id = ? AND conversation_id = ?")
            .bind(user_id)
            .bind(conversation_id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        tracing::debug!(
            user_id,
            conversation_id,
            deleted = result.rows_affected(),
            "Cleared chat history"
        );

        Ok(())
    }

    async fn count_turns(&self) -> Result<u64, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM chat_history")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;

        let count: i64 = row
            .try_get("cnt")
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;

        Ok(count as u64)
    }
}
