//! HTTP request handlers.

pub mod chat;
pub mod history;
pub mod widget;

use std::sync::Arc;

use parley_core::chat::service::ChatService;
use parley_infra::sqlite::chat_history::SqliteMessageStore;

use crate::http::error::AppError;

/// Router state shared by every handler, generic over the model invoker.
pub type SharedChatService<P> = Arc<ChatService<SqliteMessageStore, P>>;

/// Reject blank user names. Non-blank names are used verbatim as the
/// partition key, surrounding whitespace included.
pub(crate) fn validate_username(username: &str) -> Result<&str, AppError> {
    if username.trim().is_empty() {
        return Err(AppError::Validation("username must not be empty".to_string()));
    }
    Ok(username)
}
