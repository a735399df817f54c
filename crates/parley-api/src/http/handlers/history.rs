//! Conversation history HTTP handlers.
//!
//! Endpoints:
//! - GET    /api/v1/history/{user_id} - Transcript of the user's conversation
//! - DELETE /api/v1/history/{user_id} - Clear it

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use parley_core::llm::provider::LlmProvider;
use parley_types::chat::{ConversationKey, Transcript};

use super::{SharedChatService, validate_username};
use crate::http::error::ApiFailure;
use crate::http::response::{Envelope, RequestClock};

#[derive(Debug, Serialize)]
pub struct Cleared {
    pub cleared: bool,
    pub user_id: String,
    pub conversation_id: String,
}

/// GET /api/v1/history/{user_id} - Replay the stored conversation.
pub async fn get_history<P: LlmProvider + 'static>(
    State(service): State<SharedChatService<P>>,
    Path(user_id): Path<String>,
) -> Result<Json<Envelope<Transcript>>, ApiFailure> {
    let clock = RequestClock::start();

    let user_id = validate_username(&user_id).map_err(|e| clock.fail(e))?;
    let transcript = service
        .transcript(ConversationKey::default_for(user_id))
        .await
        .map_err(|e| clock.fail(e))?;

    Ok(clock.ok(transcript))
}

/// DELETE /api/v1/history/{user_id} - Delete the stored conversation.
pub async fn delete_history<P: LlmProvider + 'static>(
    State(service): State<SharedChatService<P>>,
    Path(user_id): Path<String>,
) -> Result<Json<Envelope<Cleared>>, ApiFailure> {
    let clock = RequestClock::start();

    let user_id = validate_username(&user_id).map_err(|e| clock.fail(e))?;
    let key = ConversationKey::default_for(user_id);
    service.clear(key.clone()).await.map_err(|e| clock.fail(e))?;

    Ok(clock.ok(Cleared {
        cleared: true,
        user_id: key.user_id,
        conversation_id: key.conversation_id,
    }))
}
