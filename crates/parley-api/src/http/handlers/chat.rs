//! Chat turn endpoint.
//!
//! POST /api/v1/chat `{ "username": "...", "query": "..." }`
//!
//! Runs one turn on the user's default conversation and returns the whole
//! transcript, the same shape the widget renders.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use parley_core::llm::provider::LlmProvider;
use parley_types::chat::Transcript;

use super::{SharedChatService, validate_username};
use crate::http::error::ApiFailure;
use crate::http::response::{Envelope, RequestClock};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub username: String,
    pub query: String,
}

/// POST /api/v1/chat - Run one turn and return the transcript.
pub async fn post_chat<P: LlmProvider + 'static>(
    State(service): State<SharedChatService<P>>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<Envelope<Transcript>>, ApiFailure> {
    let clock = RequestClock::start();

    let username = validate_username(&body.username).map_err(|e| clock.fail(e))?;
    let transcript = service
        .chat(username, &body.query)
        .await
        .map_err(|e| clock.fail(e))?;

    Ok(clock.ok(transcript))
}
