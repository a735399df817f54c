//! JSON envelope shared by every API response.
//!
//! ```json
//! {
//!   "data": { ... },
//!   "meta": { "request_id": "...", "timestamp": "...", "response_time_ms": 5 }
//! }
//! ```
//!
//! Error responses carry `"data": null` plus an `errors` array.

use std::time::Instant;

use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use super::error::{ApiFailure, AppError};

#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseMeta {
    pub request_id: Uuid,
    /// RFC 3339, UTC.
    pub timestamp: String,
    pub response_time_ms: u64,
}

/// Started when a handler begins; stamps whichever response it ends with.
pub struct RequestClock {
    request_id: Uuid,
    started: Instant,
}

impl RequestClock {
    pub fn start() -> Self {
        Self {
            request_id: Uuid::now_v7(),
            started: Instant::now(),
        }
    }

    pub fn meta(&self) -> ResponseMeta {
        ResponseMeta {
            request_id: self.request_id,
            timestamp: chrono::Utc::now().to_rfc3339(),
            response_time_ms: self.started.elapsed().as_millis() as u64,
        }
    }

    pub fn ok<T: Serialize>(&self, data: T) -> Json<Envelope<T>> {
        Json(Envelope {
            data,
            meta: self.meta(),
        })
    }

    pub fn fail(&self, error: impl Into<AppError>) -> ApiFailure {
        ApiFailure {
            error: error.into(),
            meta: self.meta(),
        }
    }
}
