//! Application error type mapping to HTTP status codes and envelope format.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use parley_core::chat::service::ChatError;
use parley_types::error::StoreError;
use parley_types::llm::LlmError;

use super::response::ResponseMeta;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// A failed chat turn or history operation.
    Chat(ChatError),
    Validation(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Chat(ChatError::Store(e))
    }
}

impl AppError {
    /// Status code and machine-readable error code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Chat(ChatError::Store(StoreError::ReadFailed(_))) => {
                (StatusCode::SERVICE_UNAVAILABLE, "STORE_READ_FAILED")
            }
            AppError::Chat(ChatError::Store(StoreError::WriteFailed(_))) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORE_WRITE_FAILED")
            }
            AppError::Chat(ChatError::Model(LlmError::AuthenticationFailed)) => {
                (StatusCode::UNAUTHORIZED, "MODEL_AUTH_FAILED")
            }
            AppError::Chat(ChatError::Model(LlmError::RateLimited)) => {
                (StatusCode::TOO_MANY_REQUESTS, "MODEL_RATE_LIMITED")
            }
            AppError::Chat(ChatError::Model(_)) => (StatusCode::BAD_GATEWAY, "MODEL_ERROR"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        }
    }
}

/// An [`AppError`] stamped with the metadata of the request that failed.
#[derive(Debug)]
pub struct ApiFailure {
    pub error: AppError,
    pub meta: ResponseMeta,
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let (status, code) = self.error.status_and_code();
        let message = match &self.error {
            AppError::Chat(e) => e.to_string(),
            AppError::Validation(msg) => msg.clone(),
        };

        if status.is_server_error() {
            tracing::error!(code, request_id = %self.meta.request_id, error = %message, "Request failed");
        }

        let body = json!({
            "data": null,
            "meta": self.meta,
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::RequestClock;

    fn status_of(err: AppError) -> StatusCode {
        err.status_and_code().0
    }

    #[test]
    fn test_store_errors() {
        assert_eq!(
            status_of(StoreError::ReadFailed("down".into()).into()),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(StoreError::WriteFailed("disk full".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_model_errors() {
        let model = |e: LlmError| AppError::Chat(ChatError::Model(e));
        assert_eq!(status_of(model(LlmError::AuthenticationFailed)), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(model(LlmError::RateLimited)), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            status_of(model(LlmError::Provider {
                message: "quota exceeded".into()
            })),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(model(LlmError::Overloaded("busy".into()))),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_validation_error() {
        let err = AppError::Validation("username must not be empty".into());
        assert_eq!(err.status_and_code(), (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"));
    }

    #[tokio::test]
    async fn test_failure_envelope_carries_request_meta() {
        let failure = RequestClock::start().fail(AppError::Validation("bad".into()));
        let request_id = failure.meta.request_id;

        let response = failure.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["meta"]["request_id"], request_id.to_string());
        assert_eq!(request_id.get_version_num(), 7);
        assert!(body["data"].is_null());
        assert_eq!(body["errors"][0]["message"], "bad");
    }
}
