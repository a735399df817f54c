//! Axum router configuration with middleware.
//!
//! The widget is served at `/`, JSON routes live under `/api/v1/`.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use parley_core::llm::provider::LlmProvider;

use crate::http::handlers::{self, SharedChatService};

/// Build the complete router with all routes and middleware.
pub fn build_router<P: LlmProvider + 'static>(service: SharedChatService<P>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/chat", post(handlers::chat::post_chat::<P>))
        .route(
            "/history/{user_id}",
            get(handlers::history::get_history::<P>)
                .delete(handlers::history::delete_history::<P>),
        );

    Router::new()
        .route("/", get(handlers::widget::index))
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
