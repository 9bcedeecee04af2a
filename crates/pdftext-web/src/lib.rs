//! HTTP surface for PDF text extraction.
//!
//! `POST /extract-pdf` takes `{ "pdf": "<base64>" }` and answers
//! `{ "text", "characters" }` or `{ "error" }`.

use std::any::Any;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod state;

use models::ErrorBody;
use state::AppState;

/// The service's routes, without middleware or state.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::index::index))
        .route("/extract-pdf", post(handlers::extract::extract_pdf))
}

/// The full application: routes plus body limit, tracing, panic boundary
/// and permissive CORS.
pub fn router(state: Arc<AppState>) -> Router {
    with_middleware(routes(), state)
}

/// Wrap `routes` in the service middleware stack and attach `state`.
pub fn with_middleware(routes: Router<Arc<AppState>>, state: Arc<AppState>) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_payload_bytes);

    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    routes
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .with_state(state)
}

/// Last-resort boundary: a panicking handler still gets a JSON answer.
fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!("Handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: "Internal server error".to_string(),
        }),
    )
        .into_response()
}
