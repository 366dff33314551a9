//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::{error, Level};

use super::handlers::{
    evict_all_handler, evict_handler, get_all_handler, get_handler, health_handler, put_handler,
    AppState,
};
use crate::models::ErrorResponse;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /api/lru` - Store a value
/// - `GET /api/lru` - List live entries
/// - `DELETE /api/lru` - Remove all entries
/// - `GET /api/lru/:key` - Retrieve a value by key
/// - `DELETE /api/lru/:key` - Remove a key
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - Tracing: one span per request, response status and latency at DEBUG
/// - Panic recovery: a panicking handler yields 500 instead of a dropped
///   connection
pub fn create_router(state: AppState) -> Router {
    let routes = Router::new()
        .route(
            "/api/lru",
            post(put_handler).get(get_all_handler).delete(evict_all_handler),
        )
        .route("/api/lru/:key", get(get_handler).delete(evict_handler))
        .route("/health", get(health_handler));

    with_middleware(routes).with_state(state)
}

/// Wraps every route registered so far in the panic and tracing layers.
fn with_middleware<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::DEBUG)
                .latency_unit(LatencyUnit::Micros),
        );

    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(trace)
}

// == Panic Recovery ==
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(msg) = panic.downcast_ref::<String>() {
        msg.as_str()
    } else if let Some(msg) = panic.downcast_ref::<&str>() {
        msg
    } else {
        "unknown panic payload"
    };
    error!(details, "handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Internal server error".to_string())),
    )
        .into_response()
}
