//! API Handlers
//!
//! HTTP request handlers mapping each endpoint onto one cache operation.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::cache::LruCache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{GetAllResponse, GetResponse, HealthResponse, PutRequest};

/// Application state shared across all handlers.
///
/// The cache engine does its own locking, so handlers share it through a
/// plain `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache engine
    pub cache: Arc<LruCache<Value>>,
}

impl AppState {
    /// Creates a new AppState around the given cache engine.
    pub fn new(cache: LruCache<Value>) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(LruCache::new(config.cache_size, config.default_cache_ttl))
    }
}

/// Handler for POST /api/lru
///
/// Stores a value under a key. Any body that does not decode into a
/// [`PutRequest`] is a bad request.
pub async fn put_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<PutRequest>, JsonRejection>,
) -> Result<StatusCode> {
    let Json(req) = payload.map_err(|rejection| CacheError::InvalidRequest(rejection.body_text()))?;

    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl();
    state.cache.put(req.key, req.value, ttl);

    Ok(StatusCode::CREATED)
}

/// Handler for GET /api/lru/:key
///
/// Returns the value and its expiry (Unix seconds).
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let (value, expires_at) = state.cache.get(&key)?;

    Ok(Json(GetResponse::new(key, value, expires_at)))
}

/// Handler for GET /api/lru
///
/// Lists live entries, most recently used first; 204 when there are none.
pub async fn get_all_handler(State(state): State<AppState>) -> Response {
    let (keys, values) = state.cache.get_all();

    if keys.is_empty() {
        return StatusCode::NO_CONTENT.into_response();
    }

    Json(GetAllResponse::new(keys, values)).into_response()
}

/// Handler for DELETE /api/lru/:key
pub async fn evict_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<StatusCode> {
    state.cache.evict(&key)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Handler for DELETE /api/lru
pub async fn evict_all_handler(State(state): State<AppState>) -> StatusCode {
    state.cache.evict_all();

    StatusCode::NO_CONTENT
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
