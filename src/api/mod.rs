//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `POST /api/lru` - Store a value (`{key, value, ttl_seconds}`)
//! - `GET /api/lru/:key` - Retrieve a value and its expiry
//! - `GET /api/lru` - List live entries, most recently used first
//! - `DELETE /api/lru/:key` - Remove a key
//! - `DELETE /api/lru` - Remove everything
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
