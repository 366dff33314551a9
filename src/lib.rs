//! LRU Cache Server - A network-accessible in-memory cache
//!
//! Bounded capacity with least-recently-used eviction and per-entry TTL expiry.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod tasks;

pub use api::{create_router, AppState};
pub use cache::LruCache;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
