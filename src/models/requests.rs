//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

/// Request body for the put operation (POST /api/lru)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: Any JSON value; stored as-is
/// - `ttl_seconds`: TTL in seconds, 0 or absent uses the server default
#[derive(Debug, Clone, Deserialize)]
pub struct PutRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    #[serde(default)]
    pub value: Value,
    /// TTL in seconds
    #[serde(default)]
    pub ttl_seconds: u64,
}

impl PutRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        None
    }

    /// TTL to hand to the cache; zero selects the default.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}
