//! Cache Module
//!
//! In-memory caching with TTL expiration and LRU eviction.

mod engine;
mod entry;
mod lru;
mod store;


// Re-export public types
pub use engine::LruCache;
pub use entry::CacheEntry;
pub use lru::RecencyList;
pub use store::CacheStore;
