//! Cache Engine Module
//!
//! Thread-safe handle over [`CacheStore`], shared by every request worker.

use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::cache::CacheStore;
use crate::error::Result;

// == LRU Cache ==
/// Concurrency-safe LRU cache with per-entry TTL.
///
/// Every operation takes the same exclusive lock for its whole duration, so
/// operations are linearizable. `get` and `get_all` mutate too (recency order
/// and lazy expiry), which is why no shared lock is used. Critical sections
/// never block on I/O.
#[derive(Debug)]
pub struct LruCache<V> {
    store: Mutex<CacheStore<V>>,
}

impl<V: Clone> LruCache<V> {
    // == Constructor ==
    /// Creates an engine holding at most `capacity` entries.
    pub fn new(capacity: usize, default_ttl: Duration) -> Self {
        Self {
            store: Mutex::new(CacheStore::new(capacity, default_ttl)),
        }
    }

    // == Put ==
    /// Inserts or refreshes `key`. A zero `ttl` selects the default TTL.
    pub fn put(&self, key: impl Into<String>, value: V, ttl: Duration) {
        self.store.lock().put(key.into(), value, ttl);
    }

    // == Get ==
    /// Returns the live value for `key` and its expiry time.
    pub fn get(&self, key: &str) -> Result<(V, DateTime<Utc>)> {
        self.store.lock().get(key)
    }

    // == Get All ==
    /// Returns live keys and values, most recently used first.
    pub fn get_all(&self) -> (Vec<String>, Vec<V>) {
        self.store.lock().get_all()
    }

    // == Evict ==
    /// Removes `key` and returns the value it held.
    pub fn evict(&self, key: &str) -> Result<V> {
        self.store.lock().evict(key)
    }

    // == Evict All ==
    /// Empties the cache.
    pub fn evict_all(&self) {
        self.store.lock().evict_all();
    }

    // == Cleanup Expired ==
    /// Drops every expired entry. Returns how many were removed.
    pub fn cleanup_expired(&self) -> usize {
        self.store.lock().cleanup_expired()
    }

    // == Accessors ==
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.store.lock().capacity()
    }

    pub fn default_ttl(&self) -> Duration {
        self.store.lock().default_ttl()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    use crate::error::CacheError;

    #[test]
    fn test_engine_operations() {
        let cache = LruCache::new(1, Duration::from_secs(60));

        cache.put("1", 2, Duration::from_secs(120));
        let (value, expires_at) = cache.get("1").unwrap();
        assert_eq!(value, 2);
        assert!(expires_at > Utc::now());

        assert_eq!(cache.evict("1").unwrap(), 2);
        assert!(matches!(cache.get("1"), Err(CacheError::NotFound(_))));
        assert!(matches!(cache.evict("1"), Err(CacheError::NotFound(_))));
    }

    #[test]
    fn test_engine_evict_all() {
        let cache = LruCache::new(3, Duration::from_secs(60));

        cache.put("a", 1, Duration::ZERO);
        cache.put("b", 2, Duration::ZERO);
        cache.evict_all();

        assert!(cache.is_empty());
        assert_eq!(cache.get_all(), (vec![], vec![]));
    }

    #[test]
    fn test_engine_accessors() {
        let cache: LruCache<String> = LruCache::new(7, Duration::from_secs(5));
        assert_eq!(cache.capacity(), 7);
        assert_eq!(cache.default_ttl(), Duration::from_secs(5));
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_engine_concurrent_puts_respect_capacity() {
        let cache = Arc::new(LruCache::new(50, Duration::from_secs(60)));

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..200 {
                        let key = format!("{}-{}", worker, i % 40);
                        cache.put(key.clone(), i, Duration::ZERO);
                        let _ = cache.get(&key);
                        if i % 7 == 0 {
                            let _ = cache.evict(&key);
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.len() <= 50);
        let (keys, values) = cache.get_all();
        assert_eq!(keys.len(), values.len());
        assert_eq!(keys.len(), cache.len());
    }
}
