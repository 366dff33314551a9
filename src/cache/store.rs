//! Cache Store Module
//!
//! Main cache state combining a HashMap index with the recency list, applying
//! capacity eviction eagerly and TTL expiry lazily.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::cache::{CacheEntry, RecencyList};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Unsynchronized cache state with LRU eviction and TTL support.
///
/// `index` and `order` always hold the same set of keys, and their size never
/// exceeds `capacity` once an operation returns.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key to slot in `order`
    index: HashMap<String, usize>,
    /// Entries from most to least recently used
    order: RecencyList<V>,
    /// Maximum number of entries allowed
    capacity: usize,
    /// TTL used when a caller passes a zero TTL
    default_ttl: Duration,
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and default TTL.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries; zero means nothing is retained
    /// * `default_ttl` - TTL applied when `put` receives a zero TTL
    pub fn new(capacity: usize, default_ttl: Duration) -> Self {
        Self {
            index: HashMap::new(),
            order: RecencyList::new(),
            capacity,
            default_ttl,
        }
    }

    // == Put ==
    /// Stores a key-value pair, or refreshes an existing one.
    ///
    /// An existing key gets the new value, a fresh expiry and moves to the
    /// front; capacity is not re-checked since the size does not grow. A new
    /// key arriving at a full cache evicts the least recently used entry
    /// first. With zero capacity the put is silently dropped.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Time to live; `Duration::ZERO` uses the default TTL
    pub fn put(&mut self, key: String, value: V, ttl: Duration) {
        let ttl = if ttl.is_zero() { self.default_ttl } else { ttl };

        if let Some(&slot) = self.index.get(&key) {
            if let Some(entry) = self.order.get_mut(slot) {
                entry.refresh(value, ttl);
            }
            self.order.move_to_front(slot);
            return;
        }

        if self.index.len() >= self.capacity {
            match self.order.pop_back() {
                Some(evicted) => {
                    self.index.remove(&evicted.key);
                    debug!(key = %evicted.key, "evicted least recently used entry");
                }
                None => {
                    debug!(key = %key, "zero-capacity cache, put dropped");
                    return;
                }
            }
        }

        let slot = self.order.push_front(CacheEntry::new(key.clone(), value, ttl));
        self.index.insert(key, slot);
    }

    // == Evict ==
    /// Removes an entry by key regardless of its expiry and returns its value.
    pub fn evict(&mut self, key: &str) -> Result<V> {
        self.remove(key)
            .map(|entry| entry.value)
            .ok_or_else(|| CacheError::NotFound(key.to_string()))
    }

    // == Evict All ==
    /// Removes every entry.
    pub fn evict_all(&mut self) {
        self.index.clear();
        self.order.clear();
    }

    // == Cleanup Expired ==
    /// Removes all expired entries without reordering live ones.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Utc::now();
        let mut removed = 0;
        let mut cursor = self.order.front();

        while let Some(slot) = cursor {
            cursor = self.order.next_of(slot);
            if self.order.get(slot).is_some_and(|e| e.is_expired_at(now)) {
                if let Some(entry) = self.order.remove(slot) {
                    self.index.remove(&entry.key);
                    removed += 1;
                }
            }
        }

        removed
    }

    // == Length ==
    /// Returns the current number of entries, expired-but-untouched included.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Removes `key` from both the index and the recency list.
    fn remove(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let slot = self.index.remove(key)?;
        self.order.remove(slot)
    }
}

impl<V: Clone> CacheStore<V> {
    // == Get ==
    /// Retrieves a live value and its expiry, marking the key most recently used.
    ///
    /// An expired entry is removed on the spot and reported as not found.
    pub fn get(&mut self, key: &str) -> Result<(V, DateTime<Utc>)> {
        let Some(&slot) = self.index.get(key) else {
            debug!(key, "cache miss");
            return Err(CacheError::NotFound(key.to_string()));
        };

        let live = self
            .order
            .get(slot)
            .filter(|entry| !entry.is_expired())
            .map(|entry| (entry.value.clone(), entry.expires_at));

        match live {
            Some(hit) => {
                self.order.move_to_front(slot);
                Ok(hit)
            }
            None => {
                self.remove(key);
                debug!(key, "cache entry expired, removed");
                Err(CacheError::NotFound(key.to_string()))
            }
        }
    }

    // == Get All ==
    /// Returns every live key and value, most recently used first.
    ///
    /// Expired entries met on the way are removed. Live entries keep their
    /// position.
    pub fn get_all(&mut self) -> (Vec<String>, Vec<V>) {
        let now = Utc::now();
        let mut keys = Vec::with_capacity(self.len());
        let mut values = Vec::with_capacity(self.len());
        let mut cursor = self.order.front();

        while let Some(slot) = cursor {
            cursor = self.order.next_of(slot);
            let Some(entry) = self.order.get(slot) else {
                continue;
            };

            if entry.is_expired_at(now) {
                if let Some(expired) = self.order.remove(slot) {
                    self.index.remove(&expired.key);
                    debug!(key = %expired.key, "cache entry expired, removed");
                }
            } else {
                keys.push(entry.key.clone());
                values.push(entry.value.clone());
            }
        }

        (keys, values)
    }
}
