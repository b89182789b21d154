//! Bounded TTL cache keyed by request path and query string
//!
//! Provides a `ResponseCache` that stores opaque JSON payloads with their
//! insertion time. Eviction follows insertion order, not access order.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};

/// Default time-to-live for cache entries in seconds
pub const DEFAULT_TTL_SECS: i64 = 60;

/// Default maximum number of entries held at once
pub const DEFAULT_CAPACITY: usize = 100;

/// A single cached payload
#[derive(Debug, Clone)]
struct CacheEntry {
    /// The response body as returned by the server
    payload: Value,
    /// When the entry was written
    cached_at: DateTime<Utc>,
}

/// In-memory response cache
///
/// Not synchronised: the owner decides how it is shared. `get` never removes
/// an expired entry; stale entries linger until overwritten or evicted.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    entries: HashMap<String, CacheEntry>,
    /// Keys in first-insertion order; front is the eviction candidate
    order: VecDeque<String>,
    ttl: Duration,
    capacity: usize,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_TTL_SECS), DEFAULT_CAPACITY)
    }
}

impl ResponseCache {
    /// Creates an empty cache with the given TTL and capacity
    ///
    /// A capacity of zero is treated as one so that a just-written entry is
    /// always readable.
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            ttl,
            capacity: capacity.max(1),
        }
    }

    #[cfg(test)]
    fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries currently held, expired ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the payload for `key` if present and younger than the TTL
    pub fn get(&self, key: &str) -> Option<&Value> {
        let entry = self.entries.get(key)?;
        let age = Utc::now() - entry.cached_at;
        if age < self.ttl {
            tracing::debug!(key, "cache hit");
            Some(&entry.payload)
        } else {
            tracing::debug!(key, "cache entry expired");
            None
        }
    }

    /// Stores `payload` under `key`, stamping the current time
    ///
    /// Overwriting an existing key keeps its original insertion position.
    pub fn put(&mut self, key: impl Into<String>, payload: Value) {
        let key = key.into();
        let entry = CacheEntry {
            payload,
            cached_at: Utc::now(),
        };

        if self.entries.insert(key.clone(), entry).is_none() {
            self.order.push_back(key);
        }

        while self.entries.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            tracing::debug!(key = %oldest, "cache evicted oldest entry");
        }
    }

    /// Removes every entry
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
