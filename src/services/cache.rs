//! In-memory response cache with a fixed time-to-live.
//!
//! Entries expire lazily: a stale entry is never returned, and every `put`
//! sweeps out entries that have outlived the TTL. Writes replace whole
//! entries, so concurrent misses for one key simply race and the last write
//! wins.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

use crate::models::collection::Collection;
use crate::models::record::Record;

/// Cache of upstream collection responses keyed by request.
pub type UpstreamCache = ResponseCache<Collection<Record>>;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    payload: V,
    stored_at: Instant,
}

#[derive(Debug)]
pub struct ResponseCache<V> {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone> ResponseCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// Look up `key` as of `now`. Entries aged `ttl` or more are treated as absent.
    pub fn get_at(&self, key: &str, now: Instant) -> Option<V> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(key)
            .filter(|entry| now.saturating_duration_since(entry.stored_at) < self.ttl)
            .map(|entry| entry.payload.clone())
    }

    pub fn put(&self, key: impl Into<String>, payload: V) {
        self.put_at(key, payload, Instant::now());
    }

    pub fn put_at(&self, key: impl Into<String>, payload: V, now: Instant) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|_, entry| now.saturating_duration_since(entry.stored_at) < self.ttl);
        entries.insert(
            key.into(),
            CacheEntry {
                payload,
                stored_at: now,
            },
        );
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
