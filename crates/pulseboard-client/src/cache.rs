//! TTL cache for successful reads.

use parking_lot::Mutex;
use pulseboard_config::CacheConfig;
use pulseboard_core::ApiResponse;
use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// Caches successful `fetch` envelopes per path for a fixed time-to-live.
///
/// Every collection carries a generation that [`invalidate_collection`]
/// bumps. A read captures the generation before it goes out and may only
/// store its body if no write landed in between.
///
/// [`invalidate_collection`]: ResponseCache::invalidate_collection
#[derive(Debug)]
pub struct ResponseCache {
    ttl: Duration,
    inner: Mutex<CacheState>,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<String, (Instant, ApiResponse<Value>)>,
    generations: HashMap<String, u64>,
}

impl ResponseCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: Mutex::new(CacheState::default()),
        }
    }

    /// Creates a cache from configuration, or `None` when disabled.
    #[must_use]
    pub fn from_config(config: &CacheConfig) -> Option<Self> {
        config.enabled.then(|| Self::new(config.ttl()))
    }

    /// Returns a live entry for `path`, evicting it if expired.
    pub fn get(&self, path: &str) -> Option<ApiResponse<Value>> {
        let mut inner = self.inner.lock();
        match inner.entries.get(path) {
            Some((stored, response)) if stored.elapsed() < self.ttl => {
                debug!("Cache hit: {}", path);
                Some(response.clone())
            }
            Some(_) => {
                inner.entries.remove(path);
                None
            }
            None => None,
        }
    }

    /// Current generation of the collection `path` belongs to.
    #[must_use]
    pub fn generation(&self, path: &str) -> u64 {
        let inner = self.inner.lock();
        inner.generations.get(collection_of(path)).copied().unwrap_or(0)
    }

    /// Stores a successful envelope read at `generation`.
    ///
    /// Failures are never cached, and neither is a body read before the
    /// collection was last invalidated. Returns whether the entry was stored.
    pub fn put(&self, path: &str, generation: u64, response: &ApiResponse<Value>) -> bool {
        if !response.success {
            return false;
        }

        let mut inner = self.inner.lock();
        let current = inner.generations.get(collection_of(path)).copied().unwrap_or(0);
        if current != generation {
            debug!("Cache skip, {} changed while it was read", path);
            return false;
        }
        inner
            .entries
            .insert(path.to_string(), (Instant::now(), response.clone()));
        true
    }

    /// Drops every entry under a collection, e.g. `/users` and `/users/7`,
    /// and fences out reads that started before this call.
    pub fn invalidate_collection(&self, collection_path: &str) {
        let item_prefix = format!("{}/", collection_path);
        let mut inner = self.inner.lock();
        inner
            .entries
            .retain(|path, _| path != collection_path && !path.starts_with(&item_prefix));
        *inner.generations.entry(collection_path.to_string()).or_default() += 1;
        debug!("Cache invalidated: {}", collection_path);
    }

    /// Number of entries currently held, expired or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Returns true when the cache holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `/users/7` and `/users` both belong to `/users`.
fn collection_of(path: &str) -> &str {
    match path.get(1..).and_then(|rest| rest.find('/')) {
        Some(end) => &path[..=end],
        None => path,
    }
}
