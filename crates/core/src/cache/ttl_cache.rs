//! In-memory key/value store with per-entry expiry.
//!
//! Expired entries are dropped lazily, on the first `get` that observes them;
//! there is no background sweeper and no size cap. Time is read from
//! `tokio::time::Instant` so a paused test runtime controls expiry.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use log::warn;
use tokio::time::Instant;

use crate::constants::DEFAULT_CACHE_TTL;

#[derive(Debug)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// Thread-safe TTL cache.
///
/// Values are handed out by clone, so `V` is expected to be cheap to clone
/// (an `Arc` or an enum of `Arc`s). A hit returns the same shared instance
/// that was stored.
#[derive(Debug)]
pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    default_ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    pub fn new() -> Self {
        Self::with_default_ttl(DEFAULT_CACHE_TTL)
    }

    pub fn with_default_ttl(default_ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            default_ttl,
        }
    }

    /// Lock the entries, recovering from poison since entries are plain data.
    fn lock_entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(|poisoned| {
            warn!("Cache mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Returns the live value for `key`. An entry whose expiry is at or before
    /// now is removed and reported as absent.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let mut entries = self.lock_entries();
        let expired = match entries.get(key) {
            Some(entry) if entry.expires_at > now => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.remove(key);
        }
        None
    }

    /// Stores `value` under `key`, replacing any previous entry.
    /// `ttl` falls back to the cache's default (5 minutes unless configured).
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        let expires_at = Instant::now() + ttl.unwrap_or(self.default_ttl);
        self.lock_entries()
            .insert(key.into(), CacheEntry { value, expires_at });
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.lock_entries().clear();
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_get_returns_value_until_expiry() {
        let cache: TtlCache<Arc<String>> = TtlCache::new();
        cache.set("stock:AAPL", Arc::new("apple".to_string()), Some(Duration::from_secs(60)));

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(cache.get("stock:AAPL").as_deref().map(String::as_str), Some("apple"));

        // Expiry is exclusive: at exactly set-time + ttl the entry is gone
        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(cache.get("stock:AAPL").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_is_evicted_on_read() {
        let cache: TtlCache<u32> = TtlCache::new();
        cache.set("a", 1, Some(Duration::from_secs(1)));
        cache.set("b", 2, Some(Duration::from_secs(100)));
        assert_eq!(cache.len(), 2);

        tokio::time::advance(Duration::from_secs(5)).await;
        // Still counted until observed
        assert_eq!(cache.len(), 2);
        assert!(cache.get("a").is_none());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("b"), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_ttl_is_five_minutes() {
        let cache: TtlCache<u32> = TtlCache::new();
        cache.set("k", 7, None);

        tokio::time::advance(Duration::from_secs(299)).await;
        assert_eq!(cache.get("k"), Some(7));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get("k"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_overwrites_and_resets_expiry() {
        let cache: TtlCache<u32> = TtlCache::new();
        cache.set("k", 1, Some(Duration::from_secs(10)));
        tokio::time::advance(Duration::from_secs(8)).await;
        cache.set("k", 2, Some(Duration::from_secs(10)));
        tokio::time::advance(Duration::from_secs(8)).await;
        assert_eq!(cache.get("k"), Some(2));
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let cache: TtlCache<u32> = TtlCache::new();
        cache.set("a", 1, None);
        cache.set("b", 2, None);
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_none());
    }

    #[tokio::test]
    async fn test_hit_returns_shared_instance() {
        let cache: TtlCache<Arc<String>> = TtlCache::new();
        let stored = Arc::new("shared".to_string());
        cache.set("k", stored.clone(), None);
        let hit = cache.get("k").unwrap();
        assert!(Arc::ptr_eq(&stored, &hit));
    }
}
