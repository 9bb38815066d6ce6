use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::types::{CacheLookup, CacheStats, CachedPayload, CachedResponse};
use crate::constants::{cache, cache_ttl};

/// Bounded TTL cache for raw API responses, keyed by URL.
///
/// Owned by the API client and passed along with it rather than living in
/// a process-global static, so tests can build isolated instances with
/// their own TTLs. Entries are immutable once written and only age out;
/// there is no explicit invalidation.
pub struct ResponseCache {
    entries: RwLock<LruCache<String, CachedResponse>>,
    ttl_seconds: u64,
    negative_ttl_seconds: u64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResponseCache {
    /// Creates a cache with the application defaults (2048 entries, 1 hour
    /// data TTL, 5 minute negative TTL)
    pub fn new() -> Self {
        Self::with_settings(
            cache::RESPONSE_CACHE_CAPACITY,
            cache_ttl::RESPONSE_SECONDS,
            cache_ttl::NEGATIVE_SECONDS,
        )
    }

    /// Creates a cache with explicit capacity and TTLs (used by tests to
    /// get deterministic expiry behavior)
    pub fn with_settings(capacity: usize, ttl_seconds: u64, negative_ttl_seconds: u64) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity clamped to >= 1");
        Self {
            entries: RwLock::new(LruCache::new(capacity)),
            ttl_seconds,
            negative_ttl_seconds,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Probes the cache for a URL, evicting the entry if it has expired
    pub async fn lookup(&self, url: &str) -> CacheLookup {
        let mut entries = self.entries.write().await;

        if let Some(entry) = entries.get(url) {
            if !entry.is_expired() {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return match &entry.payload {
                    CachedPayload::Body(body) => {
                        debug!(
                            "Cache hit: url={}, size={}, age={:?}",
                            url,
                            body.len(),
                            entry.cached_at.elapsed()
                        );
                        CacheLookup::Hit(body.clone())
                    }
                    CachedPayload::NotFound => {
                        debug!("Negative cache hit: url={url}");
                        CacheLookup::NegativeHit
                    }
                };
            }
            debug!(
                "Evicting expired cache entry: url={}, age={:?}, ttl={}s",
                url,
                entry.cached_at.elapsed(),
                entry.ttl_seconds
            );
            entries.pop(url);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        CacheLookup::Miss
    }

    /// Stores a successful response body under the data TTL
    pub async fn insert_body(&self, url: String, body: String) {
        debug!("Caching response: url={}, size={}", url, body.len());
        let entry = CachedResponse::new(CachedPayload::Body(body), self.ttl_seconds);
        self.entries.write().await.put(url, entry);
    }

    /// Stores a negative marker under the shorter negative TTL. Also used
    /// after retries are exhausted, so a persistently failing endpoint is
    /// not hammered for the rest of the session.
    pub async fn insert_negative(&self, url: String) {
        warn!("Caching negative result: url={url}");
        let entry = CachedResponse::new(CachedPayload::NotFound, self.negative_ttl_seconds);
        self.entries.write().await.put(url, entry);
    }

    /// Number of resident entries (expired ones included until probed)
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// True when nothing is cached
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drops every entry and resets the hit/miss counters
    pub async fn clear(&self) {
        self.entries.write().await.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Snapshot of size and hit/miss counters for diagnostics
    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.read().await;
        CacheStats {
            entries: entries.len(),
            capacity: entries.cap().get(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Backdates an entry so tests can exercise expiry without sleeping
    #[cfg(test)]
    pub async fn backdate(&self, url: &str, age: std::time::Duration) {
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get_mut(url) {
            entry.cached_at = std::time::Instant::now() - age;
        }
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("ttl_seconds", &self.ttl_seconds)
            .field("negative_ttl_seconds", &self.negative_ttl_seconds)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_miss_on_empty_cache() {
        let cache = ResponseCache::new();
        assert_eq!(cache.lookup("http://a/x").await, CacheLookup::Miss);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_hit_returns_stored_body() {
        let cache = ResponseCache::new();
        cache
            .insert_body("http://a/x".to_string(), r#"{"ok":true}"#.to_string())
            .await;

        assert_eq!(
            cache.lookup("http://a/x").await,
            CacheLookup::Hit(r#"{"ok":true}"#.to_string())
        );
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_negative_hit() {
        let cache = ResponseCache::new();
        cache.insert_negative("http://a/missing".to_string()).await;

        assert_eq!(
            cache.lookup("http://a/missing").await,
            CacheLookup::NegativeHit
        );
    }

    #[tokio::test]
    async fn test_expired_entry_is_evicted_on_lookup() {
        let cache = ResponseCache::new();
        cache
            .insert_body("http://a/x".to_string(), "{}".to_string())
            .await;
        cache
            .backdate("http://a/x", Duration::from_secs(3601))
            .await;

        assert_eq!(cache.lookup("http://a/x").await, CacheLookup::Miss);
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_negative_entry_expires_faster_than_data() {
        let cache = ResponseCache::new();
        cache.insert_negative("http://a/missing".to_string()).await;
        cache
            .insert_body("http://a/x".to_string(), "{}".to_string())
            .await;

        // Ten minutes in: negative entry is stale, data entry is not
        cache
            .backdate("http://a/missing", Duration::from_secs(600))
            .await;
        cache.backdate("http://a/x", Duration::from_secs(600)).await;

        assert_eq!(cache.lookup("http://a/missing").await, CacheLookup::Miss);
        assert!(matches!(
            cache.lookup("http://a/x").await,
            CacheLookup::Hit(_)
        ));
    }

    #[tokio::test]
    async fn test_capacity_bound_evicts_lru() {
        let cache = ResponseCache::with_settings(2, 3600, 300);
        cache.insert_body("http://a/1".to_string(), "1".to_string()).await;
        cache.insert_body("http://a/2".to_string(), "2".to_string()).await;
        cache.insert_body("http://a/3".to_string(), "3".to_string()).await;

        assert_eq!(cache.len().await, 2);
        assert_eq!(cache.lookup("http://a/1").await, CacheLookup::Miss);
        assert!(matches!(
            cache.lookup("http://a/3").await,
            CacheLookup::Hit(_)
        ));
    }

    #[tokio::test]
    async fn test_stats_track_hits_and_misses() {
        let cache = ResponseCache::new();
        cache.insert_body("http://a/x".to_string(), "{}".to_string()).await;

        cache.lookup("http://a/x").await;
        cache.lookup("http://a/x").await;
        cache.lookup("http://a/y").await;

        let stats = cache.stats().await;
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
    }

    #[tokio::test]
    async fn test_clear_resets_everything() {
        let cache = ResponseCache::new();
        cache.insert_body("http://a/x".to_string(), "{}".to_string()).await;
        cache.lookup("http://a/x").await;

        cache.clear().await;

        assert!(cache.is_empty().await);
        let stats = cache.stats().await;
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
    }
}
