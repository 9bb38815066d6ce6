//! Cache data structures with TTL support

use std::time::{Duration, Instant};

/// What a cache entry holds: a raw response body, or a marker that the
/// remote answered "not there" (404 / persistent failure). Negative
/// entries exist so a missing league can't trigger a fetch storm within
/// the TTL window.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedPayload {
    Body(String),
    NotFound,
}

/// Result of a cache probe, seen by the fetch path
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    /// Fresh body available
    Hit(String),
    /// Fresh negative entry; skip the network, report absent
    NegativeHit,
    /// Nothing usable cached
    Miss,
}

/// Cached API response with TTL support
#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub payload: CachedPayload,
    pub cached_at: Instant,
    pub ttl_seconds: u64,
}

impl CachedResponse {
    /// Creates a new cached response entry
    pub fn new(payload: CachedPayload, ttl_seconds: u64) -> Self {
        Self {
            payload,
            cached_at: Instant::now(),
            ttl_seconds,
        }
    }

    /// Checks if the cached data is expired
    pub fn is_expired(&self) -> bool {
        let ttl = Duration::from_secs(self.ttl_seconds);
        self.cached_at.elapsed() > ttl
    }

    /// Gets the remaining time until expiration
    #[allow(dead_code)]
    pub fn time_until_expiry(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds).saturating_sub(self.cached_at.elapsed())
    }
}

/// Point-in-time cache statistics for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
}
