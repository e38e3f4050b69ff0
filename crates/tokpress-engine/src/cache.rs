//! Content-addressed result cache: LRU with a time-to-live.
//!
//! Keys are BLAKE3 digests of `(normalized input, options)`. Reads refresh
//! recency; inserts evict the least-recently-used entry once capacity is
//! reached; an entry older than the TTL is treated as a miss and removed
//! on read. Everything, hit/miss counters included, happens under one
//! mutex acquisition so concurrent callers observe a consistent order.

use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use lru::LruCache;
use serde::Serialize;
use tokpress_types::ContentType;

/// Digest key for a cache entry.
pub type Digest = [u8; 32];

/// A stored optimization outcome.
#[derive(Clone, Debug)]
pub struct CacheEntry {
    pub output: String,
    pub tokens: u32,
    pub content_type: ContentType,
    pub strategies: Vec<String>,
    inserted: Instant,
}

/// Point-in-time cache counters.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
}

struct Inner {
    map: LruCache<Digest, CacheEntry>,
    hits: u64,
    misses: u64,
}

/// Thread-safe LRU + TTL cache.
pub struct ResultCache {
    inner: Mutex<Inner>,
    ttl: Duration,
}

impl ResultCache {
    /// Creates a cache holding up to `capacity` entries for at most `ttl`
    /// each. A zero capacity is clamped to one entry.
    #[must_use]
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(Inner {
                map: LruCache::new(capacity),
                hits: 0,
                misses: 0,
            }),
            ttl,
        }
    }

    /// Looks up a digest, refreshing its recency. An expired entry is
    /// removed and reported as a miss.
    pub fn get(&self, digest: &Digest) -> Option<CacheEntry> {
        let mut guard = self.lock();
        let inner = &mut *guard;
        let expired = inner
            .map
            .get(digest)
            .is_some_and(|entry| entry.inserted.elapsed() > self.ttl);
        if expired {
            inner.map.pop(digest);
        }
        let found = inner.map.get(digest).cloned();
        match found {
            Some(entry) => {
                inner.hits += 1;
                Some(entry)
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    /// Stores an outcome, evicting the least-recently-used entry when at
    /// capacity. Concurrent writers race benignly: outputs are
    /// deterministic, so the last writer wins with an identical value.
    pub fn put(
        &self,
        digest: Digest,
        output: String,
        tokens: u32,
        content_type: ContentType,
        strategies: Vec<String>,
    ) {
        let entry = CacheEntry {
            output,
            tokens,
            content_type,
            strategies,
            inserted: Instant::now(),
        };
        self.lock().map.put(digest, entry);
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        CacheStats {
            entries: inner.map.len(),
            capacity: inner.map.cap().get(),
            hits: inner.hits,
            misses: inner.misses,
        }
    }

    /// Drops every entry; counters keep accumulating.
    pub fn clear(&self) {
        self.lock().map.clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
