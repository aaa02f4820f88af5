//! In-memory TTL cache shared between concurrent requests
//!
//! Provides a `TtlCache` that stores values alongside the time they were
//! written. Entries older than the configured TTL are reported as misses but
//! stay in the map until the next write for the same key replaces them.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::{PoisonError, RwLock};

/// Wrapper struct for a cached value
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    /// The cached value
    data: V,
    /// When the value was cached
    cached_at: DateTime<Utc>,
}

/// Result of a cache hit
#[derive(Debug, Clone, PartialEq)]
pub struct CachedData<V> {
    /// The cached value
    pub data: V,
    /// When the value was originally cached
    pub cached_at: DateTime<Utc>,
}

/// Cache key for an exercise lookup: normalized muscle name plus result limit
///
/// Two requests for the same muscle with different limits are distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    muscle: String,
    limit: u32,
}

impl CacheKey {
    /// Builds a key from an already-normalized muscle name and an effective limit
    pub fn new(muscle: impl Into<String>, limit: u32) -> Self {
        Self {
            muscle: muscle.into(),
            limit,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.muscle, self.limit)
    }
}

/// Process-local cache with a fixed time-to-live
///
/// Reads take a shared lock and writes an exclusive one, so many readers can
/// proceed together while writers are serialized. There is no capacity bound
/// and no background eviction: stale entries are ignored on read and
/// overwritten on the next write for the same key.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
    ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Creates an empty cache whose entries stay fresh for `ttl`
    pub fn new(ttl: std::time::Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: Duration::from_std(ttl).unwrap_or(Duration::MAX),
        }
    }

    /// Returns the configured time-to-live
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Stores `data` under `key`, replacing any previous entry with a freshly
    /// timestamped one
    pub fn write(&self, key: K, data: V) {
        self.write_at(key, data, Utc::now());
    }

    /// Reads a fresh entry for `key`
    ///
    /// Returns `None` if the key is absent or its entry is older than the TTL.
    /// A miss never mutates the cache.
    pub fn read(&self, key: &K) -> Option<CachedData<V>> {
        self.read_at(key, Utc::now())
    }

    /// Number of stored entries, stale ones included
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been stored yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn write_at(&self, key: K, data: V, now: DateTime<Utc>) {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        entries.insert(
            key,
            CacheEntry {
                data,
                cached_at: now,
            },
        );
    }

    pub(crate) fn read_at(&self, key: &K, now: DateTime<Utc>) -> Option<CachedData<V>> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let entry = entries.get(key)?;

        // Fresh up to and including cached_at + ttl
        if now - entry.cached_at > self.ttl {
            return None;
        }

        Some(CachedData {
            data: entry.data.clone(),
            cached_at: entry.cached_at,
        })
    }
}
