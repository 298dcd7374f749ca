//! TTL cache implementation
//!
//! Process-wide key→payload store with fixed time-based expiry and an
//! injected clock so expiry is deterministic under test.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

/// Default time-to-live for cached responses: 30 minutes.
pub const CACHE_TTL_SECS: i64 = 1800;

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// A stored payload together with its write time.
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    payload: T,
    stored_at: DateTime<Utc>,
}

/// Snapshot of cache occupancy, for logging and the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of live entries (expired-but-unread entries included)
    pub entries: usize,
    /// Entry keys, sorted for stable output
    pub keys: Vec<String>,
}

/// An in-memory cache with a fixed TTL.
///
/// Entries expire lazily: `get` evicts an entry older than the TTL and
/// reports it as absent; nothing sweeps the map proactively. `peek` skips
/// the age check entirely, which is what the fallback read in
/// [`crate::data::DataClient`] relies on when a live fetch fails.
///
/// There is no capacity bound. Entry count is bounded by the distinct
/// query shapes one session issues, so growth is modest in practice; a
/// very long-lived session issuing unbounded distinct queries would grow
/// the map without limit.
///
/// The map sits behind a `Mutex` because concurrent batch fetches share
/// the owning client. The lock covers a single lookup/evict/insert and is
/// never held across an await point.
pub struct TtlCache<T> {
    entries: Mutex<HashMap<String, CacheEntry<T>>>,
    ttl: Duration,
    clock: Clock,
}

impl<T: Clone> TtlCache<T> {
    /// Creates a cache with the default 30-minute TTL and the system clock.
    pub fn new() -> Self {
        Self::with_ttl_secs(CACHE_TTL_SECS)
    }

    /// Creates a cache with a custom TTL in seconds.
    pub fn with_ttl_secs(ttl_secs: i64) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: Duration::seconds(ttl_secs),
            clock: Arc::new(Utc::now),
        }
    }

    /// Creates a cache with a custom TTL and a controllable time source.
    #[cfg(test)]
    pub fn with_clock(ttl_secs: i64, clock: Clock) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: Duration::seconds(ttl_secs),
            clock,
        }
    }

    /// Returns the payload for `key` if it is younger than the TTL.
    ///
    /// An entry exactly at or past the TTL is evicted and reported absent;
    /// asking again is also absent, with no error.
    pub fn get(&self, key: &str) -> Option<T> {
        let mut entries = self.lock();
        let now = (self.clock)();

        match entries.get(key) {
            Some(entry) if now - entry.stored_at < self.ttl => {
                debug!("cache hit for {key}");
                Some(entry.payload.clone())
            }
            Some(_) => {
                debug!("cache expired for {key}");
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Returns the payload for `key` regardless of age; never evicts.
    ///
    /// Used only for the stale-data fallback when a live fetch fails.
    pub fn peek(&self, key: &str) -> Option<T> {
        self.lock().get(key).map(|entry| entry.payload.clone())
    }

    /// Stores `payload` under `key`, replacing any existing entry and
    /// resetting its expiry.
    pub fn put(&self, key: &str, payload: T) {
        let now = (self.clock)();
        self.lock().insert(
            key.to_string(),
            CacheEntry {
                payload,
                stored_at: now,
            },
        );
        debug!("cached data for {key}");
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.lock().clear();
        debug!("cache cleared");
    }

    /// Reports entry count and keys.
    pub fn stats(&self) -> CacheStats {
        let entries = self.lock();
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        CacheStats {
            entries: entries.len(),
            keys,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<T>>> {
        // A poisoned lock only means another thread panicked mid-write;
        // the map itself is still plain data, so keep using it.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> Default for TtlCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for TtlCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("TtlCache")
            .field("entries", &entries.len())
            .field("ttl", &self.ttl)
            .finish()
    }
}
