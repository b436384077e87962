//! In-memory response cache with stale fallback
//!
//! Provides a `ResponseCache` that memoizes the result of a keyed async fetch for a
//! freshness window, serving the last good value when a refresh fails.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

/// A stored value together with the moment it was stored
struct CacheEntry {
    /// The cached data, type-erased so one cache can hold every query shape
    data: Box<dyn Any + Send + Sync>,
    /// When the data was stored
    stored_at: Instant,
}

/// Where the data returned by the cache came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Fetched just now
    Fresh,
    /// Served from a cache entry still inside its TTL
    Cached,
    /// The fetch failed and an expired entry was served instead
    Stale,
    /// The fetch failed and nothing was cached, so the default value was served
    Empty,
}

impl DataSource {
    /// Whether the data reflects a failed refresh
    pub fn is_degraded(self) -> bool {
        matches!(self, DataSource::Stale | DataSource::Empty)
    }
}

/// Result of a cache lookup, including where the data came from
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    /// The data
    pub data: T,
    /// How the data was obtained
    pub source: DataSource,
}

/// Memoizes keyed async fetches in memory
///
/// Each key holds at most one entry, overwritten on every successful fetch. Entries
/// are never evicted; freshness is checked lazily when a key is read. The key space
/// is expected to be small (one key per distinct query), so the table is unbounded.
///
/// The table lock is held only while reading or writing an entry, never across a
/// fetch. Two concurrent misses on the same key may therefore both fetch; the later
/// successful write wins.
#[derive(Default)]
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseCache")
            .field("entries", &self.len())
            .finish()
    }
}

impl ResponseCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently holding an entry
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no entry has been stored yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the data for `key`, fetching it if the cached entry is missing or older than `ttl`
    ///
    /// Never fails: on fetch failure the previous entry is returned regardless of age, or
    /// `T::default()` if there is none. Failures are logged.
    pub async fn get_or_fetch<T, E, F, Fut>(&self, key: &str, ttl: Duration, fetch: F) -> T
    where
        T: Clone + Default + Send + Sync + 'static,
        E: fmt::Display,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.get_or_fetch_traced(key, ttl, fetch).await.data
    }

    /// Same as [`get_or_fetch`](Self::get_or_fetch), also reporting where the data came from
    pub async fn get_or_fetch_traced<T, E, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        fetch: F,
    ) -> Fetched<T>
    where
        T: Clone + Default + Send + Sync + 'static,
        E: fmt::Display,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some((data, age)) = self.lookup::<T>(key) {
            if age < ttl {
                debug!(key, age_ms = age.as_millis() as u64, "cache hit");
                return Fetched {
                    data,
                    source: DataSource::Cached,
                };
            }
        }

        debug!(key, "cache miss, fetching");
        match fetch().await {
            Ok(data) => {
                self.store(key, data.clone());
                Fetched {
                    data,
                    source: DataSource::Fresh,
                }
            }
            Err(error) => match self.lookup::<T>(key) {
                Some((data, age)) => {
                    warn!(
                        key,
                        %error,
                        age_secs = age.as_secs(),
                        "fetch failed, serving stale data"
                    );
                    Fetched {
                        data,
                        source: DataSource::Stale,
                    }
                }
                None => {
                    warn!(key, %error, "fetch failed with nothing cached, serving empty data");
                    Fetched {
                        data: T::default(),
                        source: DataSource::Empty,
                    }
                }
            },
        }
    }

    /// Reads the entry for `key` with its age; an entry of another type counts as absent
    fn lookup<T: Clone + 'static>(&self, key: &str) -> Option<(T, Duration)> {
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let entry = entries.get(key)?;
        let data = entry.data.downcast_ref::<T>()?.clone();
        Some((data, entry.stored_at.elapsed()))
    }

    /// Replaces the entry for `key`
    fn store<T: Send + Sync + 'static>(&self, key: &str, data: T) {
        let entry = CacheEntry {
            data: Box::new(data),
            stored_at: Instant::now(),
        };
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), entry);
    }
}
