//! Time-to-live cache with single-flight refresh.
//!
//! Entries are never evicted: an expired entry is invisible to [`TtlCache::get`]
//! but still served by [`TtlCache::last_known`] so aggregations can fall back
//! to the last good value when a refresh fails.
//!
//! # Refresh Coordination
//!
//! ```text
//! get(key) ── hit ──► return
//!    │ miss
//!    v
//! begin_refresh(key)  ◄── waits while another task refreshes the same key
//!    │
//!    v
//! get(key) ── hit ──► return (the other task already refreshed)
//!    │ miss
//!    v
//! fetch ──► set(key) ──► guard dropped, waiters re-check
//! ```

use dashmap::DashMap;
use std::{future::Future, hash::Hash, sync::Arc, time::Duration};
use tokio::{
    sync::{OwnedSemaphorePermit, Semaphore},
    time::Instant,
};

/// A cached value and when it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub data: V,
    pub stored_at: Instant,
}

impl<V> CacheEntry<V> {
    #[must_use]
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() < ttl
    }
}

/// Held while refreshing one key. Other refreshers of that key wait until it drops.
pub struct RefreshGuard {
    _permit: Option<OwnedSemaphorePermit>,
}

pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: DashMap<K, CacheEntry<V>>,
    refresh_locks: DashMap<K, Arc<Semaphore>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entries: DashMap::new(), refresh_locks: DashMap::new() }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the value only while `now - stored_at < ttl`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<V> {
        self.entries
            .get(key)
            .filter(|entry| entry.is_fresh(self.ttl))
            .map(|entry| entry.data.clone())
    }

    /// Returns the last stored value regardless of age.
    #[must_use]
    pub fn last_known(&self, key: &K) -> Option<V> {
        self.entries.get(key).map(|entry| entry.data.clone())
    }

    /// Stores `value`, overwriting any previous entry and resetting its age.
    pub fn set(&self, key: K, value: V) {
        self.entries.insert(key, CacheEntry { data: value, stored_at: Instant::now() });
    }

    /// Waits for exclusive refresh rights on `key`.
    ///
    /// Callers must re-check [`get`](Self::get) after acquiring the guard: the
    /// previous holder has usually just stored a fresh value.
    pub async fn begin_refresh(&self, key: &K) -> RefreshGuard {
        // Clone the semaphore out so the map shard is not locked while waiting
        let semaphore = Arc::clone(
            self.refresh_locks
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Semaphore::new(1)))
                .value(),
        );

        // Never closed; a closed semaphore degrades to an unguarded refresh
        let permit = semaphore
            .acquire_owned()
            .await
            .inspect_err(|_| tracing::error!("refresh semaphore closed unexpectedly"))
            .ok();

        RefreshGuard { _permit: permit }
    }

    /// Returns the fresh value for `key`, running `fetch` at most once across
    /// concurrent callers when it is missing or expired.
    ///
    /// A failed fetch stores nothing and returns the error.
    ///
    /// # Errors
    ///
    /// Returns whatever `fetch` returns on failure.
    pub async fn get_or_refresh<F, Fut, E>(&self, key: &K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }

        let _guard = self.begin_refresh(key).await;
        if let Some(value) = self.get(key) {
            tracing::trace!("cache refreshed by concurrent caller");
            return Ok(value);
        }

        let value = fetch().await?;
        self.set(key.clone(), value.clone());
        Ok(value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
