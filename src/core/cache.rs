//! In-memory TTL caches.
//!
//! A [`TtlCache`] memoizes one expensive operation. Its state is a single
//! `Option<Arc<CacheEntry<T>>>` that is swapped whole under a write lock, so a reader
//! can never observe a value paired with the wrong timestamp.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

/// A stored value and the instant it was computed.
#[derive(Debug)]
pub struct CacheEntry<T> {
    /// The memoized result.
    pub value: T,
    /// When `value` was produced.
    pub computed_at: Instant,
}

impl<T> CacheEntry<T> {
    /// Time elapsed since the value was computed.
    pub fn age(&self) -> Duration {
        self.computed_at.elapsed()
    }
}

/// Memoizes the last successful result of one operation for a fixed TTL.
///
/// Concurrent callers that miss at the same time each run the computation; the
/// last one to finish wins. The lock is never held across the computation.
#[derive(Debug)]
pub struct TtlCache<T> {
    ttl: Duration,
    slot: RwLock<Option<Arc<CacheEntry<T>>>>,
}

impl<T: Clone> TtlCache<T> {
    /// Creates an empty cache with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// The TTL this cache was built with.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the stored value if it is younger than the TTL.
    pub async fn get_fresh(&self) -> Option<T> {
        let guard = self.slot.read().await;
        match guard.as_ref() {
            Some(entry) if entry.age() < self.ttl => Some(entry.value.clone()),
            _ => None,
        }
    }

    /// Returns the stored value when fresh, otherwise runs `compute` and stores its result.
    ///
    /// # Errors
    ///
    /// Propagates the error from `compute`. The previous state is kept as-is, so the
    /// next call computes again.
    pub async fn get_or_compute<F, Fut, E>(&self, compute: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.get_fresh().await {
            tracing::debug!(ttl = ?self.ttl, "cache hit");
            return Ok(value);
        }
        self.refresh(compute).await
    }

    /// Runs `compute` unconditionally and stores its result on success.
    ///
    /// # Errors
    ///
    /// Propagates the error from `compute`, leaving the stored state untouched.
    pub async fn refresh<F, Fut, E>(&self, compute: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let value = compute().await?;
        let entry = Arc::new(CacheEntry {
            value: value.clone(),
            computed_at: Instant::now(),
        });
        *self.slot.write().await = Some(entry);
        Ok(value)
    }

    /// The current entry regardless of age, if one was ever stored.
    pub async fn snapshot(&self) -> Option<Arc<CacheEntry<T>>> {
        self.slot.read().await.clone()
    }

    /// Drops the stored entry.
    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
    }
}

/// A family of [`TtlCache`]s sharing one TTL, one cache per key.
#[derive(Debug)]
pub struct TtlMap<K, T> {
    ttl: Duration,
    map: RwLock<HashMap<K, Arc<TtlCache<T>>>>,
}

impl<K, T> TtlMap<K, T>
where
    K: Eq + Hash + Clone,
    T: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            map: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cache for `key`, created empty on first use.
    ///
    /// Creating a cache first drops every per-key cache that nobody else holds and
    /// whose value has expired or was never stored.
    pub async fn cache_for(&self, key: &K) -> Arc<TtlCache<T>> {
        if let Some(cache) = self.map.read().await.get(key) {
            return cache.clone();
        }
        let mut guard = self.map.write().await;
        if let Some(cache) = guard.get(key) {
            return cache.clone();
        }
        guard.retain(|_, cache| !reclaimable(cache));
        let cache = Arc::new(TtlCache::new(self.ttl));
        guard.insert(key.clone(), cache.clone());
        cache
    }

    /// Drops every per-key cache that has expired and is not in use.
    pub async fn purge_expired(&self) {
        self.map.write().await.retain(|_, cache| !reclaimable(cache));
    }

    /// Number of per-key caches currently held.
    pub async fn len(&self) -> usize {
        self.map.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.map.read().await.is_empty()
    }

    /// [`TtlCache::get_or_compute`] on the cache for `key`.
    ///
    /// # Errors
    ///
    /// Propagates the error from `compute`.
    pub async fn get_or_compute<F, Fut, E>(&self, key: &K, compute: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.cache_for(key).await.get_or_compute(compute).await
    }

    /// Drops every per-key cache.
    pub async fn clear(&self) {
        self.map.write().await.clear();
    }
}

// Only the map holds it, and it has no fresh value.
fn reclaimable<T>(cache: &Arc<TtlCache<T>>) -> bool {
    if Arc::strong_count(cache) > 1 {
        return false;
    }
    match cache.slot.try_read() {
        Ok(slot) => slot.as_ref().is_none_or(|entry| entry.age() >= cache.ttl),
        Err(_) => false,
    }
}
