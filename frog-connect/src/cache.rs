//! Shared cache client for data-fetching call sites.
//!
//! [`CacheClient::new`] applies the default policy: entries live for
//! five minutes after insertion and the cache holds at most 10 000
//! entries. Concurrent loads for the same key are coalesced into a
//! single execution of the loader.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

/// Default time-to-live for cached entries.
pub const DEFAULT_TIME_TO_LIVE: Duration = Duration::from_secs(5 * 60);

/// Default maximum number of cached entries.
pub const DEFAULT_MAX_CAPACITY: u64 = 10_000;

/// Shared, internally synchronised cache keyed by string.
#[derive(Clone)]
#[allow(missing_debug_implementations)]
pub struct CacheClient<V = serde_json::Value>
where
    V: Clone + Send + Sync + 'static,
{
    inner: Cache<String, V>,
}

impl<V> CacheClient<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Creates a cache client with the default policy.
    #[must_use]
    pub fn new() -> Self {
        CacheClientBuilder::new().build()
    }

    /// Starts building a cache client with a custom policy.
    #[must_use]
    pub fn builder() -> CacheClientBuilder {
        CacheClientBuilder::new()
    }

    /// Returns the cached value for `key`, if present and fresh.
    pub async fn get(&self, key: &str) -> Option<V> {
        self.inner.get(key).await
    }

    /// Inserts `value` under `key`, replacing any previous entry.
    pub async fn insert(&self, key: impl Into<String>, value: V) {
        self.inner.insert(key.into(), value).await;
    }

    /// Returns the value for `key`, running `init` to produce it on a
    /// miss. Concurrent callers for the same key share one execution.
    pub async fn fetch_with<F>(&self, key: impl Into<String>, init: F) -> V
    where
        F: Future<Output = V>,
    {
        self.inner.get_with(key.into(), init).await
    }

    /// Fallible variant of [`CacheClient::fetch_with`]: a loader error is
    /// returned to every waiting caller and nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns the loader's error, shared behind an [`Arc`].
    pub async fn try_fetch_with<F, E>(&self, key: impl Into<String>, init: F) -> Result<V, Arc<E>>
    where
        F: Future<Output = Result<V, E>>,
        E: Send + Sync + 'static,
    {
        self.inner.try_get_with(key.into(), init).await
    }

    /// Drops the entry for `key`, if present.
    pub async fn invalidate(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    /// Drops every entry.
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Approximate number of live entries.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

impl<V> Default for CacheClient<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a [`CacheClient`] with a non-default policy.
#[derive(Debug, Clone, Copy)]
pub struct CacheClientBuilder {
    time_to_live: Duration,
    max_capacity: u64,
}

impl CacheClientBuilder {
    /// Starts from the default policy.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            time_to_live: DEFAULT_TIME_TO_LIVE,
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }

    /// Sets how long entries stay valid after insertion.
    #[must_use]
    pub const fn time_to_live(mut self, ttl: Duration) -> Self {
        self.time_to_live = ttl;
        self
    }

    /// Sets the maximum number of cached entries.
    #[must_use]
    pub const fn max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }

    /// Builds the cache client.
    #[must_use]
    pub fn build<V>(self) -> CacheClient<V>
    where
        V: Clone + Send + Sync + 'static,
    {
        CacheClient {
            inner: Cache::builder()
                .time_to_live(self.time_to_live)
                .max_capacity(self.max_capacity)
                .build(),
        }
    }
}

impl Default for CacheClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
