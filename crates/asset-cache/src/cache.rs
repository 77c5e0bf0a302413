//! Query cache for asset snapshots using moka
//!
//! Each entry is the [`QueryState`] of one `(user, query)` pair. Only
//! settled states are stored: a missing entry reads as `Pending`. Failures
//! are stored so readers can see them, and are retried on the next load.

use crate::config::CacheConfig;
use crate::error::{CacheError, RepositoryError};
use crate::repository::AssetRepository;
use asset_types::{AssetId, AssetQuery, AssetSnapshot, QueryState, UserId};
use moka::future::Cache;
use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Statistics for cache performance monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of entries in cache
    pub entry_count: u64,
    /// Loads answered from cache
    pub hits: u64,
    /// Loads that went to the repository
    pub misses: u64,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Cache key: one user's view of one asset version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryKey {
    /// Requesting user
    pub user: UserId,
    /// Requested asset and version
    pub query: AssetQuery,
}

impl QueryKey {
    /// Create key
    #[inline]
    #[must_use]
    pub const fn new(user: UserId, query: AssetQuery) -> Self {
        Self { user, query }
    }
}

/// Concurrent cache of asset fetch states
#[derive(Debug, Clone)]
pub struct AssetQueryCache {
    inner: Cache<QueryKey, QueryState<AssetSnapshot>>,
    counters: Arc<Counters>,
}

impl AssetQueryCache {
    /// Create cache with max capacity and no expiry
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self::from_builder(Cache::builder().max_capacity(max_capacity))
    }

    /// Create cache from config
    #[inline]
    #[must_use]
    pub fn with_config(config: &CacheConfig) -> Self {
        Self::from_builder(
            Cache::builder()
                .max_capacity(config.max_capacity)
                .time_to_live(config.ttl()),
        )
    }

    fn from_builder(
        builder: moka::future::CacheBuilder<
            QueryKey,
            QueryState<AssetSnapshot>,
            Cache<QueryKey, QueryState<AssetSnapshot>>,
        >,
    ) -> Self {
        Self {
            inner: builder.support_invalidation_closures().build(),
            counters: Arc::new(Counters::default()),
        }
    }

    /// Current state without fetching
    pub async fn peek(&self, user: UserId, query: &AssetQuery) -> QueryState<AssetSnapshot> {
        self.inner
            .get(&QueryKey::new(user, *query))
            .await
            .unwrap_or_default()
    }

    /// Load through the repository on a miss
    pub async fn load<R>(
        &self,
        repository: &R,
        user: UserId,
        query: &AssetQuery,
    ) -> QueryState<AssetSnapshot>
    where
        R: AssetRepository + ?Sized,
    {
        self.load_with(user, query, || repository.fetch_asset(user, query))
            .await
    }

    /// Load with a custom fetch on a miss
    ///
    /// Concurrent loads of the same key share one fetch. A stored failure is
    /// dropped and fetched again.
    pub async fn load_with<F, Fut>(
        &self,
        user: UserId,
        query: &AssetQuery,
        fetch: F,
    ) -> QueryState<AssetSnapshot>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<AssetSnapshot, RepositoryError>>,
    {
        let key = QueryKey::new(user, *query);

        match self.inner.get(&key).await {
            Some(state @ QueryState::Ready(_)) => {
                self.counters.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(asset = %query.id, kind = %query.kind, "query cache hit");
                return state;
            }
            Some(QueryState::Failed(_)) => {
                self.inner.invalidate(&key).await;
            }
            _ => {}
        }

        self.counters.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(asset = %query.id, kind = %query.kind, "query cache miss");

        let asset = query.id;
        self.inner
            .get_with(key, async move {
                match fetch().await {
                    Ok(snapshot) => QueryState::ready(snapshot),
                    Err(err) => {
                        tracing::warn!(%asset, error = %err, "asset fetch failed");
                        QueryState::failed(err.to_string())
                    }
                }
            })
            .await
    }

    /// [`load_with`](Self::load_with), returning the snapshot or the error
    ///
    /// # Errors
    ///
    /// Returns the fetch's own error when this call ran the fetch. A
    /// failure from a concurrent load that this call joined is reported as
    /// [`RepositoryError::Unavailable`] with the stored message.
    pub async fn try_load_with<F, Fut>(
        &self,
        user: UserId,
        query: &AssetQuery,
        fetch: F,
    ) -> Result<Arc<AssetSnapshot>, RepositoryError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<AssetSnapshot, RepositoryError>>,
    {
        let mut own_error = None;
        let slot = &mut own_error;
        let state = self
            .load_with(user, query, move || async move {
                let result = fetch().await;
                if let Err(err) = &result {
                    *slot = Some(err.clone());
                }
                result
            })
            .await;

        match state {
            QueryState::Ready(snapshot) => Ok(snapshot),
            QueryState::Failed(message) => {
                Err(own_error.unwrap_or_else(|| RepositoryError::Unavailable(message)))
            }
            QueryState::Pending => Err(RepositoryError::Internal(
                "load settled without a result".to_string(),
            )),
        }
    }

    /// Seed an entry with a known snapshot
    pub async fn prime(&self, user: UserId, query: &AssetQuery, snapshot: AssetSnapshot) {
        self.inner
            .insert(QueryKey::new(user, *query), QueryState::ready(snapshot))
            .await;
    }

    /// Drop one user's entry for one query
    pub async fn invalidate(&self, user: UserId, query: &AssetQuery) {
        self.inner.invalidate(&QueryKey::new(user, *query)).await;
    }

    /// Drop every entry of an asset, all versions and users
    ///
    /// # Errors
    ///
    /// Fails only if the cache was built without invalidation closures.
    pub fn invalidate_asset(&self, asset: AssetId) -> Result<(), CacheError> {
        self.inner
            .invalidate_entries_if(move |key, _| key.query.id == asset)
            .map(|_| ())
            .map_err(|e| CacheError::Invalidation(e.to_string()))
    }

    /// Invalidate all entries
    #[inline]
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Apply pending evictions so counts are exact
    pub async fn sync(&self) {
        self.inner.run_pending_tasks().await;
    }

    /// Get cache statistics
    #[inline]
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entry_count: self.inner.entry_count(),
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for AssetQueryCache {
    /// Create cache with default config
    fn default() -> Self {
        Self::with_config(&CacheConfig::default())
    }
}
