//! Memoized cascading-access decisions

use crate::config::CacheConfig;
use crate::error::CacheError;
use asset_types::{AssetId, AssetKind, UserId};
use moka::future::Cache;

/// Key of one cascading-access decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PermissionKey {
    /// User being checked
    pub user: UserId,
    /// Asset being reached
    pub asset: AssetId,
    /// Kind of the asset
    pub kind: AssetKind,
}

/// Short-lived cache of cascading-access booleans
#[derive(Debug, Clone)]
pub struct PermissionCache {
    inner: Cache<PermissionKey, bool>,
}

impl PermissionCache {
    /// Create cache from config
    #[must_use]
    pub fn with_config(config: &CacheConfig) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(config.max_capacity)
                .time_to_live(config.ttl())
                .support_invalidation_closures()
                .build(),
        }
    }

    /// Cached decision, if any
    pub async fn get(&self, user: UserId, asset: AssetId, kind: AssetKind) -> Option<bool> {
        self.inner.get(&PermissionKey { user, asset, kind }).await
    }

    /// Store a decision
    pub async fn insert(&self, user: UserId, asset: AssetId, kind: AssetKind, allowed: bool) {
        self.inner
            .insert(PermissionKey { user, asset, kind }, allowed)
            .await;
    }

    /// Drop every decision about an asset
    ///
    /// # Errors
    ///
    /// Fails only if the cache was built without invalidation closures.
    pub fn invalidate_asset(&self, asset: AssetId) -> Result<(), CacheError> {
        self.inner
            .invalidate_entries_if(move |key, _| key.asset == asset)
            .map(|_| ())
            .map_err(|e| CacheError::Invalidation(e.to_string()))
    }

    /// Drop every decision
    #[inline]
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

impl Default for PermissionCache {
    /// 10,000 entries, thirty seconds
    fn default() -> Self {
        Self::with_config(&CacheConfig::new(10_000, 30))
    }
}
