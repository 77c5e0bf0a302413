//! Error types for the fetch layer
//!
//! Provides error handling for:
//! - Repository lookups (asset, version, container, membership)
//! - Cache maintenance

use asset_types::{AssetId, AssetKind};

/// Errors returned by an [`AssetRepository`](crate::AssetRepository)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// Asset does not exist or was deleted
    #[error("asset not found: {kind} {id}")]
    NotFound {
        /// Requested asset
        id: AssetId,
        /// Requested kind
        kind: AssetKind,
    },

    /// Asset exists but not at the requested version
    #[error("version {version} not found for asset {id}")]
    VersionNotFound {
        /// Requested asset
        id: AssetId,
        /// Requested version number
        version: u32,
    },

    /// Backend temporarily unreachable
    #[error("repository unavailable: {0}")]
    Unavailable(String),

    /// Any other backend failure
    #[error("repository error: {0}")]
    Internal(String),
}

impl RepositoryError {
    /// Create not found error
    #[inline]
    pub fn not_found(id: AssetId, kind: AssetKind) -> Self {
        Self::NotFound { id, kind }
    }

    /// Check if a retry may succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Errors during cache maintenance
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Predicate invalidation rejected by the cache
    #[error("invalidation failed: {0}")]
    Invalidation(String),
}
