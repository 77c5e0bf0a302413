//! Access service
//!
//! Ties the query cache, the read-only resolver, the effective permission
//! model and cascading access into the calls an API layer makes.
//!
//! Every fetch goes through the query cache. Cached snapshots carry the
//! user's effective role (direct grant, workspace sharing, admin override)
//! in `permission`, so read-only resolution and access checks agree.

use crate::cascade::CascadingAccess;
use crate::config::AccessConfig;
use crate::error::{AccessError, AccessResult};
use asset_cache::{AssetQueryCache, AssetRepository, CacheConfig, PermissionCache, RepositoryError};
use asset_policy::{
    check_public_access, compute_effective_permission, has_required_role, ReadOnlyReason,
    ReadOnlyResolver,
};
use asset_types::{
    AssetId, AssetQuery, AssetSnapshot, PermissionLevel, QueryState, ReadOnlyContext,
    ReadOnlyResult, UserId,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Outcome of an access check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Effective role meets the requirement
    Granted(PermissionLevel),
    /// View access through a container
    ViaContainer,
    /// Neither path grants access; carries the effective role, if any
    Denied(Option<PermissionLevel>),
}

impl AccessDecision {
    /// Whether access is allowed
    #[inline]
    #[must_use]
    pub const fn is_granted(&self) -> bool {
        !matches!(self, Self::Denied(_))
    }
}

/// Access checks over one repository
pub struct AccessService<R: AssetRepository + ?Sized> {
    repository: Arc<R>,
    assets: AssetQueryCache,
    cascade: CascadingAccess<R>,
    cascading_enabled: bool,
}

impl<R: AssetRepository + ?Sized> AccessService<R> {
    /// Create with default configuration
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_config(repository, &AccessConfig::default())
    }

    /// Create from configuration
    pub fn with_config(repository: Arc<R>, config: &AccessConfig) -> Self {
        Self::with_caches(
            repository,
            &config.cache,
            &config.permission_cache,
            config.cascading_enabled,
        )
    }

    fn with_caches(
        repository: Arc<R>,
        cache: &CacheConfig,
        permission_cache: &CacheConfig,
        cascading_enabled: bool,
    ) -> Self {
        let cascade = CascadingAccess::new(
            Arc::clone(&repository),
            PermissionCache::with_config(permission_cache),
        );
        Self {
            repository,
            assets: AssetQueryCache::with_config(cache),
            cascade,
            cascading_enabled,
        }
    }

    /// Asset query cache
    #[inline]
    pub fn cache(&self) -> &AssetQueryCache {
        &self.assets
    }

    /// Resolve editability from what the cache already holds
    ///
    /// Never fetches. An asset nobody loaded yet is read-only.
    pub async fn read_only(
        &self,
        user: UserId,
        query: &AssetQuery,
        context: ReadOnlyContext,
    ) -> ReadOnlyResult {
        let state = self.assets.peek(user, query).await;
        ReadOnlyResolver::new(context).resolve(&state)
    }

    /// Load the asset through the cache, then resolve editability
    pub async fn read_only_loaded(
        &self,
        user: UserId,
        query: &AssetQuery,
        context: ReadOnlyContext,
    ) -> ReadOnlyResult {
        let state = self.load(user, query).await;
        ReadOnlyResolver::new(context).resolve(&state)
    }

    /// The rule that makes a loaded asset read-only, if any
    pub async fn read_only_reason(
        &self,
        user: UserId,
        query: &AssetQuery,
        context: ReadOnlyContext,
    ) -> Option<ReadOnlyReason> {
        let state = self.load(user, query).await;
        ReadOnlyResolver::new(context).explain(&state)
    }

    /// Editability of a metric at the context's requested version
    pub async fn metric_read_only(
        &self,
        user: UserId,
        metric: AssetId,
        context: ReadOnlyContext,
    ) -> ReadOnlyResult {
        let query = AssetQuery::metric(metric, query_version(&context));
        self.read_only_loaded(user, &query, context).await
    }

    /// Editability of a dashboard at the context's requested version
    pub async fn dashboard_read_only(
        &self,
        user: UserId,
        dashboard: AssetId,
        context: ReadOnlyContext,
    ) -> ReadOnlyResult {
        let query = AssetQuery::dashboard(dashboard, query_version(&context));
        self.read_only_loaded(user, &query, context).await
    }

    /// Editability of a report at the context's requested version
    pub async fn report_read_only(
        &self,
        user: UserId,
        report: AssetId,
        context: ReadOnlyContext,
    ) -> ReadOnlyResult {
        let query = AssetQuery::report(report, query_version(&context));
        self.read_only_loaded(user, &query, context).await
    }

    /// Role the user effectively holds on an asset
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Repository`] when the asset or the user's
    /// memberships cannot be fetched.
    pub async fn effective_permission(
        &self,
        user: UserId,
        query: &AssetQuery,
    ) -> AccessResult<Option<PermissionLevel>> {
        Ok(self.snapshot(user, query).await?.permission)
    }

    /// Decide whether the user holds `required` on an asset
    ///
    /// View access falls back to cascading access when enabled.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Repository`] when a lookup fails.
    pub async fn check_access(
        &self,
        user: UserId,
        query: &AssetQuery,
        required: PermissionLevel,
    ) -> AccessResult<AccessDecision> {
        let effective = self.effective_permission(user, query).await?;
        if let Some(level) = effective.filter(|_| has_required_role(effective, required)) {
            return Ok(AccessDecision::Granted(level));
        }

        if required == PermissionLevel::CanView
            && self.cascading_enabled
            && self.cascade.check(user, query.id, query.kind).await?
        {
            return Ok(AccessDecision::ViaContainer);
        }

        tracing::debug!(
            asset = %query.id,
            kind = %query.kind,
            %required,
            effective = ?effective,
            "access denied"
        );
        Ok(AccessDecision::Denied(effective))
    }

    /// Like [`check_access`](Self::check_access), failing on denial
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::AccessDenied`] when access is not granted.
    pub async fn require_access(
        &self,
        user: UserId,
        query: &AssetQuery,
        required: PermissionLevel,
    ) -> AccessResult<AccessDecision> {
        let decision = self.check_access(user, query, required).await?;
        if decision.is_granted() {
            Ok(decision)
        } else {
            Err(AccessError::access_denied(query.id, query.kind, required))
        }
    }

    /// Admit a viewer through the asset's public link if they lack access
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::PublicAccess`] when the link rejects the
    /// request, or [`AccessError::Repository`] when a lookup fails.
    pub async fn check_public(
        &self,
        user: UserId,
        query: &AssetQuery,
        password: Option<&str>,
    ) -> AccessResult<()> {
        self.check_public_at(user, query, password, Utc::now()).await
    }

    /// [`check_public`](Self::check_public) at a fixed instant
    ///
    /// # Errors
    ///
    /// As [`check_public`](Self::check_public).
    pub async fn check_public_at(
        &self,
        user: UserId,
        query: &AssetQuery,
        password: Option<&str>,
        now: DateTime<Utc>,
    ) -> AccessResult<()> {
        let decision = self
            .check_access(user, query, PermissionLevel::CanView)
            .await?;
        let snapshot = self.snapshot(user, query).await?;

        check_public_access(decision.is_granted(), &snapshot.public_access, password, now)?;
        Ok(())
    }

    /// Forget everything cached about an asset
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Cache`] if invalidation cannot be scheduled.
    pub fn invalidate(&self, asset: AssetId) -> AccessResult<()> {
        self.assets.invalidate_asset(asset)?;
        self.cascade.cache().invalidate_asset(asset)?;
        tracing::debug!(%asset, "asset invalidated");
        Ok(())
    }

    /// Forget every cascading decision
    ///
    /// Needed after container membership or container grants change, since
    /// decisions are keyed by the contained asset.
    pub fn invalidate_cascading(&self) {
        self.cascade.cache().invalidate_all();
    }

    async fn load(&self, user: UserId, query: &AssetQuery) -> QueryState<AssetSnapshot> {
        self.assets
            .load_with(user, query, || self.fetch_effective(user, query))
            .await
    }

    async fn snapshot(&self, user: UserId, query: &AssetQuery) -> AccessResult<Arc<AssetSnapshot>> {
        let snapshot = self
            .assets
            .try_load_with(user, query, || self.fetch_effective(user, query))
            .await?;
        Ok(snapshot)
    }

    /// Fetch a snapshot whose `permission` is the user's effective role
    async fn fetch_effective(
        &self,
        user: UserId,
        query: &AssetQuery,
    ) -> Result<AssetSnapshot, RepositoryError> {
        let mut snapshot = self.repository.fetch_asset(user, query).await?;
        let memberships = self.repository.memberships(user).await?;

        snapshot.permission = compute_effective_permission(
            snapshot.permission,
            snapshot.workspace_sharing,
            snapshot.organization_id,
            &memberships,
        );
        Ok(snapshot)
    }
}

/// Version to fetch for a view; zero means latest
fn query_version(context: &ReadOnlyContext) -> Option<u32> {
    context.requested_version_number.filter(|v| *v != 0)
}

impl<R: AssetRepository + ?Sized> std::fmt::Debug for AccessService<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessService")
            .field("cascading_enabled", &self.cascading_enabled)
            .field("cache", &self.assets.stats())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_grants() {
        assert!(AccessDecision::Granted(PermissionLevel::CanView).is_granted());
        assert!(AccessDecision::ViaContainer.is_granted());
        assert!(!AccessDecision::Denied(Some(PermissionLevel::CanView)).is_granted());
        assert!(!AccessDecision::Denied(None).is_granted());
    }

    #[test]
    fn zero_version_fetches_latest() {
        assert_eq!(query_version(&ReadOnlyContext::new()), None);
        assert_eq!(query_version(&ReadOnlyContext::new().with_requested_version(0)), None);
        assert_eq!(query_version(&ReadOnlyContext::new().with_requested_version(4)), Some(4));
    }
}
