//! Cascading access
//!
//! A user who cannot see an asset directly may still reach it through a
//! container they can view: a metric inside a dashboard, a dashboard
//! referenced by a chat, anything filed in a collection.

use crate::error::AccessResult;
use asset_cache::{AssetRepository, PermissionCache};
use asset_policy::{compute_effective_permission, has_required_role};
use asset_types::{AssetId, AssetKind, AssetRef, OrganizationMembership, PermissionLevel, UserId};
use std::sync::Arc;

/// Container kinds that grant view access, in the order they are tried
#[must_use]
pub fn container_order(kind: AssetKind) -> &'static [AssetKind] {
    match kind {
        AssetKind::Metric => &[
            AssetKind::Dashboard,
            AssetKind::Chat,
            AssetKind::Collection,
            AssetKind::Report,
        ],
        AssetKind::Dashboard => &[AssetKind::Chat, AssetKind::Collection],
        AssetKind::Chat => &[AssetKind::Collection],
        AssetKind::Report | AssetKind::Collection => &[],
    }
}

/// Container-based view access with memoized decisions
pub struct CascadingAccess<R: AssetRepository + ?Sized> {
    repository: Arc<R>,
    cache: PermissionCache,
}

impl<R: AssetRepository + ?Sized> CascadingAccess<R> {
    /// Create over a repository and decision cache
    pub fn new(repository: Arc<R>, cache: PermissionCache) -> Self {
        Self { repository, cache }
    }

    /// Decision cache
    #[inline]
    pub fn cache(&self) -> &PermissionCache {
        &self.cache
    }

    /// Whether `user` can view `asset` through some container
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Repository`](crate::AccessError::Repository)
    /// when a lookup fails. Failures are not memoized.
    pub async fn check(&self, user: UserId, asset: AssetId, kind: AssetKind) -> AccessResult<bool> {
        let order = container_order(kind);
        if order.is_empty() {
            return Ok(false);
        }

        if let Some(allowed) = self.cache.get(user, asset, kind).await {
            tracing::debug!(%asset, %kind, allowed, "cascading decision cache hit");
            return Ok(allowed);
        }

        let allowed = self.walk(user, asset, kind, order).await?;
        self.cache.insert(user, asset, kind, allowed).await;

        if allowed {
            tracing::debug!(%asset, %kind, "access granted through container");
        } else {
            tracing::debug!(%asset, %kind, "no viewable container");
        }
        Ok(allowed)
    }

    async fn walk(
        &self,
        user: UserId,
        asset: AssetId,
        kind: AssetKind,
        order: &[AssetKind],
    ) -> AccessResult<bool> {
        // Loaded on the first container found.
        let mut memberships: Option<Vec<OrganizationMembership>> = None;

        for container_kind in order {
            let containers = self.containers(asset, kind, *container_kind).await?;

            for container in &containers {
                if memberships.is_none() {
                    memberships = Some(self.repository.memberships(user).await?);
                }
                let orgs = memberships.as_deref().unwrap_or_default();

                if self.can_view_container(user, container, orgs).await? {
                    tracing::trace!(
                        %asset,
                        container = %container.id,
                        container_kind = %container.kind,
                        "viewable container found"
                    );
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }

    async fn containers(
        &self,
        asset: AssetId,
        kind: AssetKind,
        container_kind: AssetKind,
    ) -> AccessResult<Vec<AssetRef>> {
        let repo = &self.repository;
        let found = match container_kind {
            AssetKind::Dashboard => repo.dashboards_containing_metric(asset).await?,
            AssetKind::Report => repo.reports_containing_metric(asset).await?,
            AssetKind::Chat => repo.chats_containing_asset(asset, kind).await?,
            AssetKind::Collection => repo.collections_containing_asset(asset, kind).await?,
            AssetKind::Metric => Vec::new(),
        };
        Ok(found)
    }

    async fn can_view_container(
        &self,
        user: UserId,
        container: &AssetRef,
        memberships: &[OrganizationMembership],
    ) -> AccessResult<bool> {
        let direct = self
            .repository
            .direct_permission(user, container.id, container.kind)
            .await?;
        let effective = compute_effective_permission(
            direct,
            container.workspace_sharing,
            container.organization_id,
            memberships,
        );
        Ok(has_required_role(effective, PermissionLevel::CanView))
    }
}

impl<R: AssetRepository + ?Sized> std::fmt::Debug for CascadingAccess<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CascadingAccess").finish_non_exhaustive()
    }
}
