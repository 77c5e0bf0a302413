//! Asset repository interface
//!
//! The fetch layer behind the query cache. Implementations talk to whatever
//! backs the product (database, HTTP API, fixtures in tests).

use crate::error::RepositoryError;
use asset_types::{
    AssetId, AssetKind, AssetQuery, AssetRef, AssetSnapshot, OrganizationMembership,
    PermissionLevel, UserId,
};
use std::sync::Arc;

/// Source of asset snapshots and sharing relationships
#[async_trait::async_trait]
pub trait AssetRepository: Send + Sync {
    /// Fetch an asset as seen by `user`
    ///
    /// The snapshot's `permission` is the user's direct grant.
    async fn fetch_asset(
        &self,
        user: UserId,
        query: &AssetQuery,
    ) -> Result<AssetSnapshot, RepositoryError>;

    /// The user's direct grant on an asset
    async fn direct_permission(
        &self,
        user: UserId,
        asset: AssetId,
        kind: AssetKind,
    ) -> Result<Option<PermissionLevel>, RepositoryError>;

    /// The user's organization memberships
    async fn memberships(&self, user: UserId) -> Result<Vec<OrganizationMembership>, RepositoryError>;

    /// Live dashboards that contain a metric
    async fn dashboards_containing_metric(
        &self,
        metric: AssetId,
    ) -> Result<Vec<AssetRef>, RepositoryError>;

    /// Live reports that contain a metric
    async fn reports_containing_metric(
        &self,
        metric: AssetId,
    ) -> Result<Vec<AssetRef>, RepositoryError>;

    /// Live chats that reference an asset
    async fn chats_containing_asset(
        &self,
        asset: AssetId,
        kind: AssetKind,
    ) -> Result<Vec<AssetRef>, RepositoryError>;

    /// Live collections that contain an asset
    async fn collections_containing_asset(
        &self,
        asset: AssetId,
        kind: AssetKind,
    ) -> Result<Vec<AssetRef>, RepositoryError>;
}

#[async_trait::async_trait]
impl<R: AssetRepository + ?Sized> AssetRepository for Arc<R> {
    async fn fetch_asset(
        &self,
        user: UserId,
        query: &AssetQuery,
    ) -> Result<AssetSnapshot, RepositoryError> {
        (**self).fetch_asset(user, query).await
    }

    async fn direct_permission(
        &self,
        user: UserId,
        asset: AssetId,
        kind: AssetKind,
    ) -> Result<Option<PermissionLevel>, RepositoryError> {
        (**self).direct_permission(user, asset, kind).await
    }

    async fn memberships(&self, user: UserId) -> Result<Vec<OrganizationMembership>, RepositoryError> {
        (**self).memberships(user).await
    }

    async fn dashboards_containing_metric(
        &self,
        metric: AssetId,
    ) -> Result<Vec<AssetRef>, RepositoryError> {
        (**self).dashboards_containing_metric(metric).await
    }

    async fn reports_containing_metric(
        &self,
        metric: AssetId,
    ) -> Result<Vec<AssetRef>, RepositoryError> {
        (**self).reports_containing_metric(metric).await
    }

    async fn chats_containing_asset(
        &self,
        asset: AssetId,
        kind: AssetKind,
    ) -> Result<Vec<AssetRef>, RepositoryError> {
        (**self).chats_containing_asset(asset, kind).await
    }

    async fn collections_containing_asset(
        &self,
        asset: AssetId,
        kind: AssetKind,
    ) -> Result<Vec<AssetRef>, RepositoryError> {
        (**self).collections_containing_asset(asset, kind).await
    }
}
