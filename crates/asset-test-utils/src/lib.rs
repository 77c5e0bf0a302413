//! Testing utilities for the asset access workspace
//!
//! Shared test helpers, fixtures, and an in-memory repository.

#![allow(missing_docs)]

use asset_cache::{AssetRepository, RepositoryError};
use asset_types::{
    AssetId, AssetKind, AssetQuery, AssetRef, AssetSnapshot, OrganizationId,
    OrganizationMembership, OrganizationRole, PermissionLevel, UserId, WorkspaceSharing,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
struct State {
    assets: HashMap<AssetId, AssetSnapshot>,
    grants: HashMap<(UserId, AssetId), PermissionLevel>,
    memberships: HashMap<UserId, Vec<OrganizationMembership>>,
    // (container, member)
    links: Vec<(AssetId, AssetId)>,
    failure: Option<RepositoryError>,
}

/// Repository backed by hash maps, with call counting and failure injection
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    state: RwLock<State>,
    fetch_calls: AtomicUsize,
    container_calls: AtomicUsize,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an asset; its `permission` field is ignored in favor of grants
    pub fn insert_asset(&self, snapshot: AssetSnapshot) -> AssetId {
        let id = snapshot.id;
        self.state.write().assets.insert(id, snapshot);
        id
    }

    pub fn grant(&self, user: UserId, asset: AssetId, level: PermissionLevel) {
        self.state.write().grants.insert((user, asset), level);
    }

    pub fn revoke(&self, user: UserId, asset: AssetId) {
        self.state.write().grants.remove(&(user, asset));
    }

    pub fn add_membership(&self, user: UserId, organization_id: OrganizationId, role: OrganizationRole) {
        self.state
            .write()
            .memberships
            .entry(user)
            .or_default()
            .push(OrganizationMembership::new(organization_id, role));
    }

    /// Record that `container` contains `member`
    pub fn link(&self, container: AssetId, member: AssetId) {
        self.state.write().links.push((container, member));
    }

    /// Make every call fail until [`recover`](Self::recover)
    pub fn fail_with(&self, error: RepositoryError) {
        self.state.write().failure = Some(error);
    }

    pub fn recover(&self) {
        self.state.write().failure = None;
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn container_calls(&self) -> usize {
        self.container_calls.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> Result<(), RepositoryError> {
        match &self.state.read().failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn containers_of(&self, member: AssetId, kind: AssetKind) -> Result<Vec<AssetRef>, RepositoryError> {
        self.container_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        let state = self.state.read();
        Ok(state
            .links
            .iter()
            .filter(|(_, m)| *m == member)
            .filter_map(|(c, _)| state.assets.get(c))
            .filter(|asset| asset.kind == kind)
            .map(AssetSnapshot::to_ref)
            .collect())
    }
}

#[async_trait::async_trait]
impl AssetRepository for InMemoryRepository {
    async fn fetch_asset(
        &self,
        user: UserId,
        query: &AssetQuery,
    ) -> Result<AssetSnapshot, RepositoryError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        let state = self.state.read();
        let stored = state
            .assets
            .get(&query.id)
            .filter(|a| a.kind == query.kind)
            .ok_or_else(|| RepositoryError::not_found(query.id, query.kind))?;

        let mut snapshot = stored.clone();
        if let Some(version) = query.version_number {
            if !snapshot.versions.iter().any(|v| v.version_number == version) {
                return Err(RepositoryError::VersionNotFound {
                    id: query.id,
                    version,
                });
            }
            snapshot.version_number = version;
        }
        snapshot.permission = state.grants.get(&(user, query.id)).copied();
        Ok(snapshot)
    }

    async fn direct_permission(
        &self,
        user: UserId,
        asset: AssetId,
        _kind: AssetKind,
    ) -> Result<Option<PermissionLevel>, RepositoryError> {
        self.check_failure()?;
        Ok(self.state.read().grants.get(&(user, asset)).copied())
    }

    async fn memberships(&self, user: UserId) -> Result<Vec<OrganizationMembership>, RepositoryError> {
        self.check_failure()?;
        Ok(self
            .state
            .read()
            .memberships
            .get(&user)
            .cloned()
            .unwrap_or_default())
    }

    async fn dashboards_containing_metric(
        &self,
        metric: AssetId,
    ) -> Result<Vec<AssetRef>, RepositoryError> {
        self.containers_of(metric, AssetKind::Dashboard)
    }

    async fn reports_containing_metric(
        &self,
        metric: AssetId,
    ) -> Result<Vec<AssetRef>, RepositoryError> {
        self.containers_of(metric, AssetKind::Report)
    }

    async fn chats_containing_asset(
        &self,
        asset: AssetId,
        _kind: AssetKind,
    ) -> Result<Vec<AssetRef>, RepositoryError> {
        self.containers_of(asset, AssetKind::Chat)
    }

    async fn collections_containing_asset(
        &self,
        asset: AssetId,
        _kind: AssetKind,
    ) -> Result<Vec<AssetRef>, RepositoryError> {
        self.containers_of(asset, AssetKind::Collection)
    }
}

/// Asset with no history and no sharing
pub fn create_asset(kind: AssetKind, organization_id: OrganizationId) -> AssetSnapshot {
    AssetSnapshot::new(AssetId::new(), kind, organization_id)
}

/// Asset with the given version numbers, latest last
pub fn create_versioned_asset(
    kind: AssetKind,
    organization_id: OrganizationId,
    versions: &[u32],
) -> AssetSnapshot {
    create_asset(kind, organization_id).with_version_numbers(versions)
}

pub fn create_metric(organization_id: OrganizationId, versions: &[u32]) -> AssetSnapshot {
    create_versioned_asset(AssetKind::Metric, organization_id, versions)
}

pub fn create_dashboard(organization_id: OrganizationId, versions: &[u32]) -> AssetSnapshot {
    create_versioned_asset(AssetKind::Dashboard, organization_id, versions)
}

pub fn create_report(organization_id: OrganizationId, versions: &[u32]) -> AssetSnapshot {
    create_versioned_asset(AssetKind::Report, organization_id, versions)
}

pub fn create_shared_asset(
    kind: AssetKind,
    organization_id: OrganizationId,
    sharing: WorkspaceSharing,
) -> AssetSnapshot {
    create_asset(kind, organization_id).with_workspace_sharing(sharing)
}
