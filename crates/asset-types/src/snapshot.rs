//! Asset snapshots as returned by the fetch layer
//!
//! A snapshot is immutable once fetched. Version entries are kept in
//! insertion order with the latest version last.

use crate::id::{AssetId, OrganizationId};
use crate::kind::AssetKind;
use crate::permission::{PermissionLevel, WorkspaceSharing};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of an asset's version history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry {
    /// Monotonic version number
    pub version_number: u32,
    /// When this version was written
    pub updated_at: DateTime<Utc>,
}

impl VersionEntry {
    /// Create version entry
    #[inline]
    #[must_use]
    pub const fn new(version_number: u32, updated_at: DateTime<Utc>) -> Self {
        Self {
            version_number,
            updated_at,
        }
    }
}

/// Public link settings of an asset
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PublicAccessSettings {
    /// Whether anyone with the link may open the asset
    pub publicly_accessible: bool,
    /// Link stops working at this instant
    pub public_expiry_date: Option<DateTime<Utc>>,
    /// Password required to open the link
    pub public_password: Option<String>,
}

impl PublicAccessSettings {
    /// Public link without expiry or password
    #[must_use]
    pub fn public() -> Self {
        Self {
            publicly_accessible: true,
            ..Self::default()
        }
    }

    /// With expiry date
    #[must_use]
    pub fn with_expiry(mut self, expiry: DateTime<Utc>) -> Self {
        self.public_expiry_date = Some(expiry);
        self
    }

    /// With password
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.public_password = Some(password.into());
        self
    }
}

/// Versioned asset record as seen by the requesting user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSnapshot {
    /// Asset identifier
    pub id: AssetId,
    /// Asset kind
    pub kind: AssetKind,
    /// Owning organization
    pub organization_id: OrganizationId,
    /// Requesting user's role, if any
    pub permission: Option<PermissionLevel>,
    /// Version history, latest last
    pub versions: Vec<VersionEntry>,
    /// Version this snapshot was materialized at
    pub version_number: u32,
    /// Organization-wide sharing
    #[serde(default)]
    pub workspace_sharing: WorkspaceSharing,
    /// Public link settings
    #[serde(default)]
    pub public_access: PublicAccessSettings,
}

impl AssetSnapshot {
    /// Create snapshot with no permission and no history
    #[must_use]
    pub fn new(id: AssetId, kind: AssetKind, organization_id: OrganizationId) -> Self {
        Self {
            id,
            kind,
            organization_id,
            permission: None,
            versions: Vec::new(),
            version_number: 0,
            workspace_sharing: WorkspaceSharing::None,
            public_access: PublicAccessSettings::default(),
        }
    }

    /// With the requesting user's role
    #[must_use]
    pub fn with_permission(mut self, permission: PermissionLevel) -> Self {
        self.permission = Some(permission);
        self
    }

    /// With version history; `version_number` follows the latest entry
    #[must_use]
    pub fn with_versions(mut self, versions: Vec<VersionEntry>) -> Self {
        if let Some(latest) = versions.last() {
            self.version_number = latest.version_number;
        }
        self.versions = versions;
        self
    }

    /// With version history built from bare numbers, stamped now
    #[must_use]
    pub fn with_version_numbers(self, numbers: &[u32]) -> Self {
        let now = Utc::now();
        let versions = numbers.iter().map(|n| VersionEntry::new(*n, now)).collect();
        self.with_versions(versions)
    }

    /// Pin the materialized version
    #[must_use]
    pub fn at_version(mut self, version_number: u32) -> Self {
        self.version_number = version_number;
        self
    }

    /// With workspace sharing
    #[must_use]
    pub fn with_workspace_sharing(mut self, sharing: WorkspaceSharing) -> Self {
        self.workspace_sharing = sharing;
        self
    }

    /// With public link settings
    #[must_use]
    pub fn with_public_access(mut self, settings: PublicAccessSettings) -> Self {
        self.public_access = settings;
        self
    }

    /// Number of the last version entry
    #[inline]
    #[must_use]
    pub fn latest_version(&self) -> Option<u32> {
        self.versions.last().map(|v| v.version_number)
    }

    /// Lightweight reference for container lookups
    #[inline]
    #[must_use]
    pub fn to_ref(&self) -> AssetRef {
        AssetRef {
            id: self.id,
            kind: self.kind,
            organization_id: self.organization_id,
            workspace_sharing: self.workspace_sharing,
        }
    }
}

/// Reference to an asset with just enough data for a permission check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetRef {
    /// Asset identifier
    pub id: AssetId,
    /// Asset kind
    pub kind: AssetKind,
    /// Owning organization
    pub organization_id: OrganizationId,
    /// Organization-wide sharing
    pub workspace_sharing: WorkspaceSharing,
}

impl AssetRef {
    /// Create reference
    #[inline]
    #[must_use]
    pub const fn new(
        id: AssetId,
        kind: AssetKind,
        organization_id: OrganizationId,
        workspace_sharing: WorkspaceSharing,
    ) -> Self {
        Self {
            id,
            kind,
            organization_id,
            workspace_sharing,
        }
    }
}

/// Fetch key: an asset, optionally pinned to a version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetQuery {
    /// Asset identifier
    pub id: AssetId,
    /// Asset kind
    pub kind: AssetKind,
    /// Requested version, `None` for latest
    pub version_number: Option<u32>,
}

impl AssetQuery {
    /// Query for the latest version
    #[inline]
    #[must_use]
    pub const fn latest(id: AssetId, kind: AssetKind) -> Self {
        Self {
            id,
            kind,
            version_number: None,
        }
    }

    /// Query pinned to a version
    #[inline]
    #[must_use]
    pub const fn at_version(id: AssetId, kind: AssetKind, version_number: u32) -> Self {
        Self {
            id,
            kind,
            version_number: Some(version_number),
        }
    }

    /// Metric query
    #[inline]
    #[must_use]
    pub const fn metric(id: AssetId, version_number: Option<u32>) -> Self {
        Self {
            id,
            kind: AssetKind::Metric,
            version_number,
        }
    }

    /// Dashboard query
    #[inline]
    #[must_use]
    pub const fn dashboard(id: AssetId, version_number: Option<u32>) -> Self {
        Self {
            id,
            kind: AssetKind::Dashboard,
            version_number,
        }
    }

    /// Report query
    #[inline]
    #[must_use]
    pub const fn report(id: AssetId, version_number: Option<u32>) -> Self {
        Self {
            id,
            kind: AssetKind::Report,
            version_number,
        }
    }
}
