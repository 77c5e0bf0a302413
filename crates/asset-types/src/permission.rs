//! Permission roles and organization membership
//!
//! [`PermissionLevel`] is totally ordered: `CanView < CanFilter < CanEdit <
//! FullAccess < Owner`. A higher role satisfies every requirement a lower
//! role satisfies.

use crate::error::ParseError;
use crate::id::OrganizationId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A user's access tier on an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionLevel {
    /// Read only
    CanView,
    /// Read and apply filters
    CanFilter,
    /// Modify content
    CanEdit,
    /// Modify and share
    FullAccess,
    /// Everything, including delete and ownership transfer
    Owner,
}

impl PermissionLevel {
    /// All levels, lowest first
    pub const ALL: [PermissionLevel; 5] = [
        PermissionLevel::CanView,
        PermissionLevel::CanFilter,
        PermissionLevel::CanEdit,
        PermissionLevel::FullAccess,
        PermissionLevel::Owner,
    ];

    /// Wire name
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            PermissionLevel::CanView => "can_view",
            PermissionLevel::CanFilter => "can_filter",
            PermissionLevel::CanEdit => "can_edit",
            PermissionLevel::FullAccess => "full_access",
            PermissionLevel::Owner => "owner",
        }
    }

    /// Whether this level meets `required`
    #[inline]
    #[must_use]
    pub fn is_sufficient_for(&self, required: &PermissionLevel) -> bool {
        self >= required
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionLevel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| ParseError::new("permission level", s))
    }
}

/// Organization-wide sharing setting of an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkspaceSharing {
    /// Not shared with the workspace
    #[default]
    None,
    /// Every member may view
    CanView,
    /// Every member may edit
    CanEdit,
    /// Every member has full access
    FullAccess,
}

impl WorkspaceSharing {
    /// Role granted to organization members, if any
    #[inline]
    #[must_use]
    pub const fn as_permission(&self) -> Option<PermissionLevel> {
        match self {
            WorkspaceSharing::None => None,
            WorkspaceSharing::CanView => Some(PermissionLevel::CanView),
            WorkspaceSharing::CanEdit => Some(PermissionLevel::CanEdit),
            WorkspaceSharing::FullAccess => Some(PermissionLevel::FullAccess),
        }
    }

    /// Whether the asset is shared at all
    #[inline]
    #[must_use]
    pub const fn is_shared(&self) -> bool {
        !matches!(self, WorkspaceSharing::None)
    }
}

/// A user's role inside an organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationRole {
    /// Administers the workspace
    WorkspaceAdmin,
    /// Administers data sources and datasets
    DataAdmin,
    /// May query any dataset
    Querier,
    /// May query permitted datasets only
    RestrictedQuerier,
    /// Read-only member
    Viewer,
}

impl OrganizationRole {
    /// Admins are treated as owners of every asset in their organization
    #[inline]
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(
            self,
            OrganizationRole::WorkspaceAdmin | OrganizationRole::DataAdmin
        )
    }
}

/// Membership of a user in one organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganizationMembership {
    /// Organization the user belongs to
    pub organization_id: OrganizationId,
    /// Role inside that organization
    pub role: OrganizationRole,
}

impl OrganizationMembership {
    /// Create membership
    #[inline]
    #[must_use]
    pub const fn new(organization_id: OrganizationId, role: OrganizationRole) -> Self {
        Self {
            organization_id,
            role,
        }
    }
}
