//! Asset Types
//!
//! Shared data model for the asset access workspace.
//!
//! # Overview
//!
//! - **Identifiers**: [`AssetId`], [`UserId`], [`OrganizationId`]
//! - **Assets**: [`AssetKind`], [`AssetSnapshot`], [`VersionEntry`], [`AssetQuery`]
//! - **Permissions**: [`PermissionLevel`], [`WorkspaceSharing`], [`OrganizationRole`]
//! - **Fetch state**: [`QueryState`]
//! - **Read-only resolution**: [`ReadOnlyContext`], [`ReadOnlyResult`]
//!
//! # Example
//!
//! ```rust
//! use asset_types::{AssetId, AssetKind, AssetSnapshot, OrganizationId, PermissionLevel};
//!
//! let snapshot = AssetSnapshot::new(AssetId::new(), AssetKind::Metric, OrganizationId::new())
//!     .with_permission(PermissionLevel::CanEdit)
//!     .with_version_numbers(&[1, 2, 3]);
//!
//! assert_eq!(snapshot.latest_version(), Some(3));
//! assert_eq!(snapshot.version_number, 3);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod context;
pub mod error;
pub mod id;
pub mod kind;
pub mod permission;
pub mod query;
pub mod snapshot;

// Re-exports
pub use context::{ReadOnlyContext, ReadOnlyResult};
pub use error::ParseError;
pub use id::{AssetId, OrganizationId, UserId};
pub use kind::AssetKind;
pub use permission::{OrganizationMembership, OrganizationRole, PermissionLevel, WorkspaceSharing};
pub use query::QueryState;
pub use snapshot::{AssetQuery, AssetRef, AssetSnapshot, PublicAccessSettings, VersionEntry};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with asset types
    pub use crate::{
        AssetId, AssetKind, AssetQuery, AssetRef, AssetSnapshot, OrganizationId,
        OrganizationMembership, OrganizationRole, PermissionLevel, PublicAccessSettings,
        QueryState, ReadOnlyContext, ReadOnlyResult, UserId, VersionEntry, WorkspaceSharing,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
