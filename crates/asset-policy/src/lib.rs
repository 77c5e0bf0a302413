//! Asset Policy
//!
//! Pure decision functions that gate the edit surface of an asset.
//!
//! # Core Operations
//!
//! - **Version comparison**: is the requested version the latest one?
//! - **Permission predicates**: does a role allow editing, sharing, viewing?
//! - **Read-only resolution**: fail-closed combination of override, fetch
//!   state, permission, history mode and version
//! - **Effective permission**: direct grant, workspace sharing and admin
//!   override folded into one role
//! - **Public access**: link expiry and password checks
//!
//! Nothing here performs I/O. Every function is total over its inputs.
//!
//! # Example
//!
//! ```rust
//! use asset_policy::{resolve_read_only, ReadOnlyInputs};
//! use asset_types::PermissionLevel;
//!
//! let inputs = ReadOnlyInputs {
//!     is_fetched: true,
//!     permission: Some(PermissionLevel::CanEdit),
//!     ..ReadOnlyInputs::default()
//! };
//! assert!(!resolve_read_only(&inputs).is_read_only);
//!
//! let viewer = ReadOnlyInputs {
//!     permission: Some(PermissionLevel::CanView),
//!     ..inputs
//! };
//! assert!(resolve_read_only(&viewer).is_read_only);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod effective;
pub mod error;
pub mod permission;
pub mod public_access;
pub mod read_only;
pub mod version;

// Re-exports for convenience
pub use effective::{check_permission_access, compute_effective_permission, has_required_role};
pub use error::PublicAccessError;
pub use permission::{can_edit, can_filter, can_share, can_view, is_owner};
pub use public_access::check_public_access;
pub use read_only::{explain_read_only, resolve_read_only, ReadOnlyInputs, ReadOnlyReason, ReadOnlyResolver};
pub use version::is_viewing_old_version;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with asset policy
    pub use crate::{
        can_edit, check_public_access, compute_effective_permission, is_viewing_old_version,
        resolve_read_only, PublicAccessError, ReadOnlyInputs, ReadOnlyReason, ReadOnlyResolver,
    };
    pub use asset_types::{PermissionLevel, ReadOnlyContext, ReadOnlyResult};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
