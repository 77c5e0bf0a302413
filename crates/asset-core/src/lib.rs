//! Asset Core - access decisions for shared assets
//!
//! Combines the pieces below it into one service:
//! - Query cache of asset snapshots per user
//! - Fail-closed read-only resolution for editors
//! - Effective permission from direct grants, workspace sharing and
//!   organization admin roles
//! - Cascading view access through dashboards, chats, collections and
//!   reports
//! - Public link checks
//!
//! # Example
//!
//! ```rust,ignore
//! use asset_core::{AccessConfig, AccessService, init_tracing};
//! use asset_types::{AssetQuery, ReadOnlyContext};
//! use std::sync::Arc;
//!
//! # async fn example(repo: Arc<impl asset_cache::AssetRepository>, user: asset_types::UserId, metric: asset_types::AssetId) {
//! let config = AccessConfig::from_file("access.toml").unwrap_or_default();
//! init_tracing(&config.logging);
//!
//! let service = AccessService::with_config(repo, &config);
//! let result = service
//!     .metric_read_only(user, metric, ReadOnlyContext::new())
//!     .await;
//! println!("read only: {}", result.is_read_only);
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cascade;
pub mod config;
pub mod error;
pub mod service;
pub mod telemetry;

// Re-exports for convenience
pub use cascade::{container_order, CascadingAccess};
pub use config::{AccessConfig, LoggingConfig};
pub use error::{AccessError, AccessResult, ConfigError};
pub use service::{AccessDecision, AccessService};
pub use telemetry::init_tracing;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the access service
    pub use crate::{AccessConfig, AccessDecision, AccessError, AccessResult, AccessService};
    pub use asset_cache::AssetRepository;
    pub use asset_types::{
        AssetId, AssetKind, AssetQuery, PermissionLevel, ReadOnlyContext, ReadOnlyResult, UserId,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
