//! Asset Cache
//!
//! The fetch layer the read-only policy reads from.
//!
//! # Architecture
//!
//! ```text
//! caller → AssetQueryCache ──miss──→ AssetRepository (database, API, fixtures)
//!              │
//!              └──→ QueryState<AssetSnapshot>: Pending | Ready | Failed
//! ```
//!
//! The repository is injected. The cache never decides anything: it only
//! records what the last fetch returned so the policy layer can derive
//! editability from it.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cache;
pub mod config;
pub mod error;
pub mod permission_cache;
pub mod repository;

// Re-exports for convenience
pub use asset_types::QueryState;
pub use cache::{AssetQueryCache, CacheStats, QueryKey};
pub use config::CacheConfig;
pub use error::{CacheError, RepositoryError};
pub use permission_cache::{PermissionCache, PermissionKey};
pub use repository::AssetRepository;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
