//! Error types for the access service
//!
//! Provides error handling for:
//! - Repository failures surfaced by permission checks
//! - Public link rejections
//! - Cache maintenance
//! - Configuration loading

use asset_cache::{CacheError, RepositoryError};
use asset_policy::PublicAccessError;
use asset_types::{AssetId, AssetKind, PermissionLevel};
use std::path::PathBuf;

/// Main access error type
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// Repository lookup failed
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Public link rejected the request
    #[error("public access denied: {0}")]
    PublicAccess(#[from] PublicAccessError),

    /// User lacks the required role
    #[error("access denied: {required} required on {kind} {asset}")]
    AccessDenied {
        /// Asset the user tried to reach
        asset: AssetId,
        /// Kind of that asset
        kind: AssetKind,
        /// Role the operation needs
        required: PermissionLevel,
    },

    /// Cache maintenance failed
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AccessError {
    /// Create access denied error
    #[inline]
    pub fn access_denied(asset: AssetId, kind: AssetKind, required: PermissionLevel) -> Self {
        Self::AccessDenied {
            asset,
            kind,
            required,
        }
    }

    /// Check if error is retryable
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Repository(err) if err.is_retryable())
    }

    /// HTTP status the API answers with
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::PublicAccess(err) => err.status_code(),
            Self::AccessDenied { .. } => 403,
            Self::Repository(RepositoryError::NotFound { .. } | RepositoryError::VersionNotFound { .. }) => 404,
            Self::Repository(RepositoryError::Unavailable(_)) => 503,
            Self::Repository(RepositoryError::Internal(_)) | Self::Cache(_) | Self::Config(_) => 500,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File that failed to load
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for this schema
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("invalid value for {field}: {message}")]
    Invalid {
        /// Config key, dotted for nested sections
        field: &'static str,
        /// What is wrong with the value
        message: String,
    },
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create invalid value error
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

/// Result type alias for access operations
pub type AccessResult<T> = Result<T, AccessError>;
