//! Access service configuration
//!
//! Loaded from TOML. Every section is optional and falls back to its
//! default:
//!
//! ```toml
//! cascading_enabled = true
//!
//! [cache]
//! max_capacity = 10000
//! ttl_secs = 300
//!
//! [permission_cache]
//! max_capacity = 10000
//! ttl_secs = 30
//!
//! [logging]
//! level = "info"
//! json = false
//! ```

use crate::error::ConfigError;
use asset_cache::CacheConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Log output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Access service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Asset query cache
    pub cache: CacheConfig,
    /// Cascading-access decision cache
    pub permission_cache: CacheConfig,
    /// Fall back to container access when direct access is missing
    pub cascading_enabled: bool,
    /// Log output
    pub logging: LoggingConfig,
}

impl AccessConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With asset cache settings
    #[inline]
    #[must_use]
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    /// With permission cache settings
    #[inline]
    #[must_use]
    pub fn with_permission_cache(mut self, cache: CacheConfig) -> Self {
        self.permission_cache = cache;
        self
    }

    /// With cascading access on or off
    #[inline]
    #[must_use]
    pub fn with_cascading(mut self, enabled: bool) -> Self {
        self.cascading_enabled = enabled;
        self
    }

    /// With log filter directive
    #[inline]
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }

    /// Parse and validate TOML text
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed input and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns the first field that is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_cache("cache", &self.cache)?;
        validate_cache("permission_cache", &self.permission_cache)?;
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::invalid("logging.level", "must not be empty"));
        }
        Ok(())
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            permission_cache: CacheConfig::new(10_000, 30),
            cascading_enabled: true,
            logging: LoggingConfig::default(),
        }
    }
}

fn validate_cache(section: &'static str, cache: &CacheConfig) -> Result<(), ConfigError> {
    if cache.max_capacity == 0 {
        return Err(ConfigError::invalid(section, "max_capacity must be positive"));
    }
    if cache.ttl_secs == 0 {
        return Err(ConfigError::invalid(section, "ttl_secs must be positive"));
    }
    Ok(())
}
