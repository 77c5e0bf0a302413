//! Cache sizing

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Capacity and expiry of one cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries
    pub max_capacity: u64,
    /// Entry time to live in seconds
    pub ttl_secs: u64,
}

impl CacheConfig {
    /// Create config
    #[inline]
    #[must_use]
    pub const fn new(max_capacity: u64, ttl_secs: u64) -> Self {
        Self {
            max_capacity,
            ttl_secs,
        }
    }

    /// Time to live as a duration
    #[inline]
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    /// 10,000 entries, five minutes
    fn default() -> Self {
        Self::new(10_000, 300)
    }
}
