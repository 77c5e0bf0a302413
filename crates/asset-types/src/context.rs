//! Request-scoped read-only resolution inputs and outputs

use serde::{Deserialize, Serialize};

/// View state supplied by the caller when asking whether an asset is editable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReadOnlyContext {
    /// Forced read-only from the embedding view, e.g. an embed or share page
    pub explicit_read_only: Option<bool>,
    /// The user is browsing past versions
    pub is_version_history_mode: bool,
    /// Version the view asked for, `None` for latest
    pub requested_version_number: Option<u32>,
}

impl ReadOnlyContext {
    /// Context for the live asset with no overrides
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With explicit read-only flag
    #[inline]
    #[must_use]
    pub fn with_explicit_read_only(mut self, read_only: bool) -> Self {
        self.explicit_read_only = Some(read_only);
        self
    }

    /// With version history mode
    #[inline]
    #[must_use]
    pub fn with_version_history_mode(mut self, enabled: bool) -> Self {
        self.is_version_history_mode = enabled;
        self
    }

    /// With requested version number
    #[inline]
    #[must_use]
    pub fn with_requested_version(mut self, version_number: u32) -> Self {
        self.requested_version_number = Some(version_number);
        self
    }
}

/// Derived editability of the displayed asset version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadOnlyResult {
    /// The asset fetch completed successfully at least once
    pub is_fetched: bool,
    /// The asset fetch failed
    pub is_error: bool,
    /// The requested version is not the latest
    pub is_viewing_old_version: bool,
    /// Edit surface must be disabled
    pub is_read_only: bool,
}

impl ReadOnlyResult {
    /// Whether the edit surface may be enabled
    #[inline]
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        !self.is_read_only
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_context_is_live_view() {
        let ctx = ReadOnlyContext::new();
        assert_eq!(ctx.explicit_read_only, None);
        assert!(!ctx.is_version_history_mode);
        assert_eq!(ctx.requested_version_number, None);
    }

    #[test]
    fn builder_sets_fields() {
        let ctx = ReadOnlyContext::new()
            .with_explicit_read_only(true)
            .with_version_history_mode(true)
            .with_requested_version(3);

        assert_eq!(ctx.explicit_read_only, Some(true));
        assert!(ctx.is_version_history_mode);
        assert_eq!(ctx.requested_version_number, Some(3));
    }
}
