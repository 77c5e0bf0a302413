//! Read-only resolution
//!
//! Combines every reason an asset view might have to disable editing into a
//! single flag. Rules are checked in a fixed order and the first one that
//! holds decides. Loading and error states resolve to read-only so nothing is
//! edited against an unknown permission.
//!
//! ```text
//! explicit override → fetch error → not fetched → !can_edit
//!     → version history mode → old version → editable
//! ```

use crate::permission::can_edit;
use crate::version::is_viewing_old_version;
use asset_types::{AssetSnapshot, PermissionLevel, QueryState, ReadOnlyContext, ReadOnlyResult};
use std::fmt;

/// Flat inputs of the read-only decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadOnlyInputs {
    /// Forced read-only from the embedding view
    pub explicit_read_only: Option<bool>,
    /// The asset fetch failed
    pub is_error: bool,
    /// The asset fetch completed
    pub is_fetched: bool,
    /// The user's role on the asset
    pub permission: Option<PermissionLevel>,
    /// The user is browsing past versions
    pub is_version_history_mode: bool,
    /// The requested version is not the latest
    pub is_viewing_old_version: bool,
}

/// Rule that made an asset read-only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadOnlyReason {
    /// Caller forced read-only
    ExplicitOverride,
    /// Fetch failed
    FetchError,
    /// Fetch not completed
    NotFetched,
    /// Role does not allow editing
    InsufficientPermission,
    /// Browsing version history
    VersionHistoryMode,
    /// Displaying a version other than the latest
    OldVersion,
}

impl ReadOnlyReason {
    /// Short machine-friendly label
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ReadOnlyReason::ExplicitOverride => "explicit_override",
            ReadOnlyReason::FetchError => "fetch_error",
            ReadOnlyReason::NotFetched => "not_fetched",
            ReadOnlyReason::InsufficientPermission => "insufficient_permission",
            ReadOnlyReason::VersionHistoryMode => "version_history_mode",
            ReadOnlyReason::OldVersion => "old_version",
        }
    }
}

impl fmt::Display for ReadOnlyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First rule that makes the asset read-only, or `None` when editable
#[must_use]
pub fn explain_read_only(inputs: &ReadOnlyInputs) -> Option<ReadOnlyReason> {
    if inputs.explicit_read_only == Some(true) {
        Some(ReadOnlyReason::ExplicitOverride)
    } else if inputs.is_error {
        Some(ReadOnlyReason::FetchError)
    } else if !inputs.is_fetched {
        Some(ReadOnlyReason::NotFetched)
    } else if !can_edit(inputs.permission) {
        Some(ReadOnlyReason::InsufficientPermission)
    } else if inputs.is_version_history_mode {
        Some(ReadOnlyReason::VersionHistoryMode)
    } else if inputs.is_viewing_old_version {
        Some(ReadOnlyReason::OldVersion)
    } else {
        None
    }
}

/// Resolve editability from flat inputs
#[must_use]
pub fn resolve_read_only(inputs: &ReadOnlyInputs) -> ReadOnlyResult {
    let reason = explain_read_only(inputs);
    match reason {
        Some(reason) => tracing::trace!(%reason, "asset resolved read-only"),
        None => tracing::trace!("asset resolved editable"),
    }

    ReadOnlyResult {
        is_fetched: inputs.is_fetched,
        is_error: inputs.is_error,
        is_viewing_old_version: inputs.is_viewing_old_version,
        is_read_only: reason.is_some(),
    }
}

/// Read-only resolution bound to one view's context
///
/// Holds the caller-supplied view state and derives a result from whatever
/// the query cache currently knows about the asset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOnlyResolver {
    context: ReadOnlyContext,
}

impl ReadOnlyResolver {
    /// Create resolver for a view context
    #[inline]
    #[must_use]
    pub const fn new(context: ReadOnlyContext) -> Self {
        Self { context }
    }

    /// View context
    #[inline]
    #[must_use]
    pub const fn context(&self) -> &ReadOnlyContext {
        &self.context
    }

    /// Flatten the cache state and context into decision inputs
    #[must_use]
    pub fn inputs(&self, state: &QueryState<AssetSnapshot>) -> ReadOnlyInputs {
        let snapshot = state.data();
        let versions = snapshot.map_or(&[][..], |s| s.versions.as_slice());

        ReadOnlyInputs {
            explicit_read_only: self.context.explicit_read_only,
            is_error: state.is_error(),
            is_fetched: state.is_fetched(),
            permission: snapshot.and_then(|s| s.permission),
            is_version_history_mode: self.context.is_version_history_mode,
            is_viewing_old_version: is_viewing_old_version(
                self.context.requested_version_number,
                versions,
            ),
        }
    }

    /// Resolve editability for the current cache state
    #[must_use]
    pub fn resolve(&self, state: &QueryState<AssetSnapshot>) -> ReadOnlyResult {
        resolve_read_only(&self.inputs(state))
    }

    /// Resolve and report the deciding rule
    #[must_use]
    pub fn explain(&self, state: &QueryState<AssetSnapshot>) -> Option<ReadOnlyReason> {
        explain_read_only(&self.inputs(state))
    }
}
