//! Version comparator

use asset_types::VersionEntry;

/// Whether `requested` points at something other than the latest version
///
/// An absent or zero request means "latest" and is never old. Otherwise the
/// request is compared with the last entry of `versions`. An empty history
/// has no latest entry, so any concrete request counts as old.
#[inline]
#[must_use]
pub fn is_viewing_old_version(requested: Option<u32>, versions: &[VersionEntry]) -> bool {
    match requested {
        None | Some(0) => false,
        Some(requested) => versions.last().map(|v| v.version_number) != Some(requested),
    }
}
