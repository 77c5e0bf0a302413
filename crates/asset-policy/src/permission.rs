//! Capability predicates over permission levels
//!
//! A missing permission means the user has no role on the asset and every
//! predicate answers `false`.

use asset_types::PermissionLevel;

/// Whether the role may modify asset content
#[inline]
#[must_use]
pub fn can_edit(permission: Option<PermissionLevel>) -> bool {
    at_least(permission, PermissionLevel::CanEdit)
}

/// Whether the role may open the asset
#[inline]
#[must_use]
pub fn can_view(permission: Option<PermissionLevel>) -> bool {
    at_least(permission, PermissionLevel::CanView)
}

/// Whether the role may apply filters
#[inline]
#[must_use]
pub fn can_filter(permission: Option<PermissionLevel>) -> bool {
    at_least(permission, PermissionLevel::CanFilter)
}

/// Whether the role may change sharing settings
#[inline]
#[must_use]
pub fn can_share(permission: Option<PermissionLevel>) -> bool {
    at_least(permission, PermissionLevel::FullAccess)
}

/// Whether the role is the owner
#[inline]
#[must_use]
pub fn is_owner(permission: Option<PermissionLevel>) -> bool {
    permission == Some(PermissionLevel::Owner)
}

fn at_least(permission: Option<PermissionLevel>, required: PermissionLevel) -> bool {
    permission.is_some_and(|p| p.is_sufficient_for(&required))
}

#[cfg(test)]
mod tests {
    use super::*;
    use PermissionLevel::*;

    #[test]
    fn edit_requires_can_edit_or_higher() {
        assert!(can_edit(Some(Owner)));
        assert!(can_edit(Some(FullAccess)));
        assert!(can_edit(Some(CanEdit)));
        assert!(!can_edit(Some(CanFilter)));
        assert!(!can_edit(Some(CanView)));
        assert!(!can_edit(None));
    }

    #[test]
    fn share_requires_full_access() {
        assert!(can_share(Some(Owner)));
        assert!(can_share(Some(FullAccess)));
        assert!(!can_share(Some(CanEdit)));
        assert!(!can_share(None));
    }

    #[test]
    fn view_and_filter() {
        assert!(can_view(Some(CanView)));
        assert!(!can_view(None));
        assert!(can_filter(Some(CanFilter)));
        assert!(!can_filter(Some(CanView)));
    }

    #[test]
    fn owner_only() {
        assert!(is_owner(Some(Owner)));
        assert!(!is_owner(Some(FullAccess)));
        assert!(!is_owner(None));
    }
}
