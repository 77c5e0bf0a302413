//! Effective permission
//!
//! A user's role on an asset comes from three places:
//! - a direct grant on the asset,
//! - the asset's workspace sharing, for members of the asset's organization,
//! - organization admin roles, which act as `Owner` inside their organization.
//!
//! The effective role is the highest of those that apply.

use asset_types::{OrganizationId, OrganizationMembership, PermissionLevel, WorkspaceSharing};

fn is_org_admin(organization_id: OrganizationId, memberships: &[OrganizationMembership]) -> bool {
    memberships
        .iter()
        .any(|m| m.organization_id == organization_id && m.role.is_admin())
}

fn is_org_member(organization_id: OrganizationId, memberships: &[OrganizationMembership]) -> bool {
    memberships
        .iter()
        .any(|m| m.organization_id == organization_id)
}

fn workspace_grant(
    workspace_sharing: WorkspaceSharing,
    organization_id: OrganizationId,
    memberships: &[OrganizationMembership],
) -> Option<PermissionLevel> {
    if is_org_member(organization_id, memberships) {
        workspace_sharing.as_permission()
    } else {
        None
    }
}

/// Highest role the user holds on an asset owned by `organization_id`
#[must_use]
pub fn compute_effective_permission(
    direct: Option<PermissionLevel>,
    workspace_sharing: WorkspaceSharing,
    organization_id: OrganizationId,
    memberships: &[OrganizationMembership],
) -> Option<PermissionLevel> {
    if is_org_admin(organization_id, memberships) {
        return Some(PermissionLevel::Owner);
    }

    let workspace = workspace_grant(workspace_sharing, organization_id, memberships);
    direct.max(workspace)
}

/// Whether the user holds one of the exact roles in `required`
///
/// Unlike [`has_required_role`] this does not walk the hierarchy: callers
/// list every acceptable role. Admins of the asset's organization always
/// pass.
#[must_use]
pub fn check_permission_access(
    current: Option<PermissionLevel>,
    required: &[PermissionLevel],
    organization_id: OrganizationId,
    memberships: &[OrganizationMembership],
    workspace_sharing: WorkspaceSharing,
) -> bool {
    if is_org_admin(organization_id, memberships) {
        return true;
    }

    if let Some(workspace) = workspace_grant(workspace_sharing, organization_id, memberships) {
        if required.contains(&workspace) {
            return true;
        }
    }

    current.is_some_and(|p| required.contains(&p))
}

/// Whether an effective role meets `required` in the hierarchy
#[inline]
#[must_use]
pub fn has_required_role(effective: Option<PermissionLevel>, required: PermissionLevel) -> bool {
    effective.is_some_and(|p| p.is_sufficient_for(&required))
}

#[cfg(test)]
mod tests {
    use super::*;
    use asset_types::OrganizationRole;

    fn member(org: OrganizationId, role: OrganizationRole) -> Vec<OrganizationMembership> {
        vec![OrganizationMembership::new(org, role)]
    }

    #[test]
    fn admin_becomes_owner_in_own_org() {
        let org = OrganizationId::new();
        for role in [OrganizationRole::WorkspaceAdmin, OrganizationRole::DataAdmin] {
            let effective =
                compute_effective_permission(None, WorkspaceSharing::None, org, &member(org, role));
            assert_eq!(effective, Some(PermissionLevel::Owner));
        }
    }

    #[test]
    fn admin_of_other_org_gets_nothing() {
        let org = OrganizationId::new();
        let other = OrganizationId::new();
        let effective = compute_effective_permission(
            None,
            WorkspaceSharing::FullAccess,
            org,
            &member(other, OrganizationRole::WorkspaceAdmin),
        );
        assert_eq!(effective, None);
    }

    #[test]
    fn workspace_sharing_applies_to_members() {
        let org = OrganizationId::new();
        let effective = compute_effective_permission(
            None,
            WorkspaceSharing::CanEdit,
            org,
            &member(org, OrganizationRole::Viewer),
        );
        assert_eq!(effective, Some(PermissionLevel::CanEdit));
    }

    #[test]
    fn highest_of_direct_and_workspace() {
        let org = OrganizationId::new();
        let memberships = member(org, OrganizationRole::Querier);

        let effective = compute_effective_permission(
            Some(PermissionLevel::CanView),
            WorkspaceSharing::FullAccess,
            org,
            &memberships,
        );
        assert_eq!(effective, Some(PermissionLevel::FullAccess));

        let effective = compute_effective_permission(
            Some(PermissionLevel::Owner),
            WorkspaceSharing::CanView,
            org,
            &memberships,
        );
        assert_eq!(effective, Some(PermissionLevel::Owner));
    }

    #[test]
    fn direct_only_without_membership() {
        let effective = compute_effective_permission(
            Some(PermissionLevel::CanFilter),
            WorkspaceSharing::FullAccess,
            OrganizationId::new(),
            &[],
        );
        assert_eq!(effective, Some(PermissionLevel::CanFilter));
    }

    #[test]
    fn check_access_exact_roles() {
        let org = OrganizationId::new();
        let memberships = member(org, OrganizationRole::Viewer);

        assert!(check_permission_access(
            Some(PermissionLevel::CanEdit),
            &[PermissionLevel::CanEdit, PermissionLevel::Owner],
            org,
            &memberships,
            WorkspaceSharing::None,
        ));
        assert!(!check_permission_access(
            Some(PermissionLevel::Owner),
            &[PermissionLevel::CanView],
            org,
            &memberships,
            WorkspaceSharing::None,
        ));
    }

    #[test]
    fn check_access_via_workspace_sharing() {
        let org = OrganizationId::new();
        assert!(check_permission_access(
            None,
            &[PermissionLevel::CanView],
            org,
            &member(org, OrganizationRole::Viewer),
            WorkspaceSharing::CanView,
        ));
        assert!(!check_permission_access(
            None,
            &[PermissionLevel::CanView],
            org,
            &member(OrganizationId::new(), OrganizationRole::Viewer),
            WorkspaceSharing::CanView,
        ));
    }

    #[test]
    fn check_access_admin_override() {
        let org = OrganizationId::new();
        assert!(check_permission_access(
            None,
            &[PermissionLevel::Owner],
            org,
            &member(org, OrganizationRole::DataAdmin),
            WorkspaceSharing::None,
        ));
    }

    #[test]
    fn required_role_walks_hierarchy() {
        assert!(has_required_role(Some(PermissionLevel::Owner), PermissionLevel::CanView));
        assert!(!has_required_role(Some(PermissionLevel::CanView), PermissionLevel::CanEdit));
        assert!(!has_required_role(None, PermissionLevel::CanView));
    }
}
