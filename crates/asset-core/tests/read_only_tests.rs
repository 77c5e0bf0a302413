//! Read-only resolution through the access service
//!
//! Drives the service against the in-memory repository and checks the
//! editor-facing flags for each fail-closed rule.

use asset_core::prelude::*;
use asset_cache::RepositoryError;
use asset_policy::ReadOnlyReason;
use asset_test_utils::{
    create_dashboard, create_metric, create_report, create_shared_asset, InMemoryRepository,
};
use asset_types::{OrganizationId, OrganizationRole, WorkspaceSharing};
use pretty_assertions::assert_eq;
use std::sync::Arc;

struct Fixture {
    repo: Arc<InMemoryRepository>,
    service: AccessService<InMemoryRepository>,
    user: UserId,
    org: OrganizationId,
}

fn fixture() -> Fixture {
    let repo = Arc::new(InMemoryRepository::new());
    let service = AccessService::new(Arc::clone(&repo));
    Fixture {
        repo,
        service,
        user: UserId::new(),
        org: OrganizationId::new(),
    }
}

fn editable() -> ReadOnlyResult {
    ReadOnlyResult {
        is_fetched: true,
        is_error: false,
        is_viewing_old_version: false,
        is_read_only: false,
    }
}

#[tokio::test]
async fn editor_at_latest_can_edit() {
    let f = fixture();
    let metric = f.repo.insert_asset(create_metric(f.org, &[1, 2, 3]));
    f.repo.grant(f.user, metric, PermissionLevel::CanEdit);

    let result = f.service.metric_read_only(f.user, metric, ReadOnlyContext::new()).await;
    assert_eq!(result, editable());
}

#[tokio::test]
async fn viewer_is_read_only() {
    let f = fixture();
    let dashboard = f.repo.insert_asset(create_dashboard(f.org, &[1]));
    f.repo.grant(f.user, dashboard, PermissionLevel::CanView);

    let result = f
        .service
        .dashboard_read_only(f.user, dashboard, ReadOnlyContext::new())
        .await;
    assert!(result.is_read_only);
    assert!(result.is_fetched);
    assert!(!result.is_error);
}

#[tokio::test]
async fn no_grant_is_read_only() {
    let f = fixture();
    let report = f.repo.insert_asset(create_report(f.org, &[1]));

    let query = AssetQuery::report(report, None);
    let reason = f
        .service
        .read_only_reason(f.user, &query, ReadOnlyContext::new())
        .await;
    assert_eq!(reason, Some(ReadOnlyReason::InsufficientPermission));
}

#[tokio::test]
async fn old_version_is_read_only_for_owner() {
    let f = fixture();
    let metric = f.repo.insert_asset(create_metric(f.org, &[1, 2, 3]));
    f.repo.grant(f.user, metric, PermissionLevel::Owner);

    let context = ReadOnlyContext::new().with_requested_version(2);
    let result = f.service.metric_read_only(f.user, metric, context).await;

    assert_eq!(
        result,
        ReadOnlyResult {
            is_viewing_old_version: true,
            is_read_only: true,
            ..editable()
        }
    );
}

#[tokio::test]
async fn requesting_latest_number_is_editable() {
    let f = fixture();
    let metric = f.repo.insert_asset(create_metric(f.org, &[1, 2, 3]));
    f.repo.grant(f.user, metric, PermissionLevel::CanEdit);

    let context = ReadOnlyContext::new().with_requested_version(3);
    let result = f.service.metric_read_only(f.user, metric, context).await;
    assert_eq!(result, editable());
}

#[tokio::test]
async fn version_zero_means_latest() {
    let f = fixture();
    let metric = f.repo.insert_asset(create_metric(f.org, &[1, 2]));
    f.repo.grant(f.user, metric, PermissionLevel::CanEdit);

    let context = ReadOnlyContext::new().with_requested_version(0);
    let result = f.service.metric_read_only(f.user, metric, context).await;
    assert_eq!(result, editable());
}

#[tokio::test]
async fn history_mode_is_read_only() {
    let f = fixture();
    let dashboard = f.repo.insert_asset(create_dashboard(f.org, &[1, 2]));
    f.repo.grant(f.user, dashboard, PermissionLevel::Owner);

    let context = ReadOnlyContext::new().with_version_history_mode(true);
    let query = AssetQuery::dashboard(dashboard, None);

    assert_eq!(
        f.service.read_only_reason(f.user, &query, context).await,
        Some(ReadOnlyReason::VersionHistoryMode)
    );
}

#[tokio::test]
async fn explicit_override_beats_ownership() {
    let f = fixture();
    let metric = f.repo.insert_asset(create_metric(f.org, &[1]));
    f.repo.grant(f.user, metric, PermissionLevel::Owner);

    let context = ReadOnlyContext::new().with_explicit_read_only(true);
    let result = f.service.metric_read_only(f.user, metric, context).await;
    assert!(result.is_read_only);
}

#[tokio::test]
async fn explicit_false_does_not_grant_edit() {
    let f = fixture();
    let metric = f.repo.insert_asset(create_metric(f.org, &[1]));
    f.repo.grant(f.user, metric, PermissionLevel::CanView);

    let context = ReadOnlyContext::new().with_explicit_read_only(false);
    let result = f.service.metric_read_only(f.user, metric, context).await;
    assert!(result.is_read_only);
}

#[tokio::test]
async fn peek_before_load_is_read_only() {
    let f = fixture();
    let metric = f.repo.insert_asset(create_metric(f.org, &[1]));
    f.repo.grant(f.user, metric, PermissionLevel::CanEdit);
    let query = AssetQuery::metric(metric, None);

    let pending = f.service.read_only(f.user, &query, ReadOnlyContext::new()).await;
    assert!(!pending.is_fetched);
    assert!(pending.is_read_only);
    assert_eq!(f.repo.fetch_calls(), 0);

    f.service
        .read_only_loaded(f.user, &query, ReadOnlyContext::new())
        .await;
    let loaded = f.service.read_only(f.user, &query, ReadOnlyContext::new()).await;
    assert_eq!(loaded, editable());
}

#[tokio::test]
async fn fetch_error_is_read_only_then_recovers() {
    let f = fixture();
    let metric = f.repo.insert_asset(create_metric(f.org, &[1]));
    f.repo.grant(f.user, metric, PermissionLevel::CanEdit);
    f.repo.fail_with(RepositoryError::Unavailable("connection reset".into()));

    let failed = f.service.metric_read_only(f.user, metric, ReadOnlyContext::new()).await;
    assert!(failed.is_error);
    assert!(failed.is_read_only);

    f.repo.recover();
    let recovered = f.service.metric_read_only(f.user, metric, ReadOnlyContext::new()).await;
    assert_eq!(recovered, editable());
    assert_eq!(f.repo.fetch_calls(), 2);
}

#[tokio::test]
async fn missing_version_is_an_error() {
    let f = fixture();
    let metric = f.repo.insert_asset(create_metric(f.org, &[1, 2]));
    f.repo.grant(f.user, metric, PermissionLevel::CanEdit);

    let context = ReadOnlyContext::new().with_requested_version(9);
    let result = f.service.metric_read_only(f.user, metric, context).await;
    assert!(result.is_error);
    assert!(result.is_read_only);
}

#[tokio::test]
async fn loads_are_cached_per_user() {
    let f = fixture();
    let metric = f.repo.insert_asset(create_metric(f.org, &[1]));
    let other = UserId::new();
    f.repo.grant(f.user, metric, PermissionLevel::CanEdit);

    for _ in 0..3 {
        f.service.metric_read_only(f.user, metric, ReadOnlyContext::new()).await;
    }
    assert_eq!(f.repo.fetch_calls(), 1);

    let result = f.service.metric_read_only(other, metric, ReadOnlyContext::new()).await;
    assert!(result.is_read_only);
    assert_eq!(f.repo.fetch_calls(), 2);
}

#[tokio::test]
async fn invalidate_picks_up_revocation() {
    let f = fixture();
    let metric = f.repo.insert_asset(create_metric(f.org, &[1]));
    f.repo.grant(f.user, metric, PermissionLevel::CanEdit);

    let before = f.service.metric_read_only(f.user, metric, ReadOnlyContext::new()).await;
    assert!(!before.is_read_only);

    f.repo.revoke(f.user, metric);
    let stale = f.service.metric_read_only(f.user, metric, ReadOnlyContext::new()).await;
    assert!(!stale.is_read_only);

    f.service.invalidate(metric).unwrap();
    let after = f.service.metric_read_only(f.user, metric, ReadOnlyContext::new()).await;
    assert!(after.is_read_only);
}

#[tokio::test]
async fn works_behind_trait_object() {
    let repo = Arc::new(InMemoryRepository::new());
    let org = OrganizationId::new();
    let user = UserId::new();
    let metric = repo.insert_asset(create_metric(org, &[1]));
    repo.grant(user, metric, PermissionLevel::FullAccess);

    let dyn_repo: Arc<dyn AssetRepository> = repo;
    let service = AccessService::new(dyn_repo);

    let result = service.metric_read_only(user, metric, ReadOnlyContext::new()).await;
    assert_eq!(result, editable());
}

#[tokio::test]
async fn workspace_shared_editor_can_edit() {
    let f = fixture();
    let metric = f.repo.insert_asset(
        create_shared_asset(AssetKind::Metric, f.org, WorkspaceSharing::CanEdit)
            .with_version_numbers(&[1, 2]),
    );
    f.repo.add_membership(f.user, f.org, OrganizationRole::Querier);

    let query = AssetQuery::metric(metric, None);
    assert_eq!(
        f.service.check_access(f.user, &query, PermissionLevel::CanEdit).await.unwrap(),
        AccessDecision::Granted(PermissionLevel::CanEdit)
    );

    let result = f.service.metric_read_only(f.user, metric, ReadOnlyContext::new()).await;
    assert_eq!(result, editable());
}

#[tokio::test]
async fn workspace_view_sharing_stays_read_only() {
    let f = fixture();
    let dashboard = f.repo.insert_asset(
        create_shared_asset(AssetKind::Dashboard, f.org, WorkspaceSharing::CanView)
            .with_version_numbers(&[1]),
    );
    f.repo.add_membership(f.user, f.org, OrganizationRole::Viewer);

    let query = AssetQuery::dashboard(dashboard, None);
    assert_eq!(
        f.service.read_only_reason(f.user, &query, ReadOnlyContext::new()).await,
        Some(ReadOnlyReason::InsufficientPermission)
    );
}

#[tokio::test]
async fn org_admin_can_edit_without_grant() {
    let f = fixture();
    let report = f.repo.insert_asset(create_report(f.org, &[1, 2]));
    f.repo.add_membership(f.user, f.org, OrganizationRole::WorkspaceAdmin);

    let query = AssetQuery::report(report, None);
    assert_eq!(
        f.service.check_access(f.user, &query, PermissionLevel::CanEdit).await.unwrap(),
        AccessDecision::Granted(PermissionLevel::Owner)
    );

    let result = f.service.report_read_only(f.user, report, ReadOnlyContext::new()).await;
    assert_eq!(result, editable());
}

#[tokio::test]
async fn admin_of_other_org_gets_nothing() {
    let f = fixture();
    let report = f.repo.insert_asset(create_report(f.org, &[1]));
    f.repo.add_membership(f.user, OrganizationId::new(), OrganizationRole::DataAdmin);

    let result = f.service.report_read_only(f.user, report, ReadOnlyContext::new()).await;
    assert!(result.is_read_only);
}

#[tokio::test]
async fn access_checks_share_the_query_cache() {
    let f = fixture();
    let metric = f.repo.insert_asset(create_metric(f.org, &[1]));
    f.repo.grant(f.user, metric, PermissionLevel::CanEdit);
    let query = AssetQuery::metric(metric, None);

    f.service.effective_permission(f.user, &query).await.unwrap();
    f.service.check_access(f.user, &query, PermissionLevel::CanEdit).await.unwrap();
    let result = f.service.read_only(f.user, &query, ReadOnlyContext::new()).await;

    assert_eq!(result, editable());
    assert_eq!(f.repo.fetch_calls(), 1);
    let stats = f.service.cache().stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
}

#[tokio::test]
async fn access_check_failure_is_visible_to_readers() {
    let f = fixture();
    let metric = f.repo.insert_asset(create_metric(f.org, &[1]));
    f.repo.grant(f.user, metric, PermissionLevel::CanEdit);
    f.repo.fail_with(RepositoryError::Unavailable("connection reset".into()));
    let query = AssetQuery::metric(metric, None);

    let err = f
        .service
        .check_access(f.user, &query, PermissionLevel::CanView)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AccessError::Repository(RepositoryError::Unavailable(_))
    ));

    let peeked = f.service.read_only(f.user, &query, ReadOnlyContext::new()).await;
    assert!(peeked.is_error);
    assert!(peeked.is_read_only);
}
