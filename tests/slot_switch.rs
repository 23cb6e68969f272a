// ABOUTME: Tests for active-slot switching and slot deletion.
// ABOUTME: The switch wait is fatal; the delete wait is best effort.

mod support;

use serde_json::json;
use slipway::client::Method;
use slipway::deploy::{DeployError, delete_deployment, set_active_deployment};
use slipway::diagnostics::{Diagnostics, WarningKind};
use slipway::types::{AppName, DeploymentName};
use support::{FakeApi, ok_json, status, status_json, with_operation};

fn names() -> (AppName, DeploymentName) {
    (
        AppName::new("gateway").unwrap(),
        DeploymentName::new("green").unwrap(),
    )
}

#[tokio::test]
async fn switch_posts_a_singleton_active_set() {
    let api = FakeApi::new();
    api.on(Method::Post, "setActiveDeployments", status(200));

    let (app, slot) = names();
    set_active_deployment(&api, &app, &slot, None).await.unwrap();

    let post = api.requests().into_iter().next().unwrap();
    assert!(post.path.contains("apps/gateway/setActiveDeployments"));
    assert_eq!(
        post.body.unwrap()["activeDeploymentNames"],
        json!(["green"])
    );
}

#[tokio::test(start_paused = true)]
async fn switch_awaits_async_completion_by_status_alone() {
    let api = FakeApi::new();
    api.on(
        Method::Post,
        "setActiveDeployments",
        with_operation(202, "https://example.net/operations/7"),
    );
    api.on(Method::Get, "operations/7", status(202));
    // A 200 poll with an error-shaped body still completes the switch;
    // this endpoint reports failure purely through the HTTP status.
    api.on(
        Method::Get,
        "operations/7",
        ok_json(json!({"error": {"message": "ignored", "code": "Ignored"}})),
    );

    let (app, slot) = names();
    set_active_deployment(&api, &app, &slot, None).await.unwrap();
    assert_eq!(api.requests().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn switch_wait_failure_is_fatal() {
    let api = FakeApi::new();
    api.on(
        Method::Post,
        "setActiveDeployments",
        with_operation(202, "https://example.net/operations/7"),
    );
    api.on(Method::Get, "operations/7", status_json(500, json!({})));

    let (app, slot) = names();
    let err = set_active_deployment(&api, &app, &slot, None)
        .await
        .unwrap_err();
    assert!(matches!(err, DeployError::OperationFailed { .. }));
}

#[tokio::test]
async fn delete_completes_synchronously_on_200() {
    let api = FakeApi::new();
    api.on(Method::Delete, "deployments/green", status(200));

    let (app, slot) = names();
    let mut diag = Diagnostics::default();
    delete_deployment(&api, &app, &slot, None, &mut diag)
        .await
        .unwrap();
    assert!(!diag.has_warnings());
}

#[tokio::test(start_paused = true)]
async fn delete_wait_failure_is_swallowed_with_warning() {
    let api = FakeApi::new();
    api.on(
        Method::Delete,
        "deployments/green",
        with_operation(202, "https://example.net/operations/8"),
    );
    api.on(Method::Get, "operations/8", status_json(500, json!({})));

    let (app, slot) = names();
    let mut diag = Diagnostics::default();
    delete_deployment(&api, &app, &slot, None, &mut diag)
        .await
        .unwrap();

    assert!(diag.has_warnings());
    assert_eq!(diag.warnings()[0].kind, WarningKind::DeleteWait);
}

#[tokio::test]
async fn delete_synchronous_rejection_is_still_an_error() {
    let api = FakeApi::new();
    api.on(Method::Delete, "deployments/green", status(404));

    let (app, slot) = names();
    let mut diag = Diagnostics::default();
    let err = delete_deployment(&api, &app, &slot, None, &mut diag)
        .await
        .unwrap_err();
    assert!(matches!(err, DeployError::Api { status: 404, .. }));
}
