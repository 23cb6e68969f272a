// ABOUTME: End-to-end rollout tests against the fake transport.
// ABOUTME: Covers the blue/green deploy path and its failure modes.

mod support;

use serde_json::json;
use slipway::client::Method;
use slipway::deploy::{
    DeployError, Rollout, RolloutParams, SettingsInput, SourceSpec, Target, Timeouts,
};
use slipway::diagnostics::Diagnostics;
use slipway::output::{Output, OutputMode};
use slipway::types::{AppName, DeploymentName};
use std::path::PathBuf;
use support::{FakeApi, ok_json, status, with_operation};

fn quiet_output() -> Output {
    Output::new(OutputMode::Quiet)
}

fn two_slot_inventory() -> serde_json::Value {
    json!({
        "value": [
            {"name": "default", "properties": {"active": true, "provisioningState": "Succeeded"}},
            {"name": "theOtherOne", "properties": {"active": false, "provisioningState": "Succeeded"}},
        ]
    })
}

fn jar_params(path: PathBuf, target: Target, allow_create: bool) -> RolloutParams {
    RolloutParams {
        app: AppName::new("gateway").unwrap(),
        target,
        allow_create,
        source: SourceSpec::Artifact {
            path,
            use_build_service: false,
            builder: None,
        },
        settings: SettingsInput::default(),
        version: None,
        timeouts: Timeouts::default(),
    }
}

#[tokio::test(start_paused = true)]
async fn jar_deploy_to_inactive_slot_patches_and_exposes_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let jar = dir.path().join("app.jar");
    std::fs::write(&jar, b"PK\x03\x04").unwrap();

    let api = FakeApi::new();
    api.on(Method::Get, "apps/gateway/deployments", ok_json(two_slot_inventory()));
    api.on(
        Method::Post,
        "getResourceUploadUrl",
        ok_json(json!({"uploadUrl": "https://sas.example/up?sig=s", "relativePath": "resources/abc123"})),
    );
    api.on(
        Method::Patch,
        "deployments/theOtherOne",
        with_operation(202, "https://example.net/operations/9"),
    );
    api.on(Method::Get, "operations/9", status(202));
    api.on(Method::Get, "operations/9", ok_json(json!({"status": "Completed"})));
    api.on(
        Method::Post,
        "listTestKeys",
        ok_json(json!({"primaryTestEndpoint": "https://primary.test.example"})),
    );

    let mut diag = Diagnostics::default();
    let rollout = Rollout::new(jar_params(jar, Target::Inactive, false))
        .resolve_target(&api)
        .await
        .unwrap();
    assert_eq!(rollout.deployment_name().as_str(), "theOtherOne");
    assert!(!rollout.must_create());

    let rollout = rollout.stage(&api, &mut diag).await.unwrap();
    let rollout = rollout.apply(&api, &quiet_output(), &mut diag).await.unwrap();

    // The PATCH body references exactly the uploaded relative path.
    let patch = api
        .requests()
        .into_iter()
        .find(|r| r.method == Method::Patch)
        .expect("a PATCH must have been issued");
    assert!(patch.path.contains("apps/gateway/deployments/theOtherOne"));
    let body = patch.body.unwrap();
    assert_eq!(body.pointer("/properties/source/type").unwrap(), "Jar");
    assert_eq!(
        body.pointer("/properties/source/relativePath").unwrap(),
        "resources/abc123"
    );

    // The artifact went to the SAS URL before the mutation referenced it.
    assert_eq!(api.uploads().len(), 1);
    assert_eq!(api.uploads()[0].0, "https://sas.example/up?sig=s");

    let endpoint = rollout.test_endpoint(&api).await.unwrap();
    assert_eq!(
        endpoint,
        "https://primary.test.example/gateway/theOtherOne"
    );
    assert!(!diag.has_warnings());
}

#[tokio::test]
async fn missing_named_slot_without_create_issues_no_mutation() {
    let api = FakeApi::new();
    api.on(Method::Get, "apps/gateway/deployments", ok_json(two_slot_inventory()));

    let params = jar_params(
        PathBuf::from("app.jar"),
        Target::Named(DeploymentName::new("canary").unwrap()),
        false,
    );
    let err = Rollout::new(params).resolve_target(&api).await.unwrap_err();

    match err {
        DeployError::DeploymentDoesNotExist(name) => assert_eq!(name, "canary"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(api.mutations().is_empty());
    assert!(api.uploads().is_empty());
}

#[tokio::test]
async fn creation_puts_instead_of_patching() {
    let dir = tempfile::tempdir().unwrap();
    let jar = dir.path().join("app.jar");
    std::fs::write(&jar, b"PK").unwrap();

    let api = FakeApi::new();
    api.on(
        Method::Get,
        "apps/gateway/deployments",
        ok_json(json!({"value": [
            {"name": "default", "properties": {"active": true}},
        ]})),
    );
    api.on(
        Method::Post,
        "getResourceUploadUrl",
        ok_json(json!({"uploadUrl": "https://sas.example/up", "relativePath": "resources/xyz"})),
    );
    api.on(Method::Put, "deployments/staging", status(201));

    let mut diag = Diagnostics::default();
    let rollout = Rollout::new(jar_params(jar, Target::Inactive, true))
        .resolve_target(&api)
        .await
        .unwrap();
    assert_eq!(rollout.deployment_name().as_str(), "staging");
    assert!(rollout.must_create());

    let rollout = rollout.stage(&api, &mut diag).await.unwrap();
    rollout.apply(&api, &quiet_output(), &mut diag).await.unwrap();

    let mutations = api.mutations();
    assert_eq!(mutations.len(), 1);
    assert_eq!(mutations[0].method, Method::Put);
}

#[tokio::test]
async fn synchronous_rejection_aborts_without_body_inspection() {
    let dir = tempfile::tempdir().unwrap();
    let jar = dir.path().join("app.jar");
    std::fs::write(&jar, b"PK").unwrap();

    let api = FakeApi::new();
    api.on(Method::Get, "apps/gateway/deployments", ok_json(two_slot_inventory()));
    api.on(
        Method::Post,
        "getResourceUploadUrl",
        ok_json(json!({"uploadUrl": "https://sas.example/up", "relativePath": "r"})),
    );
    api.on(Method::Patch, "deployments/theOtherOne", status(409));

    let mut diag = Diagnostics::default();
    let rollout = Rollout::new(jar_params(jar, Target::Inactive, false))
        .resolve_target(&api)
        .await
        .unwrap();
    let rollout = rollout.stage(&api, &mut diag).await.unwrap();
    let err = rollout
        .apply(&api, &quiet_output(), &mut diag)
        .await
        .unwrap_err();

    match err {
        DeployError::Api { status, .. } => assert_eq!(status, 409),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test(start_paused = true)]
async fn source_directory_deploy_streams_log_and_downgrades_log_failure() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("proj");
    std::fs::create_dir(&src).unwrap();
    std::fs::write(src.join("pom.xml"), "<project/>").unwrap();

    let api = FakeApi::new();
    api.on(
        Method::Get,
        "apps/gateway/deployments",
        ok_json(two_slot_inventory()),
    );
    api.on(
        Method::Post,
        "getResourceUploadUrl",
        ok_json(json!({"uploadUrl": "https://sas.example/up", "relativePath": "resources/src1"})),
    );
    api.on(
        Method::Patch,
        "deployments/theOtherOne",
        with_operation(202, "https://example.net/operations/2"),
    );
    api.on(Method::Get, "operations/2", ok_json(json!({"status": "Completed"})));
    // Log URL fetch fails; the rollout must still succeed with a warning.
    api.on(Method::Post, "getLogFileUrl", status(500));

    let mut diag = Diagnostics::default();
    let params = jar_params(src, Target::Inactive, false);
    let rollout = Rollout::new(params).resolve_target(&api).await.unwrap();
    let rollout = rollout.stage(&api, &mut diag).await.unwrap();
    let rollout = rollout.apply(&api, &quiet_output(), &mut diag).await.unwrap();

    assert_eq!(rollout.deployment_name().as_str(), "theOtherOne");
    assert!(diag.has_warnings());

    let patch = api
        .requests()
        .into_iter()
        .find(|r| r.method == Method::Patch)
        .unwrap();
    assert_eq!(
        patch.body.unwrap().pointer("/properties/source/type").unwrap(),
        "Source"
    );
}

#[tokio::test(start_paused = true)]
async fn failed_operation_still_fetches_log_for_source_deploys() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("proj");
    std::fs::create_dir(&src).unwrap();
    std::fs::write(src.join("pom.xml"), "<project/>").unwrap();

    let api = FakeApi::new();
    api.on(Method::Get, "apps/gateway/deployments", ok_json(two_slot_inventory()));
    api.on(
        Method::Post,
        "getResourceUploadUrl",
        ok_json(json!({"uploadUrl": "https://sas.example/up", "relativePath": "resources/src2"})),
    );
    api.on(
        Method::Patch,
        "deployments/theOtherOne",
        with_operation(202, "https://example.net/operations/3"),
    );
    api.on(
        Method::Get,
        "operations/3",
        ok_json(json!({"error": {"message": "compile error", "code": "BuildError"}})),
    );
    api.on(
        Method::Post,
        "getLogFileUrl",
        ok_json(json!({"url": "https://logs.example/file.txt"})),
    );
    api.serve_text("https://logs.example/file.txt", "BUILD FAILED\n");

    let mut diag = Diagnostics::default();
    let params = jar_params(src, Target::Inactive, false);
    let rollout = Rollout::new(params).resolve_target(&api).await.unwrap();
    let rollout = rollout.stage(&api, &mut diag).await.unwrap();
    let err = rollout
        .apply(&api, &quiet_output(), &mut diag)
        .await
        .unwrap_err();

    match err {
        DeployError::OperationFailed { message, code } => {
            assert_eq!(message, "compile error");
            assert_eq!(code, "BuildError");
        }
        other => panic!("unexpected error: {other}"),
    }

    // The log URL was still requested after the failed wait.
    assert!(
        api.requests()
            .iter()
            .any(|r| r.path.contains("getLogFileUrl"))
    );
    assert!(!diag.has_warnings());
}
