// ABOUTME: Build-service driver: trigger a remote build and await the result.
// ABOUTME: Polls on a fixed 1.5-second interval until the build succeeds.

use std::time::Duration;

use crate::client::model::{BuildResource, BuildResultResource, ProvisioningState};
use crate::client::{ApiRequest, ServiceApi};
use crate::types::AppName;

use super::error::DeployError;

const BUILD_POLL_INTERVAL: Duration = Duration::from_millis(1500);

/// Trigger a remote build of an uploaded source archive.
///
/// Returns the build-result resource id to poll and later reference as
/// the deployment's `buildResultId`.
pub async fn trigger_build(
    api: &dyn ServiceApi,
    app: &AppName,
    relative_path: &str,
    builder: Option<&str>,
) -> Result<String, DeployError> {
    let builder_ref = builder
        .map(str::to_string)
        .unwrap_or_else(|| "builders/default".to_string());

    let body = serde_json::json!({
        "properties": {
            "builder": builder_ref,
            "agentPool": "default",
            "relativePath": relative_path,
        }
    });

    let response = api
        .request(ApiRequest::put(format!("buildServices/default/builds/{app}")).with_body(body))
        .await?;

    if !matches!(response.status, 200 | 201) {
        return Err(DeployError::from_response(&response));
    }

    let build: BuildResource = response.json().map_err(|e| DeployError::Api {
        status: response.status,
        message: format!("unparseable build response: {e}"),
        body: Some(response.body.clone()),
    })?;

    let result_id = build
        .properties
        .triggered_build_result
        .map(|r| r.id)
        .ok_or_else(|| DeployError::Api {
            status: response.status,
            message: "build response carries no triggered build result".to_string(),
            body: Some(response.body.clone()),
        })?;

    tracing::debug!(%result_id, "build triggered");
    Ok(result_id)
}

/// Poll the build result until it reaches `Succeeded`.
///
/// The loop terminates only on success or a non-200 poll; a failed build
/// is reported by the service as a non-200 response with a structured
/// error body ("builder does not exist" and friends), which aborts
/// immediately as `BuildFailed`. An optional deadline bounds the wait.
pub async fn await_build(
    api: &dyn ServiceApi,
    build_result_id: &str,
    deadline: Option<Duration>,
) -> Result<(), DeployError> {
    let started = tokio::time::Instant::now();

    loop {
        let response = api.request(ApiRequest::get(build_result_id)).await?;

        if response.status != 200 {
            return Err(DeployError::BuildFailed {
                message: response.error_message(),
                code: response
                    .error_code()
                    .unwrap_or_else(|| response.status.to_string()),
            });
        }

        let result: BuildResultResource = response.json().map_err(|e| DeployError::Api {
            status: 200,
            message: format!("unparseable build result: {e}"),
            body: Some(response.body.clone()),
        })?;

        tracing::debug!(state = ?result.properties.provisioning_state, "build poll");
        if result.properties.provisioning_state == ProvisioningState::Succeeded {
            return Ok(());
        }

        if let Some(deadline) = deadline {
            if started.elapsed() + BUILD_POLL_INTERVAL > deadline {
                return Err(DeployError::OperationTimedOut(deadline));
            }
        }

        tokio::time::sleep(BUILD_POLL_INTERVAL).await;
    }
}
