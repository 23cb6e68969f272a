// ABOUTME: Active-slot switching and slot deletion.
// ABOUTME: The switch is fatal on wait failure; deletion is best effort.

use std::time::Duration;

use crate::client::{ApiRequest, ServiceApi};
use crate::diagnostics::{Diagnostics, Warning};
use crate::types::{AppName, DeploymentName};

use super::error::DeployError;
use super::poll::{Completion, PollSettings, await_operation};

/// Atomically repoint production traffic to `deployment`.
///
/// The API accepts an array of active deployments but this engine always
/// supplies a singleton set. A 202 is awaited with status-only completion;
/// the endpoint does not embed errors in 200 poll bodies.
pub async fn set_active_deployment(
    api: &dyn ServiceApi,
    app: &AppName,
    deployment: &DeploymentName,
    deadline: Option<Duration>,
) -> Result<(), DeployError> {
    let body = serde_json::json!({
        "activeDeploymentNames": [deployment.as_str()],
    });

    let response = api
        .request(ApiRequest::post(format!("apps/{app}/setActiveDeployments")).with_body(body))
        .await?;

    match response.status {
        200 => Ok(()),
        202 => {
            if let Some(status_url) = &response.operation_url {
                await_operation(
                    api,
                    status_url,
                    PollSettings::operation(deadline),
                    Completion::StatusOnly,
                )
                .await?;
            }
            Ok(())
        }
        _ => Err(DeployError::from_response(&response)),
    }
}

/// Delete a deployment slot.
///
/// Deletion is best effort once issued: a failure while awaiting the
/// async completion is recorded as a warning and swallowed, unlike the
/// deploy and switch waits which are fatal.
pub async fn delete_deployment(
    api: &dyn ServiceApi,
    app: &AppName,
    deployment: &DeploymentName,
    deadline: Option<Duration>,
    diag: &mut Diagnostics,
) -> Result<(), DeployError> {
    let response = api
        .request(ApiRequest::delete(format!(
            "apps/{app}/deployments/{deployment}"
        )))
        .await?;

    match response.status {
        200 => Ok(()),
        202 => {
            if let Some(status_url) = &response.operation_url {
                if let Err(e) = await_operation(
                    api,
                    status_url,
                    PollSettings::operation(deadline),
                    Completion::StatusOnly,
                )
                .await
                {
                    diag.warn(Warning::delete_wait(format!(
                        "deletion of {app}/{deployment} may not have completed: {e}"
                    )));
                }
            }
            Ok(())
        }
        _ => Err(DeployError::from_response(&response)),
    }
}
