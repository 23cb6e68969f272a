// ABOUTME: Long-running-operation polling shared by deploy, switch, and delete.
// ABOUTME: 202 keeps polling; completion semantics differ per endpoint.

use std::time::Duration;

use crate::client::{ApiRequest, ServiceApi};

use super::error::DeployError;

/// How a 200 poll decides success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// A 200 body may still embed a structured `error` object; surface it
    /// as `OperationFailed` even though the HTTP layer reported success.
    CheckBodyError,
    /// Completion is carried purely by the HTTP status.
    StatusOnly,
}

/// Polling cadence and the optional caller-imposed deadline.
///
/// With no deadline the loop is unbounded and relies on the surrounding
/// process deadline, matching the remote API's contract.
#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    pub interval: Duration,
    pub deadline: Option<Duration>,
}

impl PollSettings {
    /// Deployment mutations poll on a fixed 5-second interval.
    pub fn operation(deadline: Option<Duration>) -> Self {
        Self {
            interval: Duration::from_secs(5),
            deadline,
        }
    }
}

/// Poll `status_url` until the operation leaves the in-progress state.
///
/// While the poll returns 202 the operation is still running. A 200
/// terminates the wait; under [`Completion::CheckBodyError`] a structured
/// `error` object in that body is surfaced as `OperationFailed`. Any other
/// status is a terminal failure.
pub async fn await_operation(
    api: &dyn ServiceApi,
    status_url: &str,
    settings: PollSettings,
    completion: Completion,
) -> Result<serde_json::Value, DeployError> {
    let started = tokio::time::Instant::now();

    loop {
        let response = api.request(ApiRequest::get(status_url)).await?;
        tracing::debug!(status = response.status, "operation poll");

        if response.status != 202 {
            // Only 200 is a successful terminal poll; everything else,
            // 2xx included, means the operation did not resolve cleanly.
            if response.status == 200 {
                if completion == Completion::CheckBodyError {
                    if let Some(code) = response.error_code() {
                        return Err(DeployError::OperationFailed {
                            message: response.error_message(),
                            code,
                        });
                    }
                    if response.body.get("error").is_some() {
                        return Err(DeployError::OperationFailed {
                            message: response.error_message(),
                            code: response.status.to_string(),
                        });
                    }
                }
                return Ok(response.body);
            }

            return Err(DeployError::OperationFailed {
                message: response.error_message(),
                code: response.status.to_string(),
            });
        }

        if let Some(deadline) = settings.deadline {
            if started.elapsed() + settings.interval > deadline {
                return Err(DeployError::OperationTimedOut(deadline));
            }
        }

        tokio::time::sleep(settings.interval).await;
    }
}
