// ABOUTME: State transition methods for rollout orchestration.
// ABOUTME: Each method consumes self and returns the next state on success.

use crate::artifact::{ArtifactKind, compress_source};
use crate::client::model::TestKeys;
use crate::client::{ApiRequest, ServiceApi};
use crate::diagnostics::Diagnostics;
use crate::output::Output;

use super::build::{await_build, trigger_build};
use super::error::DeployError;
use super::logs::print_deploy_log;
use super::payload::{SourceKind, build_payload};
use super::poll::{Completion, PollSettings, await_operation};
use super::rollout::{Rollout, SourceSpec};
use super::state::{Applied, Initialized, Staged, TargetResolved};
use super::target::{list_deployments, resolve_target};
use super::upload::{
    get_build_service_upload_target, get_upload_target, upload_artifact,
};

// =============================================================================
// Initialized -> TargetResolved
// =============================================================================

impl Rollout<Initialized> {
    /// Read the deployment inventory and decide which slot to act on.
    ///
    /// # Errors
    ///
    /// `NoInactiveDeployment`, `DeploymentDoesNotExist`, or
    /// `TooManyDeploymentsExist` per the targeting policy.
    #[must_use = "rollout state must be used"]
    pub async fn resolve_target(
        self,
        api: &dyn ServiceApi,
    ) -> Result<Rollout<TargetResolved>, DeployError> {
        let inventory = list_deployments(api, &self.params.app).await?;
        let target = resolve_target(&self.params.target, self.params.allow_create, &inventory)?;

        tracing::debug!(slot = %target.name, must_create = target.must_create, "target resolved");
        Ok(Rollout {
            params: self.params,
            state: TargetResolved { target },
        })
    }
}

// =============================================================================
// TargetResolved -> Staged
// =============================================================================

impl Rollout<TargetResolved> {
    /// Produce the deployment source: upload the artifact, run it through
    /// the build service, or reference the container image directly.
    ///
    /// Upload always precedes the call that references it; a build always
    /// completes before its `buildResultId` is used.
    #[must_use = "rollout state must be used"]
    pub async fn stage(
        self,
        api: &dyn ServiceApi,
        diag: &mut Diagnostics,
    ) -> Result<Rollout<Staged>, DeployError> {
        let source = match &self.params.source {
            SourceSpec::Container(container) => SourceKind::Container {
                custom_container: container.clone(),
            },
            SourceSpec::Artifact {
                path,
                use_build_service,
                builder,
            } => {
                let kind = ArtifactKind::classify(path);
                let upload_path = match kind {
                    ArtifactKind::SourceDirectory => compress_source(path, diag)?,
                    _ => path.clone(),
                };

                if *use_build_service {
                    let target = get_build_service_upload_target(api).await?;
                    let relative_path = upload_artifact(api, &target, &upload_path).await?;
                    let result_id = trigger_build(
                        api,
                        &self.params.app,
                        &relative_path,
                        builder.as_deref(),
                    )
                    .await?;
                    await_build(api, &result_id, self.params.timeouts.build).await?;
                    SourceKind::BuildResult {
                        build_result_id: result_id,
                    }
                } else {
                    let target = get_upload_target(api, &self.params.app).await?;
                    let relative_path = upload_artifact(api, &target, &upload_path).await?;
                    SourceKind::artifact(kind, path, relative_path)
                }
            }
        };

        Ok(Rollout {
            params: self.params,
            state: Staged {
                target: self.state.target,
                source,
            },
        })
    }
}

// =============================================================================
// Staged -> Applied
// =============================================================================

impl Rollout<Staged> {
    /// Issue the deployment mutation and await its completion.
    ///
    /// Creation is a PUT (accepts 200/201/202), update a PATCH (200/202);
    /// anything else aborts as an API error with no retry. A long-running
    /// response is polled every five seconds; a structured error inside a
    /// 200 poll body still fails the operation. For slots deployed from a
    /// source directory the remote deploy log is printed afterwards,
    /// success or failure, and log trouble is only a warning.
    #[must_use = "rollout state must be used"]
    pub async fn apply(
        self,
        api: &dyn ServiceApi,
        output: &Output,
        diag: &mut Diagnostics,
    ) -> Result<Rollout<Applied>, DeployError> {
        let name = self.state.target.name.clone();
        let create = self.state.target.must_create;
        let payload = build_payload(
            self.state.source.clone(),
            &self.params.settings,
            self.params.version.clone(),
        );
        let body = serde_json::to_value(&payload)
            .expect("deployment payload always serializes to JSON");

        let path = format!("apps/{}/deployments/{}", self.params.app, name);
        let request = if create {
            ApiRequest::put(path).with_body(body)
        } else {
            ApiRequest::patch(path).with_body(body)
        };

        let accepted: &[u16] = if create { &[200, 201, 202] } else { &[200, 202] };
        let response = api.request(request).await?;
        if !accepted.contains(&response.status) {
            // Synchronous rejections are carried entirely by HTTP status;
            // the body-embedded error check only applies to polls.
            return Err(DeployError::from_response(&response));
        }

        let wait_result = match &response.operation_url {
            Some(status_url) => await_operation(
                api,
                status_url,
                PollSettings::operation(self.params.timeouts.operation),
                Completion::CheckBodyError,
            )
            .await
            .map(|_| ()),
            None => Ok(()),
        };

        if self.state.source.has_remote_log() {
            print_deploy_log(api, &self.params.app, &name, output, diag).await;
        }

        wait_result?;

        Ok(Rollout {
            params: self.params,
            state: Applied { name },
        })
    }
}

// =============================================================================
// Applied - Terminal State
// =============================================================================

impl Rollout<Applied> {
    /// Compose the per-slot preview URL from the service test keys.
    pub async fn test_endpoint(&self, api: &dyn ServiceApi) -> Result<String, DeployError> {
        let response = api.request(ApiRequest::post("listTestKeys")).await?;
        if response.status != 200 {
            return Err(DeployError::from_response(&response));
        }

        let keys: TestKeys = response.json().map_err(|e| DeployError::Api {
            status: 200,
            message: format!("unparseable test keys: {e}"),
            body: Some(response.body.clone()),
        })?;

        Ok(format!(
            "{}/{}/{}",
            keys.primary_test_endpoint.trim_end_matches('/'),
            self.params.app,
            self.state.name
        ))
    }
}
