// ABOUTME: Remote deploy log retrieval and printing.
// ABOUTME: Log trouble is downgraded to a warning; it never fails a rollout.

use crate::client::model::LogFileUrl;
use crate::client::{ApiRequest, ServiceApi};
use crate::diagnostics::{Diagnostics, Warning};
use crate::output::Output;
use crate::types::{AppName, DeploymentName};

/// Fetch and print the deploy log of a slot, best effort.
///
/// Obtains a log-file URL through the management API and streams the file
/// from the returned address with no auth (the URL itself carries the
/// credential). Every failure path lands in `diag` as a warning so it
/// cannot mask the rollout's primary outcome.
pub async fn print_deploy_log(
    api: &dyn ServiceApi,
    app: &AppName,
    deployment: &DeploymentName,
    output: &Output,
    diag: &mut Diagnostics,
) {
    let path = format!("apps/{app}/deployments/{deployment}/getLogFileUrl");
    let response = match api.request(ApiRequest::post(path)).await {
        Ok(response) if response.status == 200 => response,
        Ok(response) => {
            diag.warn(Warning::log_fetch(format!(
                "could not obtain deploy log URL (status {})",
                response.status
            )));
            return;
        }
        Err(e) => {
            diag.warn(Warning::log_fetch(format!(
                "could not obtain deploy log URL: {e}"
            )));
            return;
        }
    };

    let url = match response.json::<LogFileUrl>() {
        Ok(log) => log.url,
        Err(e) => {
            diag.warn(Warning::log_fetch(format!(
                "unparseable deploy log URL response: {e}"
            )));
            return;
        }
    };

    match api.fetch_text(&url).await {
        Ok(text) => {
            output.progress(&format!("Deploy log for {app}/{deployment}:"));
            output.raw(&text);
        }
        Err(e) => {
            diag.warn(Warning::log_fetch(format!("could not stream deploy log: {e}")));
        }
    }
}
