// ABOUTME: Upload-target acquisition and artifact upload.
// ABOUTME: SAS URLs are write-once credentials and are never logged.

use std::path::Path;

use crate::client::model::UploadTarget;
use crate::client::{ApiRequest, ServiceApi};
use crate::types::AppName;

use super::error::DeployError;

/// Request a short-lived upload destination for a direct app upload.
pub async fn get_upload_target(
    api: &dyn ServiceApi,
    app: &AppName,
) -> Result<UploadTarget, DeployError> {
    fetch_upload_target(api, format!("apps/{app}/getResourceUploadUrl")).await
}

/// Request an upload destination on the shared build service.
pub async fn get_build_service_upload_target(
    api: &dyn ServiceApi,
) -> Result<UploadTarget, DeployError> {
    fetch_upload_target(api, "buildServices/default/getResourceUploadUrl".to_string()).await
}

async fn fetch_upload_target(
    api: &dyn ServiceApi,
    path: String,
) -> Result<UploadTarget, DeployError> {
    let response = api.request(ApiRequest::post(path)).await?;

    if response.status != 200 {
        return Err(DeployError::from_response(&response));
    }

    let target: UploadTarget = response.json().map_err(|e| DeployError::Api {
        status: 200,
        message: format!("unparseable upload target: {e}"),
        body: Some(response.body.clone()),
    })?;

    tracing::debug!(relative_path = %target.relative_path, "upload target acquired");
    Ok(target)
}

/// Upload the artifact to the target and hand back its relative path for
/// use in the deployment or build payload.
pub async fn upload_artifact(
    api: &dyn ServiceApi,
    target: &UploadTarget,
    file: &Path,
) -> Result<String, DeployError> {
    api.upload(&target.upload_url, file).await?;
    Ok(target.relative_path.clone())
}
