// ABOUTME: Wire model for management API resources.
// ABOUTME: Deserialized views of deployments, upload targets, and build results.

use serde::Deserialize;

/// Provisioning state reported for deployments and builds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum ProvisioningState {
    Creating,
    Updating,
    Building,
    Queuing,
    Succeeded,
    Failed,
    Deleting,
    #[serde(other)]
    Other,
}

/// One deployment slot as returned by the deployment listing.
#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentResource {
    pub name: String,
    pub properties: DeploymentResourceProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentResourceProperties {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub provisioning_state: Option<ProvisioningState>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentList {
    #[serde(default)]
    pub value: Vec<DeploymentResource>,
}

/// Service instance info; only the SKU tier is interesting to callers.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceResource {
    pub sku: ServiceSku,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceSku {
    #[serde(default)]
    pub tier: Option<String>,
}

/// Ephemeral upload destination: a write-once SAS URL plus the
/// server-assigned relative path to reference afterwards.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTarget {
    pub upload_url: String,
    pub relative_path: String,
}

/// One triggered remote build.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildResource {
    pub properties: BuildResourceProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildResourceProperties {
    /// Opaque reference to the build result resource, polled until done.
    #[serde(default)]
    pub triggered_build_result: Option<TriggeredBuildResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TriggeredBuildResult {
    pub id: String,
}

/// Build result status while polling.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildResultResource {
    pub properties: BuildResultProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildResultProperties {
    pub provisioning_state: ProvisioningState,
}

/// Test-endpoint credentials for composing a per-slot preview URL.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestKeys {
    pub primary_test_endpoint: String,
}

/// Log file location for a slot that produced a build/deploy log.
#[derive(Debug, Clone, Deserialize)]
pub struct LogFileUrl {
    pub url: String,
}
