// ABOUTME: Deployment slot targeting: named slot or the inactive slot.
// ABOUTME: Decides the slot to act on and whether it must be created.

use crate::client::model::{DeploymentList, DeploymentResource, ServiceResource};
use crate::client::{ApiRequest, ServiceApi};
use crate::types::{AppName, DEFAULT_STAGING_NAME, DeploymentName};

use super::error::DeployError;

/// Which slot the caller wants to act on.
#[derive(Debug, Clone)]
pub enum Target {
    /// The currently inactive ("staging") slot, whichever it is.
    Inactive,
    /// A slot by name.
    Named(DeploymentName),
}

/// Outcome of target resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub name: DeploymentName,
    pub must_create: bool,
}

/// Fetch the app's deployment inventory. A 404 means the app has no
/// deployments at all, distinct from an empty 200 list.
pub async fn list_deployments(
    api: &dyn ServiceApi,
    app: &AppName,
) -> Result<Vec<DeploymentResource>, DeployError> {
    let response = api
        .request(ApiRequest::get(format!("apps/{app}/deployments")))
        .await?;

    match response.status {
        200 => {
            let list: DeploymentList = response
                .json()
                .map_err(|e| DeployError::Api {
                    status: 200,
                    message: format!("unparseable deployment list: {e}"),
                    body: Some(response.body.clone()),
                })?;
            Ok(list.value)
        }
        404 => Err(DeployError::NoDeploymentsExist(app.to_string())),
        _ => Err(DeployError::from_response(&response)),
    }
}

/// Fetch the service resource itself, mostly for its SKU tier.
pub async fn get_service(api: &dyn ServiceApi) -> Result<ServiceResource, DeployError> {
    let response = api.request(ApiRequest::get("")).await?;

    if response.status != 200 {
        return Err(DeployError::from_response(&response));
    }
    response.json().map_err(|e| DeployError::Api {
        status: 200,
        message: format!("unparseable service resource: {e}"),
        body: Some(response.body.clone()),
    })
}

/// Resolve `target` against the inventory.
///
/// Pure policy; the single side effect of the resolution step is the
/// inventory read done by the caller.
pub fn resolve_target(
    target: &Target,
    allow_create: bool,
    inventory: &[DeploymentResource],
) -> Result<ResolvedTarget, DeployError> {
    match target {
        Target::Inactive => {
            if let Some(slot) = inventory.iter().find(|d| !d.properties.active) {
                let name = DeploymentName::new(&slot.name).map_err(|_| {
                    DeployError::DeploymentDoesNotExist(slot.name.clone())
                })?;
                return Ok(ResolvedTarget {
                    name,
                    must_create: false,
                });
            }

            if !allow_create {
                return Err(DeployError::NoInactiveDeployment);
            }

            ensure_room_for_creation(inventory)?;
            Ok(ResolvedTarget {
                name: DeploymentName::new(DEFAULT_STAGING_NAME)
                    .expect("default staging name is a valid deployment name"),
                must_create: true,
            })
        }
        Target::Named(requested) => {
            if inventory.iter().any(|d| d.name == requested.as_str()) {
                return Ok(ResolvedTarget {
                    name: requested.clone(),
                    must_create: false,
                });
            }

            if !allow_create {
                return Err(DeployError::DeploymentDoesNotExist(requested.to_string()));
            }

            ensure_room_for_creation(inventory)?;
            Ok(ResolvedTarget {
                name: requested.clone(),
                must_create: true,
            })
        }
    }
}

/// Most SKUs permit at most one active and one inactive slot.
fn ensure_room_for_creation(inventory: &[DeploymentResource]) -> Result<(), DeployError> {
    if inventory.len() >= 2 {
        Err(DeployError::TooManyDeploymentsExist)
    } else {
        Ok(())
    }
}
