// ABOUTME: Slot management commands: set-active, delete, status.
// ABOUTME: Thin wrappers over the deploy module's slot operations.

use slipway::config::Config;
use slipway::deploy::{delete_deployment, get_service, list_deployments, set_active_deployment};
use slipway::diagnostics::Diagnostics;
use slipway::error::{Error, Result};
use slipway::output::Output;
use slipway::types::{AppName, DeploymentName};

fn app_name(config: &Config) -> Result<AppName> {
    AppName::new(&config.app).map_err(|e| Error::InvalidConfig(e.to_string()))
}

fn slot_name(name: &str) -> Result<DeploymentName> {
    DeploymentName::new(name).map_err(|e| Error::InvalidConfig(e.to_string()))
}

/// Repoint production traffic to `deployment`.
pub async fn set_active(config: Config, deployment: &str, mut output: Output) -> Result<()> {
    let client = super::build_client(&config)?;
    let app = app_name(&config)?;
    let slot = slot_name(deployment)?;

    output.start_timer();
    output.progress(&format!("Switching active slot of {app} to {slot}"));

    set_active_deployment(&client, &app, &slot, config.timeouts.operation).await?;

    output.success(&format!("Slot {slot} is now active"));
    Ok(())
}

/// Delete a slot, best effort once the API accepts the request.
pub async fn delete(config: Config, deployment: &str, mut output: Output) -> Result<()> {
    let client = super::build_client(&config)?;
    let app = app_name(&config)?;
    let slot = slot_name(deployment)?;
    let mut diag = Diagnostics::default();

    output.start_timer();
    output.progress(&format!("Deleting slot {slot} of {app}"));

    delete_deployment(&client, &app, &slot, config.timeouts.operation, &mut diag).await?;

    for warning in diag.warnings() {
        output.warning(&warning.message);
    }

    output.success(&format!("Deleted slot {slot}"));
    Ok(())
}

/// List the app's slots with their active flag and provisioning state.
pub async fn status(config: Config, output: Output) -> Result<()> {
    let client = super::build_client(&config)?;
    let app = app_name(&config)?;

    let service = get_service(&client).await?;
    let tier = service.sku.tier.as_deref().unwrap_or("unknown");
    output.progress(&format!("Service tier: {tier}"));

    let inventory = list_deployments(&client, &app).await?;
    if inventory.is_empty() {
        output.progress(&format!("App {app} has no deployments"));
        return Ok(());
    }

    for slot in inventory {
        let marker = if slot.properties.active {
            "active"
        } else {
            "staging"
        };
        let state = slot
            .properties
            .provisioning_state
            .map(|s| format!("{s:?}"))
            .unwrap_or_else(|| "unknown".to_string());
        output.progress(&format!("{:<24} {marker:<8} {state}", slot.name));
    }
    Ok(())
}
