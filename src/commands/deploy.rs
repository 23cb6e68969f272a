// ABOUTME: Deploy command implementation.
// ABOUTME: Drives the rollout state machine from start to test endpoint.

use slipway::config::Config;
use slipway::deploy::Rollout;
use slipway::diagnostics::Diagnostics;
use slipway::error::Result;
use slipway::output::Output;

/// Deploy the configured artifact to the resolved slot.
pub async fn deploy(config: Config, mut output: Output) -> Result<()> {
    let client = super::build_client(&config)?;
    let params = config.rollout_params()?;
    let mut diag = Diagnostics::default();

    output.start_timer();
    output.progress(&format!("Deploying to app {}", params.app));

    let rollout = Rollout::new(params).resolve_target(&client).await?;
    output.progress(&format!(
        "  → Target slot: {}{}",
        rollout.deployment_name(),
        if rollout.must_create() { " (new)" } else { "" }
    ));

    output.progress("  → Staging artifact...");
    let rollout = rollout.stage(&client, &mut diag).await?;

    output.progress("  → Applying deployment...");
    let rollout = rollout.apply(&client, &output, &mut diag).await?;

    let endpoint = rollout.test_endpoint(&client).await?;
    output.progress(&format!("  → Test endpoint: {endpoint}"));

    for warning in diag.warnings() {
        output.warning(&warning.message);
    }

    output.success(&format!("Deployed to slot {}", rollout.finish()));
    Ok(())
}
