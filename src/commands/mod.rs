// ABOUTME: CLI command implementations.
// ABOUTME: Glue between config, the service client, and the rollout engine.

mod deploy;
mod slots;

pub use deploy::deploy;
pub use slots::{delete, set_active, status};

use slipway::client::HttpServiceClient;
use slipway::config::Config;
use slipway::error::Result;

/// Build the authenticated client from config, resolving the token once.
pub(crate) fn build_client(config: &Config) -> Result<HttpServiceClient> {
    let token = config.resolve_token()?;
    Ok(HttpServiceClient::new(&config.service_url, token)?)
}
