// ABOUTME: Validated name newtypes shared across the crate.
// ABOUTME: Prevents mixing up app and deployment slot identifiers.

mod app_name;
mod deployment_name;

pub use app_name::{AppName, AppNameError};
pub use deployment_name::{DeploymentName, DeploymentNameError};

/// Name given to the inactive slot when it has to be created.
pub const DEFAULT_STAGING_NAME: &str = "staging";
