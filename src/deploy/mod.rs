// ABOUTME: Rollout orchestration using the type state pattern.
// ABOUTME: Exports state markers, the Rollout struct, and slot operations.

mod build;
mod error;
mod logs;
mod payload;
mod poll;
mod rollout;
mod state;
mod switch;
mod target;
mod transitions;
mod upload;

pub use build::{await_build, trigger_build};
pub use error::DeployError;
pub use payload::{
    CustomContainer, DeploymentPayload, RegistryCredential, SettingsInput, SourceKind,
    build_payload, parse_environment_string,
};
pub use poll::{Completion, PollSettings, await_operation};
pub use rollout::{Rollout, RolloutParams, SourceSpec, Timeouts};
pub use state::{Applied, Initialized, Staged, TargetResolved};
pub use switch::{delete_deployment, set_active_deployment};
pub use target::{ResolvedTarget, Target, get_service, list_deployments, resolve_target};
pub use upload::{get_build_service_upload_target, get_upload_target, upload_artifact};
