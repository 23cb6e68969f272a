// ABOUTME: Generic rollout struct parameterized by state marker.
// ABOUTME: Carries the per-run parameters through the state machine.

use std::path::PathBuf;
use std::time::Duration;

use crate::types::{AppName, DeploymentName};

use super::payload::{CustomContainer, SettingsInput};
use super::state::{Applied, Initialized, Staged, TargetResolved};
use super::target::Target;

/// Where the deployment's bits come from.
#[derive(Debug, Clone)]
pub enum SourceSpec {
    /// A local package: prebuilt archive or source directory.
    Artifact {
        path: PathBuf,
        /// Route through the build service instead of deploying directly.
        use_build_service: bool,
        /// Builder resource reference; the service default when absent.
        builder: Option<String>,
    },
    /// A custom container image; nothing local is uploaded.
    Container(CustomContainer),
}

/// Caller-imposed bounds on the two polling loops. `None` leaves a loop
/// unbounded, relying on the surrounding process deadline.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timeouts {
    pub operation: Option<Duration>,
    pub build: Option<Duration>,
}

/// Everything a single rollout needs, fixed up front at the process
/// boundary. Core logic never reads ad-hoc global state.
#[derive(Debug, Clone)]
pub struct RolloutParams {
    pub app: AppName,
    pub target: Target,
    pub allow_create: bool,
    pub source: SourceSpec,
    pub settings: SettingsInput,
    pub version: Option<String>,
    pub timeouts: Timeouts,
}

/// A rollout in progress, parameterized by its current state.
///
/// The state type parameter `S` carries state-specific data (the resolved
/// slot, the staged source) directly in the state type, so later steps
/// cannot run before the data they need exists.
#[derive(Debug)]
pub struct Rollout<S> {
    pub(crate) params: RolloutParams,
    pub(crate) state: S,
}

impl Rollout<Initialized> {
    /// Begin a rollout with parameters gathered at the process boundary.
    pub fn new(params: RolloutParams) -> Self {
        Rollout {
            params,
            state: Initialized,
        }
    }
}

impl<S> Rollout<S> {
    /// Get the app this rollout targets.
    pub fn app(&self) -> &AppName {
        &self.params.app
    }

    /// Get the rollout parameters.
    pub fn params(&self) -> &RolloutParams {
        &self.params
    }
}

impl Rollout<TargetResolved> {
    /// Get the resolved slot name.
    pub fn deployment_name(&self) -> &DeploymentName {
        &self.state.target.name
    }

    /// Whether the slot has to be created by the apply step.
    pub fn must_create(&self) -> bool {
        self.state.target.must_create
    }
}

impl Rollout<Staged> {
    /// Get the resolved slot name.
    pub fn deployment_name(&self) -> &DeploymentName {
        &self.state.target.name
    }

    /// Get the staged source shape.
    pub fn source(&self) -> &super::payload::SourceKind {
        &self.state.source
    }
}

impl Rollout<Applied> {
    /// Get the slot the rollout landed on.
    pub fn deployment_name(&self) -> &DeploymentName {
        &self.state.name
    }

    /// Consume the rollout and return the slot name.
    pub fn finish(self) -> DeploymentName {
        self.state.name
    }
}
