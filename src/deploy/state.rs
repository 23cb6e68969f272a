// ABOUTME: Rollout state marker types for the type state pattern.
// ABOUTME: Each state carries the data that provably exists at that point.

use crate::types::DeploymentName;

use super::payload::SourceKind;
use super::target::ResolvedTarget;

/// Initial state: parameters gathered, nothing resolved yet.
/// Available actions: `resolve_target()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Initialized;

/// Target resolved: the slot to act on is known.
/// Available actions: `stage()`
#[derive(Debug, Clone)]
pub struct TargetResolved {
    pub(crate) target: ResolvedTarget,
}

/// Staged: the artifact is uploaded (or built, or referenced as an image)
/// and the deployment source shape is fixed.
/// Available actions: `apply()`
#[derive(Debug, Clone)]
pub struct Staged {
    pub(crate) target: ResolvedTarget,
    pub(crate) source: SourceKind,
}

/// Applied: the mutation completed and the slot is in its new shape.
/// Available actions: `test_endpoint()`, `finish()`
#[derive(Debug, Clone)]
pub struct Applied {
    pub(crate) name: DeploymentName,
}
