// ABOUTME: Diagnostics accumulator for non-fatal warnings during a rollout.
// ABOUTME: Collects degradations that must not mask the primary outcome.

/// Collects non-fatal warnings during deployment operations.
#[derive(Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A non-fatal warning collected during a rollout.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// Create a log-fetch warning.
    pub fn log_fetch(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::LogFetch,
            message: message.into(),
        }
    }

    /// Create a deletion-wait warning.
    pub fn delete_wait(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::DeleteWait,
            message: message.into(),
        }
    }

    /// Create an archive-packaging warning.
    pub fn packaging(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::Packaging,
            message: message.into(),
        }
    }
}

/// Categories of warnings that can occur during a rollout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Failed to obtain or stream the deploy log (deploy itself resolved).
    LogFetch,
    /// Failed while awaiting completion of a best-effort deletion.
    DeleteWait,
    /// Harmless diagnostic while packaging a source directory.
    Packaging,
}
