// ABOUTME: Error types for deployment operations.
// ABOUTME: Covers target resolution, API rejections, builds, and async waits.

use crate::client::ClientError;

/// Errors that can occur during a rollout.
///
/// Every variant aborts the remainder of the run; none is retried. The
/// two non-fatal degradations (log fetch, deletion wait) never reach this
/// type — they are downgraded to [`crate::diagnostics::Warning`]s.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// The remote service answered outside the call's accepted status set.
    #[error("API call failed with status {status}: {message}")]
    Api {
        status: u16,
        message: String,
        body: Option<serde_json::Value>,
    },

    /// Transport or client-side failure before any HTTP status existed.
    #[error(transparent)]
    Client(ClientError),

    /// Targeting the inactive slot, but every slot is active.
    #[error("no inactive deployment found and creation is disabled")]
    NoInactiveDeployment,

    /// The requested slot does not exist and creation is disabled.
    #[error("deployment does not exist: {0}")]
    DeploymentDoesNotExist(String),

    /// The SKU permits at most one active and one inactive slot.
    #[error("cannot create another deployment: two or more already exist")]
    TooManyDeploymentsExist,

    /// The app has no deployment inventory at all (listing returned 404).
    #[error("no deployments exist for app '{0}'")]
    NoDeploymentsExist(String),

    /// A polled operation outlived the configured deadline.
    #[error("operation did not complete within {0:?}")]
    OperationTimedOut(std::time::Duration),

    /// A terminal async operation reported failure.
    #[error("operation failed ({code}): {message}")]
    OperationFailed { message: String, code: String },

    /// The remote build reached a failure state.
    #[error("build failed ({code}): {message}")]
    BuildFailed { message: String, code: String },

    /// Packaging the source directory failed locally.
    #[error("failed to compress source directory: {0}")]
    CompressionFailed(String),
}

impl From<ClientError> for DeployError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Api {
                status,
                message,
                body,
            } => DeployError::Api {
                status,
                message,
                body,
            },
            other => DeployError::Client(other),
        }
    }
}

impl DeployError {
    /// Build an `Api` error from a response outside the accepted set.
    pub fn from_response(response: &crate::client::ApiResponse) -> Self {
        DeployError::Api {
            status: response.status,
            message: response.error_message(),
            body: match &response.body {
                serde_json::Value::Null => None,
                body => Some(body.clone()),
            },
        }
    }
}
