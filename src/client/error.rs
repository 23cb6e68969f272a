// ABOUTME: Client error types with SNAFU pattern.
// ABOUTME: Unifies transport and remote API failures for programmatic handling.

use snafu::Snafu;

/// Unified error for calls through the service client.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ClientError {
    #[snafu(display("transport failure: {source}"))]
    Transport { source: reqwest::Error },

    #[snafu(display("invalid request URL: {source}"))]
    Url { source: url::ParseError },

    #[snafu(display("API returned {status}: {message}"))]
    Api {
        status: u16,
        message: String,
        body: Option<serde_json::Value>,
    },

    #[snafu(display("unparseable response body: {source}"))]
    Body { source: reqwest::Error },

    #[snafu(display("I/O failure reading artifact: {source}"))]
    Io { source: std::io::Error },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientErrorKind {
    /// Request never produced an HTTP response.
    Transport,
    /// A malformed URL was constructed.
    Url,
    /// The remote service rejected the call.
    Api,
    /// The response body could not be read or parsed.
    Body,
    /// Local I/O failed while preparing a request.
    Io,
}

impl ClientError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ClientErrorKind {
        match self {
            ClientError::Transport { .. } => ClientErrorKind::Transport,
            ClientError::Url { .. } => ClientErrorKind::Url,
            ClientError::Api { .. } => ClientErrorKind::Api,
            ClientError::Body { .. } => ClientErrorKind::Body,
            ClientError::Io { .. } => ClientErrorKind::Io,
        }
    }

    /// Returns the HTTP status if the remote service rejected the call.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
