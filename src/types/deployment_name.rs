// ABOUTME: Validated deployment slot name newtype.
// ABOUTME: Slot names are server-assigned and treated as opaque labels.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeploymentNameError {
    #[error("deployment name cannot be empty")]
    Empty,

    #[error("deployment name exceeds maximum length of 32 characters")]
    TooLong,
}

/// Name of one deployment slot of an app.
///
/// The service assigns and reports slot names in whatever casing it
/// likes (`theOtherOne`), so beyond emptiness and length the content is
/// opaque and passed back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeploymentName(String);

impl DeploymentName {
    pub fn new(value: &str) -> Result<Self, DeploymentNameError> {
        if value.is_empty() {
            return Err(DeploymentNameError::Empty);
        }

        if value.len() > 32 {
            return Err(DeploymentNameError::TooLong);
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeploymentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
