// ABOUTME: Validated app name newtype.
// ABOUTME: App names are RFC 1123 labels within a service instance.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppNameError {
    #[error("app name cannot be empty")]
    Empty,

    #[error("app name exceeds maximum length of 32 characters")]
    TooLong,

    #[error("app name cannot start or end with a hyphen")]
    EdgeHyphen,

    #[error("invalid character in app name: '{0}'")]
    InvalidChar(char),
}

/// Name of an app within the managed service instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppName(String);

impl AppName {
    pub fn new(value: &str) -> Result<Self, AppNameError> {
        if value.is_empty() {
            return Err(AppNameError::Empty);
        }

        if value.len() > 32 {
            return Err(AppNameError::TooLong);
        }

        if value.starts_with('-') || value.ends_with('-') {
            return Err(AppNameError::EdgeHyphen);
        }

        for c in value.chars() {
            if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' {
                return Err(AppNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_names() {
        assert!(AppName::new("gateway").is_ok());
        assert!(AppName::new("api-v2").is_ok());
    }

    #[test]
    fn rejects_invalid_names() {
        assert!(matches!(AppName::new(""), Err(AppNameError::Empty)));
        assert!(matches!(AppName::new("-app"), Err(AppNameError::EdgeHyphen)));
        assert!(matches!(
            AppName::new("App"),
            Err(AppNameError::InvalidChar('A'))
        ));
        assert!(matches!(
            AppName::new(&"a".repeat(33)),
            Err(AppNameError::TooLong)
        ));
    }
}
