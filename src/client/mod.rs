// ABOUTME: Service client abstraction for the management API.
// ABOUTME: Defines the ServiceApi trait plus normalized request/response types.

mod error;
mod http;
pub mod model;

pub use error::{ClientError, ClientErrorKind};
pub use http::HttpServiceClient;

use async_trait::async_trait;
use std::path::Path;

/// API version sent with every management call.
pub const API_VERSION: &str = "2024-05-01-preview";

/// HTTP method of a management API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// One call against the management API.
///
/// `path` is either relative to the service resource (the client appends
/// the API version) or an absolute status-check URL returned by a prior
/// long-running mutation (used verbatim).
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: None,
        }
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self {
            method: Method::Put,
            path: path.into(),
            body: None,
        }
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self {
            method: Method::Patch,
            path: path.into(),
            body: None,
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Normalized response from the management API.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Status-check URL when the mutation is long-running.
    pub operation_url: Option<String>,
    /// Parsed JSON body (`null` when the body was empty).
    pub body: serde_json::Value,
}

impl ApiResponse {
    /// Deserialize the body into a typed value.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.body.clone())
    }

    /// Human-readable message from a remote error body, falling back to
    /// the raw body text, or to the status when there was no body at all.
    pub fn error_message(&self) -> String {
        self.body
            .pointer("/error/message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| match &self.body {
                serde_json::Value::Null => format!("HTTP status {}", self.status),
                body => body.to_string(),
            })
    }

    /// Remote error code from a structured error body, if any.
    pub fn error_code(&self) -> Option<String> {
        self.body
            .pointer("/error/code")
            .and_then(|c| c.as_str())
            .map(str::to_string)
    }
}

/// Transport boundary of the deployment engine.
///
/// The production implementation is [`HttpServiceClient`]; tests inject a
/// scripted fake so every flow can run without a live service.
#[async_trait]
pub trait ServiceApi: Send + Sync {
    /// Issue one authenticated management call.
    async fn request(&self, req: ApiRequest) -> Result<ApiResponse, ClientError>;

    /// Upload a local file to a SAS-style write-only URL.
    ///
    /// The URL is a time-limited credential and must never be logged.
    async fn upload(&self, sas_url: &str, file: &Path) -> Result<(), ClientError>;

    /// Fetch plain text from an unauthenticated URL (deploy log files).
    async fn fetch_text(&self, url: &str) -> Result<String, ClientError>;
}
