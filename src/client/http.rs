// ABOUTME: reqwest-backed implementation of the ServiceApi trait.
// ABOUTME: Handles bearer auth, API versioning, and async-operation headers.

use async_trait::async_trait;
use futures::StreamExt;
use snafu::ResultExt;
use std::path::Path;

use super::error::{BodySnafu, IoSnafu, TransportSnafu, UrlSnafu};
use super::{API_VERSION, ApiRequest, ApiResponse, ClientError, Method, ServiceApi};

/// Header carrying the status-check URL of a long-running mutation.
const ASYNC_OPERATION_HEADER: &str = "azure-asyncoperation";

/// Authenticated HTTP client bound to one service resource.
#[derive(Clone)]
pub struct HttpServiceClient {
    client: reqwest::Client,
    base_url: url::Url,
    token: String,
}

impl std::fmt::Debug for HttpServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Token deliberately omitted.
        f.debug_struct("HttpServiceClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl HttpServiceClient {
    /// Create a client for the service at `base_url` (the management
    /// endpoint joined with the service resource path).
    pub fn new(base_url: &str, token: String) -> Result<Self, ClientError> {
        let mut base_url = url::Url::parse(base_url).context(UrlSnafu)?;
        // A trailing slash keeps Url::join from eating the last segment.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            token,
        })
    }

    fn resolve(&self, path: &str) -> Result<url::Url, ClientError> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return url::Url::parse(path).context(UrlSnafu);
        }

        let mut url = self.base_url.join(path).context(UrlSnafu)?;
        url.query_pairs_mut().append_pair("api-version", API_VERSION);
        Ok(url)
    }
}

#[async_trait]
impl ServiceApi for HttpServiceClient {
    async fn request(&self, req: ApiRequest) -> Result<ApiResponse, ClientError> {
        let url = self.resolve(&req.path)?;
        tracing::debug!(method = req.method.as_str(), path = %req.path, "api call");

        let method = match req.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, url).bearer_auth(&self.token);
        builder = match &req.body {
            Some(body) => builder.json(body),
            // POST endpoints such as getResourceUploadUrl take no body but
            // still expect a JSON content type.
            None if req.method == Method::Post => builder
                .header("content-type", "application/json")
                .body(""),
            None => builder,
        };

        let response = builder.send().await.context(TransportSnafu)?;
        let status = response.status().as_u16();

        let operation_url = response
            .headers()
            .get(ASYNC_OPERATION_HEADER)
            .or_else(|| response.headers().get(reqwest::header::LOCATION))
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let text = response.text().await.context(BodySnafu)?;
        let body = if text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text))
        };

        tracing::debug!(status, long_running = operation_url.is_some(), "api response");
        Ok(ApiResponse {
            status,
            operation_url,
            body,
        })
    }

    async fn upload(&self, sas_url: &str, file: &Path) -> Result<(), ClientError> {
        let bytes = tokio::fs::read(file).await.context(IoSnafu)?;
        tracing::debug!(size = bytes.len(), "uploading artifact");

        let response = self
            .client
            .put(sas_url)
            .header("x-ms-blob-type", "BlockBlob")
            .body(bytes)
            .send()
            .await
            .context(TransportSnafu)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            // Careful not to echo the SAS URL here.
            Err(ClientError::Api {
                status: status.as_u16(),
                message: format!("artifact upload rejected: {status}"),
                body: None,
            })
        }
    }

    async fn fetch_text(&self, url: &str) -> Result<String, ClientError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context(TransportSnafu)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: format!("log fetch rejected: {status}"),
                body: None,
            });
        }

        let mut text = String::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk: bytes::Bytes = chunk.context(TransportSnafu)?;
            text.push_str(&String::from_utf8_lossy(&chunk));
        }
        Ok(text)
    }
}
