// ABOUTME: Shared test support: a scripted fake transport.
// ABOUTME: Records every call so tests can assert on request ordering.
#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use slipway::client::{ApiRequest, ApiResponse, ClientError, Method, ServiceApi};

/// One recorded management call.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

struct Rule {
    method: Method,
    path_contains: String,
    responses: VecDeque<ApiResponse>,
}

/// Scripted in-memory transport.
///
/// Rules match on method plus a path substring; each match pops the next
/// queued response, and the final response of a rule repeats (so polling
/// loops can observe a terminal status forever).
#[derive(Default)]
pub struct FakeApi {
    rules: Mutex<Vec<Rule>>,
    requests: Mutex<Vec<RecordedRequest>>,
    uploads: Mutex<Vec<(String, PathBuf)>>,
    log_texts: Mutex<HashMap<String, String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for calls matching `method` and a path substring.
    pub fn on(&self, method: Method, path_contains: &str, response: ApiResponse) -> &Self {
        let mut rules = self.rules.lock().unwrap();
        if let Some(rule) = rules
            .iter_mut()
            .find(|r| r.method == method && r.path_contains == path_contains)
        {
            rule.responses.push_back(response);
        } else {
            rules.push(Rule {
                method,
                path_contains: path_contains.to_string(),
                responses: VecDeque::from([response]),
            });
        }
        self
    }

    /// Serve `text` for unauthenticated fetches of `url`.
    pub fn serve_text(&self, url: &str, text: &str) {
        self.log_texts
            .lock()
            .unwrap()
            .insert(url.to_string(), text.to_string());
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<(String, PathBuf)> {
        self.uploads.lock().unwrap().clone()
    }

    /// All mutation calls (PUT/PATCH/DELETE) seen so far.
    pub fn mutations(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| matches!(r.method, Method::Put | Method::Patch | Method::Delete))
            .collect()
    }
}

#[async_trait]
impl ServiceApi for FakeApi {
    async fn request(&self, req: ApiRequest) -> Result<ApiResponse, ClientError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: req.method,
            path: req.path.clone(),
            body: req.body.clone(),
        });

        let mut rules = self.rules.lock().unwrap();
        let rule = rules
            .iter_mut()
            .find(|r| r.method == req.method && req.path.contains(&r.path_contains))
            .unwrap_or_else(|| panic!("unexpected request: {} {}", req.method.as_str(), req.path));

        let response = if rule.responses.len() > 1 {
            rule.responses.pop_front().unwrap()
        } else {
            rule.responses.front().cloned().unwrap()
        };
        Ok(response)
    }

    async fn upload(&self, sas_url: &str, file: &Path) -> Result<(), ClientError> {
        self.uploads
            .lock()
            .unwrap()
            .push((sas_url.to_string(), file.to_path_buf()));
        Ok(())
    }

    async fn fetch_text(&self, url: &str) -> Result<String, ClientError> {
        self.log_texts
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or(ClientError::Api {
                status: 404,
                message: format!("no text served for {url}"),
                body: None,
            })
    }
}

/// A 200 response with the given JSON body.
pub fn ok_json(body: Value) -> ApiResponse {
    ApiResponse {
        status: 200,
        operation_url: None,
        body,
    }
}

/// A bare response with the given status and no body.
pub fn status(status: u16) -> ApiResponse {
    ApiResponse {
        status,
        operation_url: None,
        body: Value::Null,
    }
}

/// A response with a status, JSON body, and async-operation URL.
pub fn with_operation(status: u16, operation_url: &str) -> ApiResponse {
    ApiResponse {
        status,
        operation_url: Some(operation_url.to_string()),
        body: Value::Null,
    }
}

/// A response carrying both a status and a JSON body.
pub fn status_json(status: u16, body: Value) -> ApiResponse {
    ApiResponse {
        status,
        operation_url: None,
        body,
    }
}
