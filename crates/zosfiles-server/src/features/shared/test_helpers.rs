//! Test helpers for runner and route tests
//!
//! `MockConnector` replays queued responses in order and records every
//! request it was asked to execute.
//!
//! # Examples
//!
//! ```rust,ignore
//! use zosfiles_server::features::shared::test_helpers::*;
//!
//! let connector = MockConnector::new()
//!     .respond_json(200, json!({ "items": [{ "member": "IEFBR14" }] }));
//!
//! let members = list_members::handle(&connector, query, &Default::default()).await?;
//! assert_eq!(connector.request_count(), 1);
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use http::{header, HeaderMap, HeaderValue};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use url::Url;

use crate::error::ZosmfError;
use crate::zosmf::connector::{restfiles_url, Connector, TransportError};
use crate::zosmf::request::{PreparedRequest, RequestBody};
use crate::zosmf::response::RawResponse;

pub const MOCK_BASE_URL: &str = "https://zosmf.test:443";

enum Reply {
    Respond(RawResponse),
    Fail(String),
}

/// Scripted connector for unit tests
pub struct MockConnector {
    base_url: Url,
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<PreparedRequest>>,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    pub fn new() -> Self {
        Self {
            base_url: Url::parse(MOCK_BASE_URL).unwrap(),
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a complete response
    pub fn respond(self, response: RawResponse) -> Self {
        self.replies.lock().unwrap().push_back(Reply::Respond(response));
        self
    }

    pub fn respond_json(self, status: u16, body: Value) -> Self {
        self.respond(json_response(status, &body.to_string()))
    }

    pub fn respond_text(self, status: u16, body: &str) -> Self {
        self.respond(text_response(status, body))
    }

    /// Queue a response without an entity
    pub fn respond_empty(self, status: u16) -> Self {
        self.respond(RawResponse::new(status, HeaderMap::new(), None))
    }

    /// Queue a transport failure
    pub fn fail(self, message: &str) -> Self {
        self.replies.lock().unwrap().push_back(Reply::Fail(message.to_string()));
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<PreparedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The only request executed so far; panics unless exactly one was sent
    pub fn single_request(&self) -> PreparedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

#[async_trait]
impl Connector for MockConnector {
    fn resolve(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, ZosmfError> {
        restfiles_url(&self.base_url, segments, query)
    }

    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Fail(message)) => Err(TransportError::Connect(message)),
            None => Err(TransportError::Connect("no response queued".to_string())),
        }
    }
}

/// Response with a JSON content type and the given raw body
pub fn json_response(status: u16, body: &str) -> RawResponse {
    with_content_type(status, "application/json", body)
}

pub fn text_response(status: u16, body: &str) -> RawResponse {
    with_content_type(status, "text/plain", body)
}

/// Add a header to a canned response
pub fn with_header(mut response: RawResponse, name: &'static str, value: &str) -> RawResponse {
    response
        .headers
        .insert(name, HeaderValue::from_str(value).unwrap());
    response
}

fn with_content_type(status: u16, content_type: &'static str, body: &str) -> RawResponse {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    RawResponse::new(status, headers, Some(Bytes::copy_from_slice(body.as_bytes())))
}

/// Request body as JSON, panicking for other body kinds
pub fn json_body(request: &PreparedRequest) -> Value {
    match &request.body {
        Some(RequestBody::Json(value)) => value.clone(),
        other => panic!("expected a JSON body, got {other:?}"),
    }
}

/// Value of a request header as text
pub fn header_value(request: &PreparedRequest, name: &str) -> Option<String> {
    request
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
