//! Common test utilities for zosfiles server integration tests
//!
//! Each test gets its own `wiremock` server standing in for z/OSMF and a
//! full application router whose `HttpConnector` points at it.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::TestZosmf;
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let zosmf = TestZosmf::start().await;
//!     let (status, _, body) = zosmf.get("/api/v2/datasets/SYS1.*").await;
//! }
//! ```

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::MockServer;
use zosfiles_server::{
    api,
    config::{Config, ZosmfConfig},
    features::FeatureState,
    zosmf::HttpConnector,
};

pub const TEST_USER: &str = "IBMUSER";
pub const TEST_PASSWORD: &str = "SYS1";

/// Path of the REST files services on the mock server
pub fn restfiles(path: &str) -> String {
    format!("/zosmf/restfiles/{}", path.trim_start_matches('/'))
}

/// Mock z/OSMF plus the router under test
pub struct TestZosmf {
    pub server: MockServer,
    pub app: Router,
}

impl TestZosmf {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let config = ZosmfConfig {
            base_url: server.uri(),
            username: Some(TEST_USER.to_string()),
            password: Some(TEST_PASSWORD.to_string()),
            timeout_secs: 5,
            accept_invalid_certs: false,
        };
        let app = app_for(&config);
        Self { server, app }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, HeaderMap, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn send_json(
        &self,
        method: &str,
        uri: &str,
        body: Value,
    ) -> (StatusCode, HeaderMap, Value) {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
        send(&self.app, request).await
    }
}

/// Router wired to a real `HttpConnector`
pub fn app_for(zosmf: &ZosmfConfig) -> Router {
    let connector = HttpConnector::new(zosmf).unwrap();
    let config = Config {
        zosmf: zosmf.clone(),
        ..Config::default()
    };
    api::create_router(
        FeatureState {
            connector: Arc::new(connector),
        },
        &config,
    )
}

/// Send one request; an empty body comes back as `Value::Null`
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, headers, body)
}
