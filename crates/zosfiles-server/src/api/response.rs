//! API response types
//!
//! Error bodies are `{status, message}`; success bodies are the DTOs from
//! `zosfiles_common::types`, with entity tags carried in the `ETag` header.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Standard error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Attach an `ETag` header when one is known
///
/// A tag that is not a valid header value is dropped with a warning.
pub fn with_etag(mut response: Response, etag: Option<&str>) -> Response {
    if let Some(etag) = etag {
        match HeaderValue::from_str(etag) {
            Ok(value) => {
                response.headers_mut().insert(header::ETAG, value);
            },
            Err(_) => tracing::warn!(etag, "Dropping ETag that is not a valid header value"),
        }
    }
    response
}

/// `201 Created` pointing at the new resource
pub fn created(location: &str) -> Response {
    let mut response = StatusCode::CREATED.into_response();
    if let Ok(value) = HeaderValue::from_str(location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    response
}
