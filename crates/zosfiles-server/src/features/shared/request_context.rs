//! Request-scoped values handed to runners at construction
//!
//! Both extractors read only the inbound request; nothing here is cached
//! across requests.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use http::{header, HeaderMap};
use std::convert::Infallible;

/// Marker that selects headers forwarded verbatim to z/OSMF
pub const PASSTHROUGH_MARKER: &str = "x-ibm";

/// Inbound `X-IBM-*` headers forwarded on every outbound call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassthroughHeaders(HeaderMap);

impl PassthroughHeaders {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut selected = HeaderMap::new();
        for (name, value) in headers {
            // Header names are stored lowercase, so this is a case-insensitive match.
            if name.as_str().contains(PASSTHROUGH_MARKER) {
                selected.append(name.clone(), value.clone());
            }
        }
        Self(selected)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.0
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PassthroughHeaders
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

/// Entity tag from an inbound `If-Match` header, as sent
pub fn if_match(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::IF_MATCH)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// `scheme://host` of the inbound request, used to build hyperlinks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin(String);

impl RequestOrigin {
    pub fn new(origin: impl Into<String>) -> Self {
        Self(origin.into().trim_end_matches('/').to_string())
    }

    pub fn from_headers(headers: &HeaderMap) -> Self {
        let first = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let scheme = first("x-forwarded-proto").unwrap_or_else(|| "http".to_string());
        let host = first("x-forwarded-host")
            .or_else(|| first(header::HOST.as_str()))
            .unwrap_or_else(|| "localhost".to_string());

        Self::new(format!("{}://{}", scheme, host))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Absolute URL of an API path on this origin
    pub fn join(&self, api_path: &str) -> String {
        format!("{}/{}", self.0, api_path.trim_start_matches('/'))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestOrigin
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
