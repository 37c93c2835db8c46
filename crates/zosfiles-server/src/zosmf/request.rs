//! Outbound request built by a runner before execution

use bytes::Bytes;
use http::{header, HeaderMap, HeaderName, HeaderValue, Method};
use serde_json::Value;
use url::Url;

use crate::error::ZosmfError;

/// `X-IBM-*` request headers understood by the z/OSMF REST files services
pub mod ibm_headers {
    pub const ATTRIBUTES: &str = "x-ibm-attributes";
    pub const DATA_TYPE: &str = "x-ibm-data-type";
    pub const OPTION: &str = "x-ibm-option";
    pub const RETURN_ETAG: &str = "x-ibm-return-etag";
}

/// Entity sent with a request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Text(String),
    Binary(Bytes),
}

impl RequestBody {
    pub fn content_type(&self) -> &'static str {
        match self {
            RequestBody::Json(_) => "application/json",
            RequestBody::Text(_) => "text/plain",
            RequestBody::Binary(_) => "application/octet-stream",
        }
    }
}

/// Fully-qualified request, immutable once handed to the connector
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<RequestBody>,
}

impl PreparedRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn put(url: Url) -> Self {
        Self::new(Method::PUT, url)
    }

    pub fn post(url: Url) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn delete(url: Url) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Set a header from a static name and a runtime value
    pub fn header(mut self, name: &'static str, value: &str) -> Result<Self, ZosmfError> {
        let value = HeaderValue::from_str(value).map_err(|_| {
            ZosmfError::Validation(format!("Invalid value for header {}: {:?}", name, value))
        })?;
        self.headers.insert(HeaderName::from_static(name), value);
        Ok(self)
    }

    /// Conditional write header; surrounding quotes are removed because
    /// z/OSMF rejects quoted entity tags
    pub fn if_match(self, etag: Option<&str>) -> Result<Self, ZosmfError> {
        match etag.map(strip_etag_quotes).filter(|tag| !tag.is_empty()) {
            Some(tag) => self.header("if-match", tag),
            None => Ok(self),
        }
    }

    /// Append passthrough headers; existing values for the same name are kept
    pub fn passthrough(mut self, headers: &HeaderMap) -> Self {
        for (name, value) in headers {
            self.headers.append(name.clone(), value.clone());
        }
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Text(body.into()));
        self
    }

    pub fn binary(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(RequestBody::Binary(body.into()));
        self
    }

    /// Content type implied by the body, unless a header already set one
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .or_else(|| self.body.as_ref().map(RequestBody::content_type))
    }
}

/// Remove one pair of surrounding double quotes (and a weak `W/` prefix)
pub fn strip_etag_quotes(etag: &str) -> &str {
    let tag = etag.trim();
    let tag = tag.strip_prefix("W/").unwrap_or(tag);
    tag.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(tag)
}
