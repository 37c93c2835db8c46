//! Buffered view over one z/OSMF response
//!
//! The connector reads the entity once into memory. `ResponseCache` keeps
//! that buffer for the life of a single run and hands out text and JSON
//! views on demand; the decoded text is computed at most once.

use bytes::Bytes;
use http::{header, HeaderMap};
use mime::Mime;
use serde_json::{Map, Value};
use std::sync::OnceLock;
use thiserror::Error;

/// Failures while interpreting a buffered response
#[derive(Error, Debug)]
pub enum ResponseError {
    #[error("Response has no entity")]
    NoEntity,

    #[error("Response content type '{0}' is not JSON")]
    NotJson(String),

    #[error("Malformed JSON in response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON {expected} in response")]
    UnexpectedShape { expected: &'static str },

    #[error("Response entity is not valid UTF-8 after byte {valid_up_to}")]
    NotUtf8 { valid_up_to: usize },
}

/// A completed HTTP response as returned by a connector
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    /// `None` when the response carried no entity at all
    pub body: Option<Bytes>,
}

impl RawResponse {
    pub fn new(status: u16, headers: HeaderMap, body: Option<Bytes>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }
}

/// Wraps exactly one response for the duration of a run
#[derive(Debug)]
pub struct ResponseCache {
    raw: RawResponse,
    text: OnceLock<String>,
}

impl ResponseCache {
    pub fn new(raw: RawResponse) -> Self {
        Self {
            raw,
            text: OnceLock::new(),
        }
    }

    pub fn status(&self) -> u16 {
        self.raw.status
    }

    /// First value of the named header, if present and valid text
    pub fn header(&self, name: &str) -> Option<&str> {
        self.raw.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Declared MIME type of the entity
    pub fn content_type(&self) -> Option<Mime> {
        self.header(header::CONTENT_TYPE.as_str())?.parse().ok()
    }

    /// True when the declared content type is `application/json` or a `+json` suffix type
    pub fn is_json(&self) -> bool {
        self.content_type().is_some_and(|mime| {
            mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON)
        })
    }

    pub fn has_entity(&self) -> bool {
        self.raw.body.is_some()
    }

    /// Raw entity bytes, empty when there is no entity
    pub fn entity_as_bytes(&self) -> &[u8] {
        self.raw.body.as_deref().unwrap_or_default()
    }

    /// Entity decoded as UTF-8 text; decoded once and cached
    pub fn entity_as_text(&self) -> &str {
        self.text
            .get_or_init(|| String::from_utf8_lossy(self.entity_as_bytes()).into_owned())
    }

    /// Entity as UTF-8 text without replacing invalid sequences
    pub fn entity_as_utf8(&self) -> Result<&str, ResponseError> {
        std::str::from_utf8(self.entity_as_bytes()).map_err(|e| ResponseError::NotUtf8 {
            valid_up_to: e.valid_up_to(),
        })
    }

    /// Parse the entity as JSON of any shape
    ///
    /// Fails when the entity is absent or the content type is not JSON.
    pub fn entity_as_json(&self) -> Result<Value, ResponseError> {
        if !self.has_entity() {
            return Err(ResponseError::NoEntity);
        }
        if !self.is_json() {
            let declared = self
                .header(header::CONTENT_TYPE.as_str())
                .unwrap_or("none")
                .to_string();
            return Err(ResponseError::NotJson(declared));
        }
        Ok(serde_json::from_str(self.entity_as_text())?)
    }

    pub fn entity_as_json_object(&self) -> Result<Map<String, Value>, ResponseError> {
        match self.entity_as_json()? {
            Value::Object(map) => Ok(map),
            _ => Err(ResponseError::UnexpectedShape { expected: "object" }),
        }
    }

    pub fn entity_as_json_array(&self) -> Result<Vec<Value>, ResponseError> {
        match self.entity_as_json()? {
            Value::Array(items) => Ok(items),
            _ => Err(ResponseError::UnexpectedShape { expected: "array" }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn response(content_type: Option<&'static str>, body: Option<&'static str>) -> ResponseCache {
        let mut headers = HeaderMap::new();
        if let Some(ct) = content_type {
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(ct));
        }
        let body = body.map(|b| Bytes::from_static(b.as_bytes()));
        ResponseCache::new(RawResponse::new(200, headers, body))
    }

    #[test]
    fn test_text_is_decoded_once() {
        let cache = response(Some("text/plain"), Some("//IEFBR14 JOB"));

        let first = cache.entity_as_text();
        let second = cache.entity_as_text();

        assert_eq!(first, "//IEFBR14 JOB");
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_strict_text_rejects_invalid_utf8() {
        let cache = ResponseCache::new(RawResponse::new(
            200,
            HeaderMap::new(),
            Some(Bytes::from_static(b"caf\xe9")),
        ));

        assert_eq!(cache.entity_as_bytes(), b"caf\xe9");
        assert!(matches!(
            cache.entity_as_utf8(),
            Err(ResponseError::NotUtf8 { valid_up_to: 3 })
        ));

        let cache = response(None, Some("caf\u{e9}"));
        assert_eq!(cache.entity_as_utf8().unwrap(), "caf\u{e9}");
    }

    #[test]
    fn test_json_with_charset_parameter() {
        let cache = response(
            Some("application/json; charset=UTF-8"),
            Some(r#"{"items":[{"member":"IEFBR14"}]}"#),
        );

        assert!(cache.is_json());
        let object = cache.entity_as_json_object().unwrap();
        assert!(object.contains_key("items"));
        assert!(matches!(
            cache.entity_as_json_array(),
            Err(ResponseError::UnexpectedShape { expected: "array" })
        ));
    }

    #[test]
    fn test_non_json_body_is_not_parsed() {
        let cache = response(Some("text/plain"), Some("{\"looks\":\"like json\"}"));
        assert!(matches!(cache.entity_as_json(), Err(ResponseError::NotJson(_))));
    }

    #[test]
    fn test_missing_entity() {
        let cache = response(Some("application/json"), None);
        assert!(!cache.has_entity());
        assert_eq!(cache.entity_as_text(), "");
        assert!(matches!(cache.entity_as_json(), Err(ResponseError::NoEntity)));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let cache = response(Some("application/json"), Some("{\"message\":"));
        assert!(matches!(cache.entity_as_json(), Err(ResponseError::Json(_))));
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert("etag", HeaderValue::from_static("\"0A1B2C\""));
        let cache = ResponseCache::new(RawResponse::new(200, headers, None));
        assert_eq!(cache.header("ETag"), Some("\"0A1B2C\""));
        assert_eq!(cache.header("If-Match"), None);
    }
}
