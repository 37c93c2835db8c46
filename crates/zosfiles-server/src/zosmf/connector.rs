//! Connector to the z/OSMF REST files services
//!
//! The connector owns the transport. Runners only ask it to resolve a
//! resource path into an absolute URL and to execute a prepared request.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use super::request::{PreparedRequest, RequestBody};
use super::response::RawResponse;
use crate::config::ZosmfConfig;
use crate::error::ZosmfError;

/// Path prefix of the REST files services below the z/OSMF root
pub const RESTFILES_PATH: &str = "zosmf/restfiles";

/// Header z/OSMF requires on requests that modify resources
pub const CSRF_HEADER: &str = "X-CSRF-ZOSMF-HEADER";

/// Failures below the HTTP status level
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Failed to connect to z/OSMF: {0}")]
    Connect(String),

    #[error("Timed out waiting for z/OSMF: {0}")]
    Timeout(String),

    #[error("z/OSMF request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Http(err)
        }
    }
}

/// Executes prepared requests against the remote interface
#[async_trait]
pub trait Connector: Send + Sync {
    /// Absolute URL for path segments below the REST files root
    fn resolve(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, ZosmfError>;

    /// Send the request and buffer the complete response
    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse, TransportError>;
}

/// Build `{base}/zosmf/restfiles/{segments}?{query}` from a base URL
///
/// Each segment is percent-encoded on its own, so a `/`, `?` or `#` inside
/// a name stays inside that segment. Dot segments are rejected because the
/// URL would otherwise be normalised out of the REST files root.
pub fn restfiles_url(
    base: &Url,
    segments: &[&str],
    query: &[(&str, &str)],
) -> Result<Url, ZosmfError> {
    if segments
        .iter()
        .any(|segment| matches!(segment.trim(), "." | ".."))
    {
        return Err(ZosmfError::PathNotValid(segments.join("/")));
    }

    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| ZosmfError::Validation(format!("Base URL '{}' cannot hold a path", base)))?
        .pop_if_empty()
        .extend(RESTFILES_PATH.split('/'))
        .extend(segments);

    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query.iter().copied());
    }

    Ok(url)
}

/// `reqwest` backed connector
#[derive(Clone)]
pub struct HttpConnector {
    client: Client,
    base_url: Url,
    credentials: Option<(String, String)>,
}

impl HttpConnector {
    pub fn new(config: &ZosmfConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| TransportError::Client(format!("Invalid z/OSMF base URL: {}", e)))?;

        let credentials = match (&config.username, &config.password) {
            (Some(user), Some(password)) => Some((user.clone(), password.clone())),
            _ => None,
        };

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl Connector for HttpConnector {
    fn resolve(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, ZosmfError> {
        restfiles_url(&self.base_url, segments, query)
    }

    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse, TransportError> {
        let content_type = request.content_type().map(str::to_string);

        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers)
            .header(CSRF_HEADER, "");

        if let Some((user, password)) = &self.credentials {
            builder = builder.basic_auth(user, Some(password));
        }

        if let Some(body) = request.body {
            if let Some(ct) = content_type {
                builder = builder.header(reqwest::header::CONTENT_TYPE, ct);
            }
            builder = match body {
                RequestBody::Json(value) => builder.body(value.to_string()),
                RequestBody::Text(text) => builder.body(text),
                RequestBody::Binary(bytes) => builder.body(bytes),
            };
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        debug!(status, bytes = body.len(), "z/OSMF responded");

        let body = if body.is_empty() { None } else { Some(body) };
        Ok(RawResponse::new(status, headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restfiles_url_joins_paths() {
        let base = Url::parse("https://zosmf.example.com:443/").unwrap();

        let url = restfiles_url(&base, &["ds", "STEVENH.TEST.JCL", "member"], &[]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://zosmf.example.com/zosmf/restfiles/ds/STEVENH.TEST.JCL/member"
        );

        let url = restfiles_url(&base, &["fs", "u", "steve", "file.txt"], &[]).unwrap();
        assert_eq!(url.path(), "/zosmf/restfiles/fs/u/steve/file.txt");
    }

    #[test]
    fn test_restfiles_url_keeps_base_path() {
        let base = Url::parse("https://gateway.example.com/mainframe/").unwrap();
        let url = restfiles_url(&base, &["ds", "SYS1.PARMLIB(IEASYS00)"], &[]).unwrap();
        assert_eq!(
            url.path(),
            "/mainframe/zosmf/restfiles/ds/SYS1.PARMLIB(IEASYS00)"
        );
    }

    #[test]
    fn test_restfiles_url_encodes_each_segment() {
        let base = Url::parse("https://zosmf.example.com").unwrap();

        let url = restfiles_url(&base, &["fs", "u", "steve", "my file#1?.txt"], &[]).unwrap();
        assert_eq!(url.path(), "/zosmf/restfiles/fs/u/steve/my%20file%231%3F.txt");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);

        let url = restfiles_url(&base, &["ds", "../../restjobs/jobs/X/Y"], &[]).unwrap();
        assert_eq!(
            url.path(),
            "/zosmf/restfiles/ds/..%2F..%2Frestjobs%2Fjobs%2FX%2FY"
        );

        let url = restfiles_url(&base, &["fs", "u", "100%"], &[]).unwrap();
        assert_eq!(url.path(), "/zosmf/restfiles/fs/u/100%25");
    }

    #[test]
    fn test_restfiles_url_rejects_dot_segments() {
        let base = Url::parse("https://zosmf.example.com").unwrap();

        for segments in [
            &["fs", "u", "..", "..", "restjobs"][..],
            &["ds", ".."][..],
            &["fs", "u", ".", "steve"][..],
            &["ds", " .. "][..],
        ] {
            let err = restfiles_url(&base, segments, &[]).unwrap_err();
            assert!(matches!(err, ZosmfError::PathNotValid(_)), "{:?}", segments);
        }
    }

    #[test]
    fn test_restfiles_url_encodes_query() {
        let base = Url::parse("https://zosmf.example.com").unwrap();
        let url = restfiles_url(&base, &["fs"], &[("path", "/u/steve/my dir")]).unwrap();
        assert_eq!(url.query(), Some("path=%2Fu%2Fsteve%2Fmy+dir"));

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("path".to_string(), "/u/steve/my dir".to_string())]);
    }

    #[test]
    fn test_connector_requires_valid_base_url() {
        let config = ZosmfConfig {
            base_url: "not a url".to_string(),
            ..ZosmfConfig::default()
        };
        assert!(matches!(HttpConnector::new(&config), Err(TransportError::Client(_))));
    }
}
