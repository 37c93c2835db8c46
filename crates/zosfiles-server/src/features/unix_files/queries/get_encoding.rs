//! File encoding tag lookup (`chtag -p`)
//!
//! The tag decides whether file content has to travel in binary mode so
//! that z/OSMF does not apply its EBCDIC conversion to text that is
//! already ASCII or UTF-8.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use zosfiles_common::types::unix_files::UnixFileTag;

use crate::error::{ZosmfError, ZosmfResult};
use crate::features::shared::{validate_required, PassthroughHeaders};
use crate::features::unix_files::fs_segments;
use crate::zosmf::rules::{self, ErrorContext};
use crate::zosmf::{runner, Connector, PreparedRequest, ResponseCache, Runner};

/// Tag fragments of code pages that are already ASCII compatible
const CONVERTED_CODE_PAGES: &[&str] = &["ISO8859", "IBM-850", "UTF"];

/// True when content with this tag must be transferred in binary mode
pub fn should_convert(tag: &str) -> bool {
    CONVERTED_CODE_PAGES.iter().any(|page| tag.contains(page))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetFileEncodingQuery {
    pub path: String,
}

/// `PUT fs/{path}` with a `chtag` list request
pub struct GetFileEncodingRunner {
    query: GetFileEncodingQuery,
    passthrough: PassthroughHeaders,
}

impl GetFileEncodingRunner {
    pub fn new(query: GetFileEncodingQuery, passthrough: PassthroughHeaders) -> Self {
        Self { query, passthrough }
    }
}

impl Runner for GetFileEncodingRunner {
    type Output = String;

    fn resource(&self) -> &str {
        &self.query.path
    }

    fn prepare_request(&self, connector: &dyn Connector) -> ZosmfResult<PreparedRequest> {
        validate_required("path", &self.query.path)?;
        let url = connector.resolve(&fs_segments(&self.query.path), &[])?;
        Ok(PreparedRequest::put(url)
            .passthrough(self.passthrough.headers())
            .json(json!({ "request": "chtag", "action": "list" })))
    }

    fn success_statuses(&self) -> &'static [u16] {
        &[200]
    }

    fn parse_success(&self, response: &ResponseCache) -> ZosmfResult<String> {
        let body = response.entity_as_json_object()?;
        body.get("stdout")
            .and_then(Value::as_array)
            .and_then(|lines| lines.first())
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                ZosmfError::Server(format!(
                    "chtag response for '{}' has no stdout",
                    self.query.path
                ))
            })
    }

    fn map_error(&self, ctx: &ErrorContext<'_>) -> Option<ZosmfError> {
        rules::classify(rules::UNIX_FILE_RULES, ctx, self.resource())
    }
}

#[tracing::instrument(skip(connector, passthrough), fields(path = %query.path))]
pub async fn handle(
    connector: &dyn Connector,
    query: GetFileEncodingQuery,
    passthrough: PassthroughHeaders,
) -> ZosmfResult<UnixFileTag> {
    let tag = runner::run(&GetFileEncodingRunner::new(query, passthrough), connector).await?;
    let convert = should_convert(&tag);
    tracing::debug!(tag = %tag, convert, "Resolved file encoding tag");
    Ok(UnixFileTag { tag, convert })
}

/// Use the caller's choice, or look the tag up when none was made
///
/// A file that does not exist yet has no tag and is sent unconverted.
pub async fn resolve_convert(
    connector: &dyn Connector,
    path: &str,
    requested: Option<bool>,
    passthrough: &PassthroughHeaders,
) -> ZosmfResult<bool> {
    if let Some(convert) = requested {
        return Ok(convert);
    }

    let query = GetFileEncodingQuery {
        path: path.to_string(),
    };
    match handle(connector, query, passthrough.clone()).await {
        Ok(tag) => Ok(tag.convert),
        Err(ZosmfError::FileNotFound(_)) => Ok(false),
        Err(e) => Err(e),
    }
}
