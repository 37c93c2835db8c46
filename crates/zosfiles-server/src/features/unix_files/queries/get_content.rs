use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use zosfiles_common::types::unix_files::{UnixFileContent, UnixFileContentWithEtag};

use super::get_encoding::resolve_convert;
use crate::error::{ZosmfError, ZosmfResult};
use crate::features::shared::{validate_required, PassthroughHeaders};
use crate::features::unix_files::fs_segments;
use crate::zosmf::request::ibm_headers;
use crate::zosmf::response::ResponseError;
use crate::zosmf::rules::{self, ErrorContext};
use crate::zosmf::{runner, Connector, PreparedRequest, ResponseCache, Runner};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetUnixFileContentQuery {
    pub path: String,
    /// Binary transfer; looked up from the file's tag when not given
    #[serde(default)]
    pub convert: Option<bool>,
    /// Base64-decode the returned text
    #[serde(default)]
    pub decode: bool,
}

/// `GET fs/{path}` returning the content and its ETag
pub struct GetUnixFileContentRunner {
    path: String,
    convert: bool,
    decode: bool,
    passthrough: PassthroughHeaders,
}

impl GetUnixFileContentRunner {
    pub fn new(path: String, convert: bool, decode: bool, passthrough: PassthroughHeaders) -> Self {
        Self {
            path,
            convert,
            decode,
            passthrough,
        }
    }

    fn unreadable(&self, err: ResponseError) -> ZosmfError {
        ZosmfError::Server(format!("Content of '{}' cannot be returned as text: {}", self.path, err))
    }
}

impl Runner for GetUnixFileContentRunner {
    type Output = UnixFileContentWithEtag;

    fn resource(&self) -> &str {
        &self.path
    }

    fn prepare_request(&self, connector: &dyn Connector) -> ZosmfResult<PreparedRequest> {
        validate_required("path", &self.path)?;
        let url = connector.resolve(&fs_segments(&self.path), &[])?;
        let request = PreparedRequest::get(url)
            .passthrough(self.passthrough.headers())
            .header(ibm_headers::RETURN_ETAG, "true")?;

        if self.convert {
            request.header(ibm_headers::DATA_TYPE, "binary")
        } else {
            Ok(request)
        }
    }

    fn success_statuses(&self) -> &'static [u16] {
        &[200]
    }

    fn parse_success(&self, response: &ResponseCache) -> ZosmfResult<UnixFileContentWithEtag> {
        // Binary transfers carry the file's own bytes and must not be altered
        let text = if self.convert {
            response.entity_as_utf8().map_err(|e| self.unreadable(e))?
        } else {
            response.entity_as_text()
        };

        let content = if self.decode {
            let bytes = STANDARD.decode(text.trim()).map_err(|e| {
                ZosmfError::Server(format!("Content of '{}' is not valid base64: {}", self.path, e))
            })?;
            String::from_utf8(bytes).map_err(|e| {
                self.unreadable(ResponseError::NotUtf8 {
                    valid_up_to: e.utf8_error().valid_up_to(),
                })
            })?
        } else {
            text.to_string()
        };

        Ok(UnixFileContentWithEtag {
            content: UnixFileContent { content },
            etag: runner::etag(response),
        })
    }

    fn map_error(&self, ctx: &ErrorContext<'_>) -> Option<ZosmfError> {
        rules::classify(rules::UNIX_FILE_RULES, ctx, self.resource())
    }
}

#[tracing::instrument(skip(connector, passthrough), fields(path = %query.path))]
pub async fn handle(
    connector: &dyn Connector,
    query: GetUnixFileContentQuery,
    passthrough: PassthroughHeaders,
) -> ZosmfResult<UnixFileContentWithEtag> {
    let convert = resolve_convert(connector, &query.path, query.convert, &passthrough).await?;
    let runner = GetUnixFileContentRunner::new(query.path, convert, query.decode, passthrough);
    runner::run(&runner, connector).await
}
