use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{ZosmfError, ZosmfResult};
use crate::features::shared::{validate_required, PassthroughHeaders};
use crate::features::unix_files::fs_segments;
use crate::features::unix_files::queries::get_encoding::resolve_convert;
use crate::zosmf::request::ibm_headers;
use crate::zosmf::rules::{self, ErrorContext};
use crate::zosmf::{runner, Connector, PreparedRequest, ResponseCache, Runner};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PutUnixFileContentCommand {
    pub path: String,
    pub content: String,
    #[serde(default)]
    pub etag: Option<String>,
    #[serde(default)]
    pub convert: Option<bool>,
    /// `content` is base64; send the decoded bytes
    #[serde(default)]
    pub decode: bool,
}

/// `PUT fs/{path}` with text or decoded binary content
pub struct PutUnixFileContentRunner {
    command: PutUnixFileContentCommand,
    convert: bool,
    passthrough: PassthroughHeaders,
}

impl PutUnixFileContentRunner {
    pub fn new(
        command: PutUnixFileContentCommand,
        convert: bool,
        passthrough: PassthroughHeaders,
    ) -> Self {
        Self {
            command,
            convert,
            passthrough,
        }
    }
}

impl Runner for PutUnixFileContentRunner {
    type Output = Option<String>;

    fn resource(&self) -> &str {
        &self.command.path
    }

    fn prepare_request(&self, connector: &dyn Connector) -> ZosmfResult<PreparedRequest> {
        validate_required("path", &self.command.path)?;
        let url = connector.resolve(&fs_segments(&self.command.path), &[])?;
        let mut request = PreparedRequest::put(url)
            .passthrough(self.passthrough.headers())
            .if_match(self.command.etag.as_deref())?;

        if self.convert {
            request = request.header(ibm_headers::DATA_TYPE, "binary")?;
        }

        if self.command.decode {
            let bytes = STANDARD.decode(self.command.content.trim()).map_err(|e| {
                ZosmfError::Validation(format!("content is not valid base64: {}", e))
            })?;
            Ok(request.binary(Bytes::from(bytes)))
        } else {
            Ok(request.text(self.command.content.clone()))
        }
    }

    fn success_statuses(&self) -> &'static [u16] {
        &[204]
    }

    fn parse_success(&self, response: &ResponseCache) -> ZosmfResult<Option<String>> {
        Ok(runner::etag(response))
    }

    fn map_status(&self, status: u16) -> Option<ZosmfError> {
        (status == 412).then(|| ZosmfError::PreconditionFailed(self.resource().to_string()))
    }

    fn map_error(&self, ctx: &ErrorContext<'_>) -> Option<ZosmfError> {
        rules::classify(rules::UNIX_FILE_RULES, ctx, self.resource())
    }
}

#[tracing::instrument(
    skip(connector, command, passthrough),
    fields(path = %command.path, conditional = command.etag.is_some())
)]
pub async fn handle(
    connector: &dyn Connector,
    command: PutUnixFileContentCommand,
    passthrough: PassthroughHeaders,
) -> ZosmfResult<Option<String>> {
    let convert = resolve_convert(connector, &command.path, command.convert, &passthrough).await?;
    runner::run(&PutUnixFileContentRunner::new(command, convert, passthrough), connector).await
}
