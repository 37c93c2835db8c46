use serde::{Deserialize, Serialize};

use crate::error::{ZosmfError, ZosmfResult};
use crate::features::shared::{validate_required, PassthroughHeaders};
use crate::features::unix_files::fs_segments;
use crate::zosmf::request::ibm_headers;
use crate::zosmf::rules::{self, ErrorContext, ErrorRule};
use crate::zosmf::{runner, Connector, PreparedRequest, ResponseCache, Runner};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteUnixAssetCommand {
    pub path: String,
    /// Remove a directory together with its contents
    #[serde(default)]
    pub recursive: bool,
}

impl DeleteUnixAssetCommand {
    /// Recursive when asked for directly or through a forwarded `X-IBM-Option`
    pub fn from_request(path: String, recursive: bool, passthrough: &PassthroughHeaders) -> Self {
        let forwarded = passthrough
            .get(ibm_headers::OPTION)
            .is_some_and(|option| option.eq_ignore_ascii_case("recursive"));
        Self {
            path,
            recursive: recursive || forwarded,
        }
    }
}

const RULES: &[ErrorRule] = &[
    ErrorRule::new(
        "directory-not-empty",
        rules::is_directory_not_empty,
        rules::not_an_empty_directory,
    ),
    ErrorRule::new("no-such-file", rules::is_no_such_file, rules::file_not_found),
    ErrorRule::new("permission-denied", rules::is_permission_denied, rules::permission_denied),
];

/// `DELETE fs/{path}`
pub struct DeleteUnixAssetRunner {
    command: DeleteUnixAssetCommand,
    passthrough: PassthroughHeaders,
}

impl DeleteUnixAssetRunner {
    pub fn new(command: DeleteUnixAssetCommand, passthrough: PassthroughHeaders) -> Self {
        Self {
            command,
            passthrough,
        }
    }
}

impl Runner for DeleteUnixAssetRunner {
    type Output = ();

    fn resource(&self) -> &str {
        &self.command.path
    }

    fn prepare_request(&self, connector: &dyn Connector) -> ZosmfResult<PreparedRequest> {
        validate_required("path", &self.command.path)?;
        let url = connector.resolve(&fs_segments(&self.command.path), &[])?;
        let request = PreparedRequest::delete(url)
            .passthrough(self.passthrough.headers());

        if self.command.recursive {
            request.header(ibm_headers::OPTION, "recursive")
        } else {
            Ok(request)
        }
    }

    fn success_statuses(&self) -> &'static [u16] {
        &[204]
    }

    fn parse_success(&self, _response: &ResponseCache) -> ZosmfResult<()> {
        Ok(())
    }

    fn map_error(&self, ctx: &ErrorContext<'_>) -> Option<ZosmfError> {
        rules::classify(RULES, ctx, self.resource())
    }
}

#[tracing::instrument(
    skip(connector, passthrough),
    fields(path = %command.path, recursive = command.recursive)
)]
pub async fn handle(
    connector: &dyn Connector,
    command: DeleteUnixAssetCommand,
    passthrough: PassthroughHeaders,
) -> ZosmfResult<()> {
    runner::run(&DeleteUnixAssetRunner::new(command, passthrough), connector).await
}
