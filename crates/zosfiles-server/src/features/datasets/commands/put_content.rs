use serde::{Deserialize, Serialize};

use crate::error::{ZosmfError, ZosmfResult};
use crate::features::shared::{validate_required, PassthroughHeaders};
use crate::zosmf::rules::{self, diagnostics, ErrorContext, ErrorRule};
use crate::zosmf::{runner, Connector, PreparedRequest, ResponseCache, Runner};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PutDataSetContentCommand {
    pub data_set_name: String,
    pub records: String,
    /// ETag from an earlier read; the write fails if the content changed since
    #[serde(default)]
    pub etag: Option<String>,
}

fn is_missing(ctx: &ErrorContext<'_>) -> bool {
    ctx.message_is(diagnostics::DATA_SET_NOT_FOUND)
        || ctx.message_contains(diagnostics::MEMBER_NOT_FOUND)
        || rules::is_not_cataloged(ctx)
}

const RULES: &[ErrorRule] = &[
    ErrorRule::new("locked", rules::is_data_set_locked, rules::data_set_locked),
    ErrorRule::new("not-found", is_missing, rules::data_set_not_found),
    ErrorRule::new(
        "authorization-failed",
        rules::is_authorization_failure,
        rules::unauthorised,
    ),
];

/// `PUT ds/{dsn}` with the records as plain text
pub struct PutDataSetContentRunner {
    command: PutDataSetContentCommand,
    passthrough: PassthroughHeaders,
}

impl PutDataSetContentRunner {
    pub fn new(command: PutDataSetContentCommand, passthrough: PassthroughHeaders) -> Self {
        Self {
            command,
            passthrough,
        }
    }
}

impl Runner for PutDataSetContentRunner {
    /// New ETag, when z/OSMF returned one
    type Output = Option<String>;

    fn resource(&self) -> &str {
        &self.command.data_set_name
    }

    fn prepare_request(&self, connector: &dyn Connector) -> ZosmfResult<PreparedRequest> {
        validate_required("data set name", &self.command.data_set_name)?;
        let url = connector.resolve(&["ds", self.command.data_set_name.as_str()], &[])?;
        PreparedRequest::put(url)
            .passthrough(self.passthrough.headers())
            .text(self.command.records.clone())
            .if_match(self.command.etag.as_deref())
    }

    fn success_statuses(&self) -> &'static [u16] {
        &[201, 204]
    }

    fn parse_success(&self, response: &ResponseCache) -> ZosmfResult<Option<String>> {
        Ok(runner::etag(response))
    }

    fn map_status(&self, status: u16) -> Option<ZosmfError> {
        (status == 412).then(|| ZosmfError::PreconditionFailed(self.resource().to_string()))
    }

    fn map_error(&self, ctx: &ErrorContext<'_>) -> Option<ZosmfError> {
        rules::classify(RULES, ctx, self.resource())
    }
}

#[tracing::instrument(
    skip(connector, command, passthrough),
    fields(data_set = %command.data_set_name, conditional = command.etag.is_some())
)]
pub async fn handle(
    connector: &dyn Connector,
    command: PutDataSetContentCommand,
    passthrough: PassthroughHeaders,
) -> ZosmfResult<Option<String>> {
    runner::run(&PutDataSetContentRunner::new(command, passthrough), connector).await
}
