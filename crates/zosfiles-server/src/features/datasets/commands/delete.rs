use serde::{Deserialize, Serialize};

use crate::error::{ZosmfError, ZosmfResult};
use crate::features::shared::{validate_required, PassthroughHeaders};
use crate::zosmf::rules::{self, ErrorContext, ErrorRule};
use crate::zosmf::{runner, Connector, PreparedRequest, ResponseCache, Runner};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteDataSetCommand {
    /// Data set, or `PDS(MEMBER)` to delete a single member
    pub data_set_name: String,
}

const RULES: &[ErrorRule] = &[
    ErrorRule::new("not-cataloged", rules::is_not_cataloged, rules::data_set_not_found),
    ErrorRule::new(
        "authorization-failed",
        rules::is_authorization_failure,
        rules::unauthorised,
    ),
];

pub struct DeleteDataSetRunner {
    command: DeleteDataSetCommand,
    passthrough: PassthroughHeaders,
}

impl DeleteDataSetRunner {
    pub fn new(command: DeleteDataSetCommand, passthrough: PassthroughHeaders) -> Self {
        Self {
            command,
            passthrough,
        }
    }
}

impl Runner for DeleteDataSetRunner {
    type Output = ();

    fn resource(&self) -> &str {
        &self.command.data_set_name
    }

    fn prepare_request(&self, connector: &dyn Connector) -> ZosmfResult<PreparedRequest> {
        validate_required("data set name", &self.command.data_set_name)?;
        let url = connector.resolve(&["ds", self.command.data_set_name.as_str()], &[])?;
        Ok(PreparedRequest::delete(url)
            .passthrough(self.passthrough.headers()))
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

#[tracing::instrument(skip(connector, passthrough), fields(data_set = %command.data_set_name))]
pub async fn handle(
    connector: &dyn Connector,
    command: DeleteDataSetCommand,
    passthrough: PassthroughHeaders,
) -> ZosmfResult<()> {
    runner::run(&DeleteDataSetRunner::new(command, passthrough), connector).await
}
