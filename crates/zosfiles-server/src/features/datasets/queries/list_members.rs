use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{ZosmfError, ZosmfResult};
use crate::features::shared::{validate_required, PassthroughHeaders};
use crate::zosmf::rules::{self, ErrorContext, ErrorRule};
use crate::zosmf::{runner, Connector, PreparedRequest, ResponseCache, Runner};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMembersQuery {
    pub data_set_name: String,
}

const RULES: &[ErrorRule] = &[
    ErrorRule::new(
        "authorization-failed",
        rules::is_authorization_failure,
        rules::unauthorised,
    ),
    ErrorRule::new("not-cataloged", rules::is_not_cataloged, rules::data_set_not_found),
];

/// `GET ds/{dsn}/member`
pub struct ListMembersRunner {
    query: ListMembersQuery,
    passthrough: PassthroughHeaders,
}

impl ListMembersRunner {
    pub fn new(query: ListMembersQuery, passthrough: PassthroughHeaders) -> Self {
        Self { query, passthrough }
    }
}

impl Runner for ListMembersRunner {
    type Output = Vec<String>;

    fn resource(&self) -> &str {
        &self.query.data_set_name
    }

    fn prepare_request(&self, connector: &dyn Connector) -> ZosmfResult<PreparedRequest> {
        validate_required("data set name", &self.query.data_set_name)?;
        let url = connector.resolve(&["ds", self.query.data_set_name.as_str(), "member"], &[])?;
        Ok(PreparedRequest::get(url)
            .passthrough(self.passthrough.headers()))
    }

    fn success_statuses(&self) -> &'static [u16] {
        &[200]
    }

    fn parse_success(&self, response: &ResponseCache) -> ZosmfResult<Vec<String>> {
        let members = runner::items(response)?
            .iter()
            .filter_map(|item| match item.get("member").and_then(Value::as_str) {
                Some(member) => Some(member.to_string()),
                None => {
                    warn!(data_set = %self.query.data_set_name, "Skipping member entry without a name");
                    None
                },
            })
            .collect();
        Ok(members)
    }

    fn map_error(&self, ctx: &ErrorContext<'_>) -> Option<ZosmfError> {
        rules::classify(RULES, ctx, self.resource())
    }
}

#[tracing::instrument(skip(connector, passthrough), fields(data_set = %query.data_set_name))]
pub async fn handle(
    connector: &dyn Connector,
    query: ListMembersQuery,
    passthrough: PassthroughHeaders,
) -> ZosmfResult<Vec<String>> {
    runner::run(&ListMembersRunner::new(query, passthrough), connector).await
}
