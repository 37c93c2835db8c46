use serde::{Deserialize, Serialize};
use zosfiles_common::types::datasets::{DataSetContent, DataSetContentWithEtag};

use crate::error::{ZosmfError, ZosmfResult};
use crate::features::shared::{validate_required, PassthroughHeaders};
use crate::zosmf::request::ibm_headers;
use crate::zosmf::rules::{self, diagnostics, ErrorContext, ErrorRule};
use crate::zosmf::{runner, Connector, PreparedRequest, ResponseCache, Runner};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetDataSetContentQuery {
    /// Sequential data set or `PDS(MEMBER)`
    pub data_set_name: String,
}

fn is_missing(ctx: &ErrorContext<'_>) -> bool {
    ctx.message_is(diagnostics::DATA_SET_NOT_FOUND)
        || ctx.message_contains(diagnostics::MEMBER_NOT_FOUND)
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

/// `GET ds/{dsn}` returning the records and their ETag
pub struct GetDataSetContentRunner {
    query: GetDataSetContentQuery,
    passthrough: PassthroughHeaders,
}

impl GetDataSetContentRunner {
    pub fn new(query: GetDataSetContentQuery, passthrough: PassthroughHeaders) -> Self {
        Self { query, passthrough }
    }
}

impl Runner for GetDataSetContentRunner {
    type Output = DataSetContentWithEtag;

    fn resource(&self) -> &str {
        &self.query.data_set_name
    }

    fn prepare_request(&self, connector: &dyn Connector) -> ZosmfResult<PreparedRequest> {
        validate_required("data set name", &self.query.data_set_name)?;
        let url = connector.resolve(&["ds", self.query.data_set_name.as_str()], &[])?;
        PreparedRequest::get(url)
            .passthrough(self.passthrough.headers())
            .header(ibm_headers::RETURN_ETAG, "true")
    }

    fn success_statuses(&self) -> &'static [u16] {
        &[200]
    }

    fn parse_success(&self, response: &ResponseCache) -> ZosmfResult<DataSetContentWithEtag> {
        Ok(DataSetContentWithEtag {
            content: DataSetContent {
                records: response.entity_as_text().to_string(),
            },
            etag: runner::etag(response),
        })
    }

    fn map_error(&self, ctx: &ErrorContext<'_>) -> Option<ZosmfError> {
        rules::classify(RULES, ctx, self.resource())
    }
}

#[tracing::instrument(skip(connector, passthrough), fields(data_set = %query.data_set_name))]
pub async fn handle(
    connector: &dyn Connector,
    query: GetDataSetContentQuery,
    passthrough: PassthroughHeaders,
) -> ZosmfResult<DataSetContentWithEtag> {
    runner::run(&GetDataSetContentRunner::new(query, passthrough), connector).await
}
