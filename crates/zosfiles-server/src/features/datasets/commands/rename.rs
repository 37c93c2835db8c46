use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use zosfiles_common::types::datasets::RenameDataSetResponse;

use crate::error::{ZosmfError, ZosmfResult};
use crate::features::shared::{validate_required, PassthroughHeaders};
use crate::zosmf::rules::{self, ErrorContext, ErrorRule};
use crate::zosmf::{runner, Connector, PreparedRequest, ResponseCache, Runner};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameDataSetCommand {
    pub old_name: String,
    pub new_name: String,
}

/// Split `PDS(MEMBER)` into its data set and member parts
pub fn split_member(name: &str) -> (&str, Option<&str>) {
    let name = name.trim();
    match name.strip_suffix(')').and_then(|n| n.split_once('(')) {
        Some((dsn, member)) if !member.is_empty() => (dsn, Some(member)),
        _ => (name, None),
    }
}

fn details_not_found(ctx: &ErrorContext<'_>) -> bool {
    ctx.details_contain("not found")
}

/// A missing rename source is a bad request, not a missing resource
fn source_not_found(_ctx: &ErrorContext<'_>, resource: &str) -> ZosmfError {
    ZosmfError::BadRequest(format!("Data set '{}' not found", resource))
}

fn has_details(ctx: &ErrorContext<'_>) -> bool {
    ctx.details().is_some()
}

fn bad_request_from_details(ctx: &ErrorContext<'_>, resource: &str) -> ZosmfError {
    ZosmfError::BadRequest(
        ctx.details()
            .unwrap_or_else(|| format!("Rename of '{}' was rejected", resource)),
    )
}

const RULES: &[ErrorRule] = &[
    ErrorRule::new("not-found", details_not_found, source_not_found),
    ErrorRule::new("details", has_details, bad_request_from_details),
];

/// `PUT ds/{new}` asking z/OSMF to rename `old` into it
pub struct RenameDataSetRunner {
    command: RenameDataSetCommand,
    passthrough: PassthroughHeaders,
}

impl RenameDataSetRunner {
    pub fn new(command: RenameDataSetCommand, passthrough: PassthroughHeaders) -> Self {
        Self {
            command,
            passthrough,
        }
    }

    fn body(&self) -> Value {
        let (dsn, member) = split_member(&self.command.old_name);
        let mut from = json!({ "dsn": dsn });
        if let Some(member) = member {
            from["member"] = Value::from(member);
        }
        json!({ "request": "rename", "from-dataset": from })
    }
}

impl Runner for RenameDataSetRunner {
    type Output = RenameDataSetResponse;

    fn resource(&self) -> &str {
        &self.command.old_name
    }

    fn prepare_request(&self, connector: &dyn Connector) -> ZosmfResult<PreparedRequest> {
        validate_required("data set name", &self.command.old_name)?;
        validate_required("new name", &self.command.new_name)?;
        let url = connector.resolve(&["ds", self.command.new_name.trim()], &[])?;
        Ok(PreparedRequest::put(url)
            .passthrough(self.passthrough.headers())
            .json(self.body()))
    }

    fn success_statuses(&self) -> &'static [u16] {
        &[200, 201, 204]
    }

    fn parse_success(&self, _response: &ResponseCache) -> ZosmfResult<RenameDataSetResponse> {
        Ok(RenameDataSetResponse {
            message: format!(
                "Renamed '{}' to '{}'",
                self.command.old_name, self.command.new_name
            ),
        })
    }

    fn map_error(&self, ctx: &ErrorContext<'_>) -> Option<ZosmfError> {
        rules::classify(RULES, ctx, self.resource()).or_else(|| {
            ctx.stack_contains("parse").then(|| {
                ZosmfError::BadRequest(format!(
                    "'{}' is not a valid data set name",
                    self.command.new_name
                ))
            })
        })
    }
}

#[tracing::instrument(
    skip(connector, passthrough),
    fields(from = %command.old_name, to = %command.new_name)
)]
pub async fn handle(
    connector: &dyn Connector,
    command: RenameDataSetCommand,
    passthrough: PassthroughHeaders,
) -> ZosmfResult<RenameDataSetResponse> {
    runner::run(&RenameDataSetRunner::new(command, passthrough), connector).await
}
