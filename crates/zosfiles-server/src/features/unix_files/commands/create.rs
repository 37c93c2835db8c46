use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use zosfiles_common::types::unix_files::UnixEntityType;

use crate::error::{ZosmfError, ZosmfResult};
use crate::features::shared::{validate_permissions, validate_required, PassthroughHeaders};
use crate::features::unix_files::fs_segments;
use crate::zosmf::rules::{self, ErrorContext, ErrorRule};
use crate::zosmf::{runner, Connector, PreparedRequest, ResponseCache, Runner};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUnixAssetCommand {
    pub path: String,
    pub entity_type: UnixEntityType,
    /// Symbolic mode such as `rwxr-xr--`; z/OSMF applies its default when absent
    #[serde(default)]
    pub permissions: Option<String>,
}

fn is_already_present(ctx: &ErrorContext<'_>) -> bool {
    ctx.message_contains("already exists")
}

fn already_exists(_: &ErrorContext<'_>, resource: &str) -> ZosmfError {
    ZosmfError::FileAlreadyExists(resource.to_string())
}

const RULES: &[ErrorRule] = &[ErrorRule::new(
    "already-exists",
    is_already_present,
    already_exists,
)];

/// Checked after the rejected-mode rule
const ACCESS_RULES: &[ErrorRule] = &[ErrorRule::new(
    "permission-denied",
    rules::is_permission_denied,
    rules::permission_denied,
)];

/// `POST fs/{path}` creating a file or directory
pub struct CreateUnixAssetRunner {
    command: CreateUnixAssetCommand,
    passthrough: PassthroughHeaders,
}

impl CreateUnixAssetRunner {
    pub fn new(command: CreateUnixAssetCommand, passthrough: PassthroughHeaders) -> Self {
        Self {
            command,
            passthrough,
        }
    }

    fn body(&self) -> Value {
        let mut body = json!({ "type": self.command.entity_type.as_zosmf() });
        if let Some(mode) = &self.command.permissions {
            body["mode"] = Value::from(mode.as_str());
        }
        body
    }

    /// z/OSMF names the rejected mode in `details` under a message about the mode
    fn invalid_mode(&self, ctx: &ErrorContext<'_>) -> Option<ZosmfError> {
        let mode = self.command.permissions.as_deref()?;
        (ctx.message_contains("mode") && ctx.details_contain(mode))
            .then(|| ZosmfError::InvalidPermissions(mode.to_string()))
    }
}

impl Runner for CreateUnixAssetRunner {
    type Output = String;

    fn resource(&self) -> &str {
        &self.command.path
    }

    fn prepare_request(&self, connector: &dyn Connector) -> ZosmfResult<PreparedRequest> {
        validate_required("path", &self.command.path)?;
        if let Some(mode) = &self.command.permissions {
            validate_permissions(mode)?;
        }
        let url = connector.resolve(&fs_segments(&self.command.path), &[])?;
        Ok(PreparedRequest::post(url)
            .passthrough(self.passthrough.headers())
            .json(self.body()))
    }

    fn success_statuses(&self) -> &'static [u16] {
        &[201]
    }

    fn parse_success(&self, _response: &ResponseCache) -> ZosmfResult<String> {
        Ok(self.command.path.clone())
    }

    fn map_error(&self, ctx: &ErrorContext<'_>) -> Option<ZosmfError> {
        rules::classify(RULES, ctx, self.resource())
            .or_else(|| self.invalid_mode(ctx))
            .or_else(|| rules::classify(ACCESS_RULES, ctx, self.resource()))
    }
}

#[tracing::instrument(
    skip(connector, passthrough),
    fields(path = %command.path, entity_type = ?command.entity_type)
)]
pub async fn handle(
    connector: &dyn Connector,
    command: CreateUnixAssetCommand,
    passthrough: PassthroughHeaders,
) -> ZosmfResult<String> {
    runner::run(&CreateUnixAssetRunner::new(command, passthrough), connector).await
}
