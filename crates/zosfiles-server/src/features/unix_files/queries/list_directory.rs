use serde::{Deserialize, Serialize};
use serde_json::Value;
use zosfiles_common::types::unix_files::{
    UnixDirectoryAttributesWithChildren, UnixDirectoryChild, UnixEntityType,
};

use crate::error::{ZosmfError, ZosmfResult};
use crate::features::shared::{validate_required, PassthroughHeaders, RequestOrigin};
use crate::features::API_PREFIX;
use crate::zosmf::rules::{self, diagnostics, ErrorContext, ErrorRule};
use crate::zosmf::{runner, Connector, PreparedRequest, ResponseCache, Runner};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDirectoryQuery {
    pub path: String,
}

fn is_permission_failure(ctx: &ErrorContext<'_>) -> bool {
    ctx.status == 500 && rules::is_permission_denied(ctx)
}

fn is_invalid_path(ctx: &ErrorContext<'_>) -> bool {
    ctx.message_is(diagnostics::PATH_NOT_VALID)
}

fn path_not_valid(_: &ErrorContext<'_>, resource: &str) -> ZosmfError {
    ZosmfError::PathNotValid(resource.to_string())
}

const RULES: &[ErrorRule] = &[
    ErrorRule::new("permission-denied", is_permission_failure, rules::unauthorised),
    ErrorRule::new("path-not-valid", is_invalid_path, path_not_valid),
    ErrorRule::new("no-such-file", rules::is_no_such_file, rules::file_not_found),
];

/// `GET fs?path={path}`
///
/// Hyperlinks for the children point back at this API on the origin the
/// caller used.
pub struct ListDirectoryRunner {
    query: ListDirectoryQuery,
    origin: RequestOrigin,
    passthrough: PassthroughHeaders,
}

impl ListDirectoryRunner {
    pub fn new(
        query: ListDirectoryQuery,
        origin: RequestOrigin,
        passthrough: PassthroughHeaders,
    ) -> Self {
        Self {
            query,
            origin,
            passthrough,
        }
    }

    fn link(&self, child: &str) -> String {
        let directory = self.query.path.trim_end_matches('/');
        self.origin
            .join(&format!("{}/unixfiles{}/{}", API_PREFIX, directory, child))
    }
}

fn text(item: &Value, key: &str) -> String {
    match item.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

impl Runner for ListDirectoryRunner {
    type Output = UnixDirectoryAttributesWithChildren;

    fn resource(&self) -> &str {
        &self.query.path
    }

    fn prepare_request(&self, connector: &dyn Connector) -> ZosmfResult<PreparedRequest> {
        validate_required("path", &self.query.path)?;
        let url = connector.resolve(&["fs"], &[("path", self.query.path.as_str())])?;
        Ok(PreparedRequest::get(url).passthrough(self.passthrough.headers()))
    }

    fn success_statuses(&self) -> &'static [u16] {
        &[200]
    }

    fn parse_success(
        &self,
        response: &ResponseCache,
    ) -> ZosmfResult<UnixDirectoryAttributesWithChildren> {
        let items = runner::items(response)?;
        let first = items.first().ok_or_else(|| {
            ZosmfError::Server(format!("z/OSMF listed no entries for '{}'", self.query.path))
        })?;

        let mode = text(first, "mode");
        let children = items
            .iter()
            .filter_map(|item| {
                let name = item.get("name").and_then(Value::as_str)?;
                if name == "." || name == ".." {
                    return None;
                }
                Some(UnixDirectoryChild {
                    name: name.to_string(),
                    entity_type: UnixEntityType::from_mode(&text(item, "mode")),
                    link: self.link(name),
                })
            })
            .collect();

        Ok(UnixDirectoryAttributesWithChildren {
            entity_type: UnixEntityType::from_mode(&mode),
            owner: text(first, "user"),
            group: text(first, "group"),
            permissions_symbolic: mode,
            size: first.get("size").and_then(Value::as_u64).unwrap_or_default(),
            last_modified_date: text(first, "mtime"),
            children,
        })
    }

    fn map_error(&self, ctx: &ErrorContext<'_>) -> Option<ZosmfError> {
        rules::classify(RULES, ctx, self.resource())
    }
}

#[tracing::instrument(skip(connector, origin, passthrough), fields(path = %query.path))]
pub async fn handle(
    connector: &dyn Connector,
    query: ListDirectoryQuery,
    origin: RequestOrigin,
    passthrough: PassthroughHeaders,
) -> ZosmfResult<UnixDirectoryAttributesWithChildren> {
    runner::run(&ListDirectoryRunner::new(query, origin, passthrough), connector).await
}
