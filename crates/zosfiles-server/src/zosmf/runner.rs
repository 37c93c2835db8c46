//! Request runner pipeline
//!
//! Every operation is a [`Runner`]: a small immutable value built from the
//! operation input. [`run`] drives the fixed pipeline once per call:
//!
//! 1. `prepare_request` (may reject the input before any network call)
//! 2. `Connector::execute` (transport failures become `ZosmfError::Server`)
//! 3. [`classify`]: status first, then content type, then the runner's
//!    ordered failure rules, ending in the generic remote error
//!
//! Nothing is retried.

use serde_json::Value;
use tracing::{debug, warn};

use super::connector::Connector;
use super::request::PreparedRequest;
use super::response::ResponseCache;
use super::rules::ErrorContext;
use crate::error::{ZosmfError, ZosmfResult};

/// Per-operation protocol adapter
pub trait Runner: Send + Sync {
    type Output;

    /// Name of the data set, member or path the operation targets
    fn resource(&self) -> &str;

    /// Build the outbound request
    fn prepare_request(&self, connector: &dyn Connector) -> ZosmfResult<PreparedRequest>;

    /// Statuses that mean the operation succeeded
    fn success_statuses(&self) -> &'static [u16];

    /// Build the typed result from a successful response
    fn parse_success(&self, response: &ResponseCache) -> ZosmfResult<Self::Output>;

    /// Status-only classification, consulted before the body is inspected
    fn map_status(&self, _status: u16) -> Option<ZosmfError> {
        None
    }

    /// Map a JSON error body to a specific error, or `None` for the generic one
    fn map_error(&self, ctx: &ErrorContext<'_>) -> Option<ZosmfError>;
}

/// Execute one runner against the connector
pub async fn run<R>(runner: &R, connector: &dyn Connector) -> ZosmfResult<R::Output>
where
    R: Runner + ?Sized,
{
    let request = runner.prepare_request(connector)?;
    debug!(
        method = %request.method,
        url = %request.url,
        resource = runner.resource(),
        "Sending z/OSMF request"
    );

    let raw = connector.execute(request).await.map_err(|e| {
        warn!(resource = runner.resource(), error = %e, "z/OSMF transport failure");
        ZosmfError::from(e)
    })?;

    classify(runner, &ResponseCache::new(raw))
}

/// Turn a buffered response into exactly one result or error
pub fn classify<R>(runner: &R, response: &ResponseCache) -> ZosmfResult<R::Output>
where
    R: Runner + ?Sized,
{
    let status = response.status();

    if runner.success_statuses().contains(&status) {
        return runner.parse_success(response);
    }

    if let Some(err) = runner.map_status(status) {
        return Err(err);
    }

    if !response.has_entity() || !response.is_json() {
        warn!(status, resource = runner.resource(), "z/OSMF failure without JSON body");
        return Err(ZosmfError::NoResponseBody {
            status,
            resource: runner.resource().to_string(),
        });
    }

    let body: Value = response.entity_as_json()?;
    let ctx = ErrorContext::new(status, &body);

    Err(runner.map_error(&ctx).unwrap_or_else(|| {
        warn!(status, resource = runner.resource(), body = %body, "Unclassified z/OSMF failure");
        ZosmfError::Remote {
            status,
            resource: runner.resource().to_string(),
            body: body.to_string(),
        }
    }))
}

/// Read the `ETag` response header, unmodified
pub fn etag(response: &ResponseCache) -> Option<String> {
    response.header("etag").map(str::to_string)
}

/// `items` array of a z/OSMF list response
pub fn items(response: &ResponseCache) -> ZosmfResult<Vec<Value>> {
    let mut body = response.entity_as_json_object()?;
    match body.remove("items") {
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(ZosmfError::Server(
            "z/OSMF list response 'items' is not an array".to_string(),
        )),
        None => Ok(Vec::new()),
    }
}
