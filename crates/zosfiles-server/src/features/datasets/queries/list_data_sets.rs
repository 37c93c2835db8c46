//! Data set listing by name filter
//!
//! Two views share one request shape and differ only in the
//! `X-IBM-Attributes` header: names only (`dsname`) or the base attribute
//! set (`base`). Entries that cannot be mapped are logged and skipped so
//! that one odd catalog entry never fails the whole listing.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use zosfiles_common::types::datasets::{DataSet, DataSetAttributes};
use zosfiles_common::CommonError;

use crate::error::{ZosmfError, ZosmfResult};
use crate::features::shared::{validate_required, PassthroughHeaders};
use crate::zosmf::request::ibm_headers;
use crate::zosmf::rules::ErrorContext;
use crate::zosmf::{runner, Connector, PreparedRequest, ResponseCache, Runner};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDataSetsQuery {
    /// Catalog filter such as `STEVENH.*` or `STEVENH.**.JCL`
    pub filter: String,
}

fn prepare(
    query: &ListDataSetsQuery,
    passthrough: &PassthroughHeaders,
    attributes: &str,
    connector: &dyn Connector,
) -> ZosmfResult<PreparedRequest> {
    validate_required("filter", &query.filter)?;
    let url = connector.resolve(&["ds"], &[("dslevel", query.filter.as_str())])?;
    PreparedRequest::get(url)
        .passthrough(passthrough.headers())
        .header(ibm_headers::ATTRIBUTES, attributes)
}

/// Lenient mapping over the `items` array
fn map_items<T>(
    response: &ResponseCache,
    filter: &str,
    map: impl Fn(&Value) -> Result<T, CommonError>,
) -> ZosmfResult<Vec<T>> {
    Ok(runner::items(response)?
        .iter()
        .filter_map(|item| match map(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(filter, error = %e, entry = %item, "Skipping unmappable data set entry");
                None
            },
        })
        .collect())
}

// ============================================================================
// Names only
// ============================================================================

/// `GET ds?dslevel={filter}` with `X-IBM-Attributes: dsname`
pub struct ListDataSetsRunner {
    query: ListDataSetsQuery,
    passthrough: PassthroughHeaders,
}

impl ListDataSetsRunner {
    pub fn new(query: ListDataSetsQuery, passthrough: PassthroughHeaders) -> Self {
        Self { query, passthrough }
    }
}

impl Runner for ListDataSetsRunner {
    type Output = Vec<DataSet>;

    fn resource(&self) -> &str {
        &self.query.filter
    }

    fn prepare_request(&self, connector: &dyn Connector) -> ZosmfResult<PreparedRequest> {
        prepare(&self.query, &self.passthrough, "dsname", connector)
    }

    fn success_statuses(&self) -> &'static [u16] {
        &[200]
    }

    fn parse_success(&self, response: &ResponseCache) -> ZosmfResult<Vec<DataSet>> {
        map_items(response, &self.query.filter, data_set_from_json)
    }

    fn map_error(&self, _ctx: &ErrorContext<'_>) -> Option<ZosmfError> {
        None
    }
}

// ============================================================================
// Base attributes
// ============================================================================

/// `GET ds?dslevel={filter}` with `X-IBM-Attributes: base`
pub struct ListDataSetAttributesRunner {
    query: ListDataSetsQuery,
    passthrough: PassthroughHeaders,
}

impl ListDataSetAttributesRunner {
    pub fn new(query: ListDataSetsQuery, passthrough: PassthroughHeaders) -> Self {
        Self { query, passthrough }
    }
}

impl Runner for ListDataSetAttributesRunner {
    type Output = Vec<DataSetAttributes>;

    fn resource(&self) -> &str {
        &self.query.filter
    }

    fn prepare_request(&self, connector: &dyn Connector) -> ZosmfResult<PreparedRequest> {
        prepare(&self.query, &self.passthrough, "base", connector)
    }

    fn success_statuses(&self) -> &'static [u16] {
        &[200]
    }

    fn parse_success(&self, response: &ResponseCache) -> ZosmfResult<Vec<DataSetAttributes>> {
        map_items(response, &self.query.filter, attributes_from_json)
    }

    fn map_error(&self, _ctx: &ErrorContext<'_>) -> Option<ZosmfError> {
        None
    }
}

#[tracing::instrument(skip(connector, passthrough), fields(filter = %query.filter))]
pub async fn handle_names(
    connector: &dyn Connector,
    query: ListDataSetsQuery,
    passthrough: PassthroughHeaders,
) -> ZosmfResult<Vec<DataSet>> {
    runner::run(&ListDataSetsRunner::new(query, passthrough), connector).await
}

#[tracing::instrument(skip(connector, passthrough), fields(filter = %query.filter))]
pub async fn handle_attributes(
    connector: &dyn Connector,
    query: ListDataSetsQuery,
    passthrough: PassthroughHeaders,
) -> ZosmfResult<Vec<DataSetAttributes>> {
    runner::run(&ListDataSetAttributesRunner::new(query, passthrough), connector).await
}

// ============================================================================
// Entry mapping
// ============================================================================

/// Attribute as text; z/OSMF sends most values as strings but some as numbers
fn text(item: &Value, key: &str) -> Option<String> {
    match item.get(key)? {
        Value::String(s) if !s.trim().is_empty() && s != "?" => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number(item: &Value, key: &'static str) -> Result<Option<u32>, CommonError> {
    text(item, key)
        .map(|raw| {
            raw.parse::<u32>().map_err(|_| CommonError::InvalidAttribute {
                attribute: key,
                value: raw,
            })
        })
        .transpose()
}

fn is_migrated(item: &Value) -> bool {
    text(item, "migr").is_some_and(|m| m.eq_ignore_ascii_case("YES"))
}

pub fn data_set_from_json(item: &Value) -> Result<DataSet, CommonError> {
    Ok(DataSet {
        name: text(item, "dsname").ok_or(CommonError::MissingAttribute("dsname"))?,
        migrated: is_migrated(item),
    })
}

pub fn attributes_from_json(item: &Value) -> Result<DataSetAttributes, CommonError> {
    Ok(DataSetAttributes {
        name: text(item, "dsname").ok_or(CommonError::MissingAttribute("dsname"))?,
        allocation_unit: text(item, "spacu").map(|u| u.parse()).transpose()?,
        block_size: number(item, "blksz")?,
        catalog_name: text(item, "catnm"),
        creation_date: text(item, "cdate"),
        data_set_organization: text(item, "dsorg").map(|o| o.parse()).transpose()?,
        device_type: text(item, "dev"),
        expiration_date: text(item, "edate"),
        last_reference_date: text(item, "rdate"),
        migrated: is_migrated(item),
        record_format: text(item, "recfm"),
        record_length: number(item, "lrecl")?,
        used: number(item, "used")?,
        volume_serial: text(item, "vol"),
    })
}
