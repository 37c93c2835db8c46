use serde_json::{Map, Value};
use zosfiles_common::types::datasets::{CreateDataSetRequest, DataSetOrganisation};

use crate::error::{ZosmfError, ZosmfResult};
use crate::features::shared::validation::validate_bounded;
use crate::features::shared::PassthroughHeaders;
use crate::zosmf::rules::{self, diagnostics, ErrorContext, ErrorRule};
use crate::zosmf::{runner, Connector, PreparedRequest, ResponseCache, Runner};

/// Longest fully-qualified data set name
pub const MAX_DATA_SET_NAME_LENGTH: usize = 44;

fn is_allocation_error(ctx: &ErrorContext<'_>) -> bool {
    ctx.message_is(diagnostics::DYNAMIC_ALLOCATION_ERROR)
}

fn already_exists(_: &ErrorContext<'_>, resource: &str) -> ZosmfError {
    ZosmfError::DataSetAlreadyExists(resource.to_string())
}

const RULES: &[ErrorRule] = &[ErrorRule::new(
    "dynamic-allocation",
    is_allocation_error,
    already_exists,
)];

/// Reject attribute combinations z/OSMF would allocate incorrectly
pub fn validate(request: &CreateDataSetRequest) -> ZosmfResult<()> {
    validate_bounded("data set name", &request.name, MAX_DATA_SET_NAME_LENGTH)?;

    let sequential = request.data_set_organization == Some(DataSetOrganisation::Ps);
    if sequential && request.directory_blocks.is_some_and(|blocks| blocks > 0) {
        return Err(ZosmfError::InvalidDirectoryBlock(request.name.clone()));
    }
    Ok(())
}

/// Allocation body in z/OSMF's attribute vocabulary; unset attributes are omitted
pub fn allocation_body(request: &CreateDataSetRequest) -> Value {
    let mut body = Map::new();
    let mut put = |key: &str, value: Option<Value>| {
        if let Some(value) = value {
            body.insert(key.to_string(), value);
        }
    };

    put("volser", request.volume_serial.clone().map(Value::from));
    put("unit", request.device_type.clone().map(Value::from));
    put("dsorg", request.data_set_organization.map(|o| Value::from(o.as_zosmf())));
    put("alcunit", request.allocation_unit.map(|u| Value::from(u.as_zosmf())));
    put("primary", request.primary.map(Value::from));
    put("secondary", request.secondary.map(Value::from));
    put("dirblk", request.directory_blocks.map(Value::from));
    put("avgblk", request.average_block.map(Value::from));
    put("recfm", request.record_format.clone().map(Value::from));
    put("blksize", request.block_size.map(Value::from));
    put("lrecl", request.record_length.map(Value::from));

    Value::Object(body)
}

/// `POST ds/{dsn}` with the allocation attributes
pub struct CreateDataSetRunner {
    request: CreateDataSetRequest,
    passthrough: PassthroughHeaders,
}

impl CreateDataSetRunner {
    pub fn new(request: CreateDataSetRequest, passthrough: PassthroughHeaders) -> Self {
        Self {
            request,
            passthrough,
        }
    }
}

impl Runner for CreateDataSetRunner {
    type Output = String;

    fn resource(&self) -> &str {
        &self.request.name
    }

    fn prepare_request(&self, connector: &dyn Connector) -> ZosmfResult<PreparedRequest> {
        validate(&self.request)?;
        let url = connector.resolve(&["ds", self.request.name.as_str()], &[])?;
        Ok(PreparedRequest::post(url)
            .passthrough(self.passthrough.headers())
            .json(allocation_body(&self.request)))
    }

    fn success_statuses(&self) -> &'static [u16] {
        &[201]
    }

    fn parse_success(&self, _response: &ResponseCache) -> ZosmfResult<String> {
        Ok(self.request.name.clone())
    }

    fn map_error(&self, ctx: &ErrorContext<'_>) -> Option<ZosmfError> {
        rules::classify(RULES, ctx, self.resource())
    }
}

#[tracing::instrument(
    skip(connector, request, passthrough),
    fields(data_set = %request.name, dsorg = ?request.data_set_organization)
)]
pub async fn handle(
    connector: &dyn Connector,
    request: CreateDataSetRequest,
    passthrough: PassthroughHeaders,
) -> ZosmfResult<String> {
    runner::run(&CreateDataSetRunner::new(request, passthrough), connector).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{json_body, MockConnector};
    use serde_json::json;
    use zosfiles_common::types::datasets::AllocationUnit;

    fn pds() -> CreateDataSetRequest {
        CreateDataSetRequest {
            name: "STEVENH.NEW.JCL".into(),
            volume_serial: Some("VOL001".into()),
            data_set_organization: Some(DataSetOrganisation::Po),
            allocation_unit: Some(AllocationUnit::Trk),
            primary: Some(10),
            secondary: Some(5),
            directory_blocks: Some(12),
            record_format: Some("FB".into()),
            block_size: Some(6160),
            record_length: Some(80),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_creates_and_echoes_name() {
        let connector = MockConnector::new().respond_empty(201);

        let name = handle(&connector, pds(), Default::default()).await.unwrap();

        assert_eq!(name, "STEVENH.NEW.JCL");
        let request = connector.single_request();
        assert_eq!(request.method, http::Method::POST);
        assert_eq!(request.url.path(), "/zosmf/restfiles/ds/STEVENH.NEW.JCL");
        assert_eq!(
            json_body(&request),
            json!({
                "volser": "VOL001",
                "dsorg": "PO",
                "alcunit": "TRK",
                "primary": 10,
                "secondary": 5,
                "dirblk": 12,
                "recfm": "FB",
                "blksize": 6160,
                "lrecl": 80
            })
        );
    }

    #[tokio::test]
    async fn test_sequential_with_directory_blocks_is_rejected_before_sending() {
        let connector = MockConnector::new();
        let request = CreateDataSetRequest {
            data_set_organization: Some(DataSetOrganisation::Ps),
            directory_blocks: Some(12),
            ..pds()
        };

        assert_eq!(
            handle(&connector, request, Default::default()).await.unwrap_err(),
            ZosmfError::InvalidDirectoryBlock("STEVENH.NEW.JCL".into())
        );
        assert_eq!(connector.request_count(), 0);
    }

    #[test]
    fn test_sequential_without_directory_blocks_is_valid() {
        let request = CreateDataSetRequest {
            data_set_organization: Some(DataSetOrganisation::Ps),
            directory_blocks: Some(0),
            ..pds()
        };
        assert!(validate(&request).is_ok());
    }

    #[tokio::test]
    async fn test_allocation_error_means_already_exists() {
        let connector = MockConnector::new()
            .respond_json(500, json!({ "message": "Dynamic allocation Error", "category": 4 }));
        assert_eq!(
            handle(&connector, pds(), Default::default()).await.unwrap_err(),
            ZosmfError::DataSetAlreadyExists("STEVENH.NEW.JCL".into())
        );

        let connector = MockConnector::new()
            .respond_json(500, json!({ "message": "Dynamic allocation Error: IKJ56893I" }));
        assert!(matches!(
            handle(&connector, pds(), Default::default()).await,
            Err(ZosmfError::Remote { .. })
        ));
    }

    #[tokio::test]
    async fn test_overlong_name_is_rejected() {
        let connector = MockConnector::new();
        let request = CreateDataSetRequest {
            name: "A".repeat(45),
            ..Default::default()
        };
        assert!(matches!(
            handle(&connector, request, Default::default()).await,
            Err(ZosmfError::Validation(_))
        ));
        assert_eq!(connector.request_count(), 0);
    }
}
