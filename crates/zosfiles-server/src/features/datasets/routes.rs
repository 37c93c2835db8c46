//! Data set API routes
//!
//! # Route Structure
//!
//! - `GET /api/v2/datasets/:filter` - List data sets with base attributes
//! - `GET /api/v2/datasets/:filter/list` - List data set names
//! - `GET /api/v2/datasets/:name/members` - List members of a partitioned data set
//! - `GET /api/v2/datasets/:name/content` - Read records, `ETag` in the response
//! - `PUT /api/v2/datasets/:name/content` - Write records, optional `If-Match`
//! - `POST /api/v2/datasets` - Allocate a data set
//! - `PUT /api/v2/datasets/:name/rename` - Rename a data set or member
//! - `DELETE /api/v2/datasets/:name` - Delete a data set or member
//!
//! Inbound `X-IBM-*` headers are forwarded to z/OSMF on every route.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use zosfiles_common::types::datasets::{
    CreateDataSetRequest, DataSetContent, RenameDataSetRequest,
};
use zosfiles_common::types::ItemsWrapper;

use super::commands::{
    self, DeleteDataSetCommand, PutDataSetContentCommand, RenameDataSetCommand,
};
use super::queries::{self, GetDataSetContentQuery, ListDataSetsQuery, ListMembersQuery};
use crate::api::response::{created, with_etag};
use crate::error::ZosmfError;
use crate::features::shared::{if_match, PassthroughHeaders};
use crate::features::{FeatureState, API_PREFIX};

// ============================================================================
// Router Configuration
// ============================================================================

pub fn datasets_routes() -> Router<FeatureState> {
    Router::new()
        .route("/", post(create_data_set))
        .route("/:name", get(list_data_set_attributes).delete(delete_data_set))
        .route("/:name/list", get(list_data_sets))
        .route("/:name/members", get(list_members))
        .route("/:name/content", get(get_content).put(put_content))
        .route("/:name/rename", put(rename_data_set))
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

#[tracing::instrument(skip(state, passthrough), fields(filter = %filter))]
async fn list_data_set_attributes(
    State(state): State<FeatureState>,
    Path(filter): Path<String>,
    passthrough: PassthroughHeaders,
) -> Result<Response, ZosmfError> {
    let items = queries::list_data_sets::handle_attributes(
        state.connector.as_ref(),
        ListDataSetsQuery { filter },
        passthrough,
    )
    .await?;

    Ok(Json(ItemsWrapper::new(items)).into_response())
}

#[tracing::instrument(skip(state, passthrough), fields(filter = %filter))]
async fn list_data_sets(
    State(state): State<FeatureState>,
    Path(filter): Path<String>,
    passthrough: PassthroughHeaders,
) -> Result<Response, ZosmfError> {
    let items = queries::list_data_sets::handle_names(
        state.connector.as_ref(),
        ListDataSetsQuery { filter },
        passthrough,
    )
    .await?;

    Ok(Json(ItemsWrapper::new(items)).into_response())
}

#[tracing::instrument(skip(state, passthrough), fields(data_set = %data_set_name))]
async fn list_members(
    State(state): State<FeatureState>,
    Path(data_set_name): Path<String>,
    passthrough: PassthroughHeaders,
) -> Result<Response, ZosmfError> {
    let members = queries::list_members::handle(
        state.connector.as_ref(),
        ListMembersQuery { data_set_name },
        passthrough,
    )
    .await?;

    Ok(Json(ItemsWrapper::new(members)).into_response())
}

#[tracing::instrument(skip(state, passthrough), fields(data_set = %data_set_name))]
async fn get_content(
    State(state): State<FeatureState>,
    Path(data_set_name): Path<String>,
    passthrough: PassthroughHeaders,
) -> Result<Response, ZosmfError> {
    let result = queries::get_content::handle(
        state.connector.as_ref(),
        GetDataSetContentQuery { data_set_name },
        passthrough,
    )
    .await?;

    Ok(with_etag(Json(result.content).into_response(), result.etag.as_deref()))
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

#[tracing::instrument(skip(state, headers, passthrough, body), fields(data_set = %data_set_name))]
async fn put_content(
    State(state): State<FeatureState>,
    Path(data_set_name): Path<String>,
    headers: HeaderMap,
    passthrough: PassthroughHeaders,
    Json(body): Json<DataSetContent>,
) -> Result<Response, ZosmfError> {
    let etag = if_match(&headers);
    let new_etag = commands::put_content::handle(
        state.connector.as_ref(),
        PutDataSetContentCommand {
            data_set_name,
            records: body.records,
            etag,
        },
        passthrough,
    )
    .await?;

    Ok(with_etag(StatusCode::NO_CONTENT.into_response(), new_etag.as_deref()))
}

#[tracing::instrument(skip(state, passthrough, request), fields(data_set = %request.name))]
async fn create_data_set(
    State(state): State<FeatureState>,
    passthrough: PassthroughHeaders,
    Json(request): Json<CreateDataSetRequest>,
) -> Result<Response, ZosmfError> {
    let name = commands::create::handle(state.connector.as_ref(), request, passthrough).await?;

    tracing::info!(data_set = %name, "Data set created via API");

    Ok(created(&format!("{}/datasets/{}", API_PREFIX, name)))
}

#[tracing::instrument(skip(state, passthrough, body), fields(from = %old_name, to = %body.new_name))]
async fn rename_data_set(
    State(state): State<FeatureState>,
    Path(old_name): Path<String>,
    passthrough: PassthroughHeaders,
    Json(body): Json<RenameDataSetRequest>,
) -> Result<Response, ZosmfError> {
    let response = commands::rename::handle(
        state.connector.as_ref(),
        RenameDataSetCommand {
            old_name,
            new_name: body.new_name,
        },
        passthrough,
    )
    .await?;

    tracing::info!(message = %response.message, "Data set renamed via API");

    Ok(Json(response).into_response())
}

#[tracing::instrument(skip(state, passthrough), fields(data_set = %data_set_name))]
async fn delete_data_set(
    State(state): State<FeatureState>,
    Path(data_set_name): Path<String>,
    passthrough: PassthroughHeaders,
) -> Result<Response, ZosmfError> {
    commands::delete::handle(
        state.connector.as_ref(),
        DeleteDataSetCommand { data_set_name },
        passthrough,
    )
    .await?;

    tracing::info!("Data set deleted via API");

    Ok(StatusCode::NO_CONTENT.into_response())
}
