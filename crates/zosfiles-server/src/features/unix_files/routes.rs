//! Unix file API routes
//!
//! # Route Structure
//!
//! - `GET /api/v2/unixfiles?path=` - List a directory
//! - `GET /api/v2/unixfiles/*path` - Read a file, `ETag` in the response
//! - `PUT /api/v2/unixfiles/*path` - Write a file, optional `If-Match`
//! - `POST /api/v2/unixfiles/*path` - Create a file or directory
//! - `DELETE /api/v2/unixfiles/*path` - Delete a file or directory
//! - `GET /api/v2/unixfiles-tags/*path` - Encoding tag of a file
//!
//! Content routes accept `convert` and `decode` query flags. Without
//! `convert` the file's encoding tag decides.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use zosfiles_common::types::unix_files::{UnixCreateAssetRequest, UnixFileContent};

use super::commands::{
    self, CreateUnixAssetCommand, DeleteUnixAssetCommand, PutUnixFileContentCommand,
};
use super::normalise_path;
use super::queries::{self, GetFileEncodingQuery, GetUnixFileContentQuery, ListDirectoryQuery};
use crate::api::response::{created, with_etag};
use crate::error::ZosmfError;
use crate::features::shared::{if_match, PassthroughHeaders, RequestOrigin};
use crate::features::{FeatureState, API_PREFIX};

// ============================================================================
// Router Configuration
// ============================================================================

pub fn unix_files_routes() -> Router<FeatureState> {
    Router::new().route("/", get(list_directory)).route(
        "/*path",
        get(get_content)
            .put(put_content)
            .post(create_asset)
            .delete(delete_asset),
    )
}

pub fn unix_file_tags_routes() -> Router<FeatureState> {
    Router::new().route("/*path", get(get_file_tag))
}

#[derive(Debug, Deserialize)]
pub struct DirectoryParams {
    pub path: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContentParams {
    pub convert: Option<bool>,
    #[serde(default)]
    pub decode: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub recursive: bool,
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

#[tracing::instrument(skip(state, origin, passthrough), fields(path = %params.path))]
async fn list_directory(
    State(state): State<FeatureState>,
    Query(params): Query<DirectoryParams>,
    origin: RequestOrigin,
    passthrough: PassthroughHeaders,
) -> Result<Response, ZosmfError> {
    let directory = queries::list_directory::handle(
        state.connector.as_ref(),
        ListDirectoryQuery { path: params.path },
        origin,
        passthrough,
    )
    .await?;

    Ok(Json(directory).into_response())
}

#[tracing::instrument(skip(state, passthrough), fields(path = %path))]
async fn get_content(
    State(state): State<FeatureState>,
    Path(path): Path<String>,
    Query(params): Query<ContentParams>,
    passthrough: PassthroughHeaders,
) -> Result<Response, ZosmfError> {
    let result = queries::get_content::handle(
        state.connector.as_ref(),
        GetUnixFileContentQuery {
            path: normalise_path(&path),
            convert: params.convert,
            decode: params.decode,
        },
        passthrough,
    )
    .await?;

    Ok(with_etag(Json(result.content).into_response(), result.etag.as_deref()))
}

#[tracing::instrument(skip(state, passthrough), fields(path = %path))]
async fn get_file_tag(
    State(state): State<FeatureState>,
    Path(path): Path<String>,
    passthrough: PassthroughHeaders,
) -> Result<Response, ZosmfError> {
    let tag = queries::get_encoding::handle(
        state.connector.as_ref(),
        GetFileEncodingQuery {
            path: normalise_path(&path),
        },
        passthrough,
    )
    .await?;

    Ok(Json(tag).into_response())
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

#[tracing::instrument(skip(state, headers, passthrough, body), fields(path = %path))]
async fn put_content(
    State(state): State<FeatureState>,
    Path(path): Path<String>,
    Query(params): Query<ContentParams>,
    headers: HeaderMap,
    passthrough: PassthroughHeaders,
    Json(body): Json<UnixFileContent>,
) -> Result<Response, ZosmfError> {
    let new_etag = commands::put_content::handle(
        state.connector.as_ref(),
        PutUnixFileContentCommand {
            path: normalise_path(&path),
            content: body.content,
            etag: if_match(&headers),
            convert: params.convert,
            decode: params.decode,
        },
        passthrough,
    )
    .await?;

    Ok(with_etag(StatusCode::NO_CONTENT.into_response(), new_etag.as_deref()))
}

#[tracing::instrument(skip(state, passthrough, request), fields(path = %path))]
async fn create_asset(
    State(state): State<FeatureState>,
    Path(path): Path<String>,
    passthrough: PassthroughHeaders,
    Json(request): Json<UnixCreateAssetRequest>,
) -> Result<Response, ZosmfError> {
    let created_path = commands::create::handle(
        state.connector.as_ref(),
        CreateUnixAssetCommand {
            path: normalise_path(&path),
            entity_type: request.entity_type,
            permissions: request.permissions,
        },
        passthrough,
    )
    .await?;

    tracing::info!(path = %created_path, "Unix asset created via API");

    Ok(created(&format!("{}/unixfiles{}", API_PREFIX, created_path)))
}

#[tracing::instrument(skip(state, passthrough), fields(path = %path))]
async fn delete_asset(
    State(state): State<FeatureState>,
    Path(path): Path<String>,
    Query(params): Query<DeleteParams>,
    passthrough: PassthroughHeaders,
) -> Result<Response, ZosmfError> {
    let command =
        DeleteUnixAssetCommand::from_request(normalise_path(&path), params.recursive, &passthrough);
    commands::delete::handle(state.connector.as_ref(), command, passthrough).await?;

    tracing::info!("Unix asset deleted via API");

    Ok(StatusCode::NO_CONTENT.into_response())
}
