//! Feature modules implementing the zosfiles API
//!
//! Each feature is a vertical slice with its own commands, queries and
//! routes. Commands and queries are request runners from `crate::zosmf`.
//!
//! # Features
//!
//! - **datasets**: catalog listings, record content, allocation, rename and delete
//! - **unix_files**: directory listings, file content, encoding tags, create and delete
//!
//! # Architecture
//!
//! Each feature module follows the structure:
//! - `commands/` - Write operations (put content, create, rename, delete)
//! - `queries/` - Read operations (list, get content)
//! - `routes.rs` - HTTP route definitions

pub mod datasets;
pub mod shared;
pub mod unix_files;

use axum::Router;
use std::sync::Arc;

use crate::zosmf::Connector;

/// Prefix every feature router is mounted under
pub const API_PREFIX: &str = "/api/v2";

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// Transport to the z/OSMF REST files services
    pub connector: Arc<dyn Connector>,
}

/// Creates the API router with all feature routes mounted
///
/// - `/datasets` - Data set operations
/// - `/unixfiles` - Unix file operations
/// - `/unixfiles-tags` - Unix file encoding tags
pub fn router(state: FeatureState) -> Router<()> {
    Router::new()
        .nest("/datasets", datasets::datasets_routes().with_state(state.clone()))
        .nest("/unixfiles", unix_files::unix_files_routes().with_state(state.clone()))
        .nest("/unixfiles-tags", unix_files::unix_file_tags_routes().with_state(state))
}
