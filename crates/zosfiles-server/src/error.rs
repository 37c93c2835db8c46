//! Server-specific error types
//!
//! `ZosmfError` is the single error taxonomy surfaced by every data-set and
//! Unix-file operation. Each variant knows the HTTP status it is reported
//! with and renders a message naming the affected resource.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::response::ErrorResponse;
use crate::zosmf::{connector::TransportError, response::ResponseError};

/// Result type alias for runner and service operations
pub type ZosmfResult<T> = std::result::Result<T, ZosmfError>;

/// Domain errors raised while running an operation against z/OSMF
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZosmfError {
    #[error("Data set '{0}' not found")]
    DataSetNotFound(String),

    #[error("Data set '{0}' already exists")]
    DataSetAlreadyExists(String),

    #[error("Data set '{name}' is locked by job {job} on system {system} with ASID {asid}")]
    DataSetLocked {
        name: String,
        job: String,
        system: String,
        asid: String,
    },

    #[error("Directory blocks must be zero for sequential data set '{0}'")]
    InvalidDirectoryBlock(String),

    #[error("You are not authorised to access '{0}'")]
    Unauthorised(String),

    #[error("Permission denied for '{0}'")]
    PermissionDenied(String),

    #[error("'{0}' has been modified since it was last read")]
    PreconditionFailed(String),

    #[error("File '{0}' not found")]
    FileNotFound(String),

    #[error("'{0}' already exists")]
    FileAlreadyExists(String),

    #[error("'{0}' is not a file")]
    NotAFile(String),

    #[error("Directory '{0}' is not empty")]
    NotAnEmptyDirectory(String),

    #[error("Path name '{0}' is not valid")]
    PathNotValid(String),

    #[error("Permissions '{0}' are not valid, expected nine characters such as rwxr-xr--")]
    InvalidPermissions(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("z/OSMF returned status {status} without a usable response body for '{resource}'")]
    NoResponseBody { status: u16, resource: String },

    #[error("z/OSMF request for '{resource}' failed with status {status}: {body}")]
    Remote {
        status: u16,
        resource: String,
        body: String,
    },

    #[error("Internal server error: {0}")]
    Server(String),
}

impl ZosmfError {
    /// HTTP status reported to the caller
    pub fn status(&self) -> StatusCode {
        match self {
            ZosmfError::DataSetNotFound(_) | ZosmfError::FileNotFound(_) => StatusCode::NOT_FOUND,
            ZosmfError::DataSetAlreadyExists(_)
            | ZosmfError::FileAlreadyExists(_)
            | ZosmfError::DataSetLocked { .. } => StatusCode::CONFLICT,
            ZosmfError::Unauthorised(_) | ZosmfError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            ZosmfError::PreconditionFailed(_) => StatusCode::PRECONDITION_FAILED,
            ZosmfError::InvalidDirectoryBlock(_)
            | ZosmfError::NotAFile(_)
            | ZosmfError::NotAnEmptyDirectory(_)
            | ZosmfError::PathNotValid(_)
            | ZosmfError::InvalidPermissions(_)
            | ZosmfError::BadRequest(_)
            | ZosmfError::Validation(_) => StatusCode::BAD_REQUEST,
            ZosmfError::Remote { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ZosmfError::NoResponseBody { .. } | ZosmfError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }
}

impl From<TransportError> for ZosmfError {
    fn from(err: TransportError) -> Self {
        ZosmfError::Server(err.to_string())
    }
}

impl From<ResponseError> for ZosmfError {
    fn from(err: ResponseError) -> Self {
        ZosmfError::Server(err.to_string())
    }
}

impl IntoResponse for ZosmfError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = Json(ErrorResponse::new(status, self.to_string()));
        (status, body).into_response()
    }
}
