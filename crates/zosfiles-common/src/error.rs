//! Error types shared across the workspace

use thiserror::Error;

/// Result type alias for common operations
pub type Result<T> = std::result::Result<T, CommonError>;

/// Errors raised while converting remote attribute values into DTOs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommonError {
    #[error("Unknown data set organisation: {0}")]
    InvalidDataSetOrganisation(String),

    #[error("Unknown allocation unit: {0}")]
    InvalidAllocationUnit(String),

    #[error("Unknown Unix entity type: {0}")]
    InvalidEntityType(String),

    #[error("Missing attribute '{0}'")]
    MissingAttribute(&'static str),

    #[error("Attribute '{attribute}' has an invalid value: {value}")]
    InvalidAttribute { attribute: &'static str, value: String },
}
