//! zosfiles Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, logging, and error handling for the zosfiles workspace.
//!
//! # Overview
//!
//! - **Logging**: `tracing` subscriber setup driven by environment variables
//! - **Types**: DTOs returned by the data-set and Unix-file REST endpoints
//! - **Error Handling**: Parse errors for the DTO enumerations
//!
//! # Example
//!
//! ```no_run
//! use zosfiles_common::types::datasets::DataSetOrganisation;
//!
//! let dsorg: DataSetOrganisation = "PO-E".parse().unwrap();
//! assert_eq!(dsorg.as_zosmf(), "PO-E");
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{CommonError, Result};
