//! Shared utilities and types for feature modules
//!
//! # Contents
//!
//! - **request_context**: passthrough headers and request origin extractors
//! - **validation**: input validation utilities
//! - **test_helpers**: scripted connector and canned responses (test-only)

pub mod request_context;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;

pub use request_context::{if_match, PassthroughHeaders, RequestOrigin};
pub use validation::{validate_permissions, validate_required, InputValidationError};
