//! Shared validation utilities
//!
//! Input checks that run before any request reaches z/OSMF.
//!
//! # Examples
//!
//! ```rust,ignore
//! use zosfiles_server::features::shared::validation::{validate_permissions, validate_required};
//!
//! validate_required("path", "/u/steve/file.txt")?;
//! validate_permissions("rwxr-xr--")?;
//! ```

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use crate::error::ZosmfError;

/// Symbolic permission strings are exactly owner, group and other triplets
pub const PERMISSIONS_LENGTH: usize = 9;

static PERMISSIONS_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(?:[rR-][wW-][xX-]){3}$").ok());

/// Errors that can occur during input validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputValidationError {
    #[error("{field} is required and cannot be empty")]
    Required { field: &'static str },

    #[error("{field} must be at most {max_length} characters")]
    TooLong {
        field: &'static str,
        max_length: usize,
    },
}

impl From<InputValidationError> for ZosmfError {
    fn from(err: InputValidationError) -> Self {
        ZosmfError::Validation(err.to_string())
    }
}

/// Validate that a field is present
pub fn validate_required(field: &'static str, value: &str) -> Result<(), InputValidationError> {
    if value.trim().is_empty() {
        return Err(InputValidationError::Required { field });
    }
    Ok(())
}

/// Validate a field that is present and bounded in length
pub fn validate_bounded(
    field: &'static str,
    value: &str,
    max_length: usize,
) -> Result<(), InputValidationError> {
    validate_required(field, value)?;
    if value.len() > max_length {
        return Err(InputValidationError::TooLong { field, max_length });
    }
    Ok(())
}

/// True when `permissions` is a nine character symbolic mode such as `rwxr-xr--`
pub fn is_valid_permissions(permissions: &str) -> bool {
    permissions.len() == PERMISSIONS_LENGTH
        && PERMISSIONS_PATTERN
            .as_ref()
            .is_some_and(|re| re.is_match(permissions))
}

/// Validate a symbolic permission string
pub fn validate_permissions(permissions: &str) -> Result<(), ZosmfError> {
    if is_valid_permissions(permissions) {
        Ok(())
    } else {
        Err(ZosmfError::InvalidPermissions(permissions.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_validate_required() {
        assert!(validate_required("path", "/u/steve").is_ok());
        assert_eq!(
            validate_required("path", "  "),
            Err(InputValidationError::Required { field: "path" })
        );
    }

    #[test]
    fn test_validate_bounded() {
        assert!(validate_bounded("name", "A.B", 44).is_ok());
        assert_eq!(
            validate_bounded("name", &"A".repeat(45), 44),
            Err(InputValidationError::TooLong {
                field: "name",
                max_length: 44
            })
        );
    }

    #[test]
    fn test_valid_permissions() {
        assert!(is_valid_permissions("rwxr--r--"));
        assert!(is_valid_permissions("rwxrwxrwx"));
        assert!(is_valid_permissions("---------"));
        assert!(is_valid_permissions("RWXr-x---"));
    }

    #[test]
    fn test_invalid_permissions() {
        assert!(!is_valid_permissions("123rwxrwxr"));
        assert!(!is_valid_permissions("rwxrwxrwxr"));
        assert!(!is_valid_permissions("rwx"));
        assert!(!is_valid_permissions("wrxrwxrwx"));
        assert!(!is_valid_permissions(""));
        assert_eq!(
            validate_permissions("777"),
            Err(ZosmfError::InvalidPermissions("777".into()))
        );
    }

    proptest! {
        #[test]
        fn prop_longer_than_nine_is_rejected(s in "[rwx-]{10,20}") {
            prop_assert!(!is_valid_permissions(&s));
        }

        #[test]
        fn prop_triplets_are_accepted(s in "([r-][w-][x-]){3}") {
            prop_assert!(is_valid_permissions(&s));
        }
    }
}
