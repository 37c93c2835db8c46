//! Failure classification shared by all runners
//!
//! z/OSMF reports failures as a JSON body with optional `message`,
//! `details` and `stack` fields. A runner describes its failure mapping as
//! an ordered slice of [`ErrorRule`]s; the first matching rule wins and no
//! match falls through to the generic remote error.
//!
//! Absent fields never match and never fail.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::error::ZosmfError;

/// Diagnostics emitted by the z/OSMF data-set and Unix-file services
pub mod diagnostics {
    pub const PERMISSION_DENIED: &str = "EDC5111I Permission denied.";
    pub const INVALID_ARGUMENT: &str = "EDC5121I Invalid argument.";
    pub const NO_SUCH_FILE: &str = "EDC5129I No such file or directory.";
    pub const DIRECTORY_NOT_EMPTY: &str = "EDC5136I Directory not empty.";
    pub const AUTHORIZATION_FAILED: &str = "ISRZ002 Authorization failed";
    pub const NOT_CATALOGED: &str = "ISRZ002 Data set not cataloged";
    pub const DATA_SET_NOT_FOUND: &str = "Data set not found.";
    pub const MEMBER_NOT_FOUND: &str = "Member not found";
    pub const DYNAMIC_ALLOCATION_ERROR: &str = "Dynamic allocation Error";
    pub const PATH_NOT_VALID: &str = "Path name is not valid";
}

static LOCK_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)locked by job\s+(?P<job>[^\s,.]+)(?:.*?system\s+(?P<system>[^\s,.]+))?(?:.*?ASID\s+(?P<asid>[0-9A-Fx]+))?",
    )
    .ok()
});

/// Parsed z/OSMF error body plus the status it arrived with
#[derive(Debug)]
pub struct ErrorContext<'a> {
    pub status: u16,
    pub body: &'a Value,
}

impl<'a> ErrorContext<'a> {
    pub fn new(status: u16, body: &'a Value) -> Self {
        Self { status, body }
    }

    pub fn message(&self) -> Option<&'a str> {
        self.body.get("message").and_then(Value::as_str)
    }

    pub fn stack(&self) -> Option<&'a str> {
        self.body.get("stack").and_then(Value::as_str)
    }

    /// `details` joined into one string; z/OSMF sends either a string or an array of strings
    pub fn details(&self) -> Option<String> {
        match self.body.get("details")? {
            Value::String(s) => Some(s.clone()),
            Value::Array(items) => {
                let lines: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
                (!lines.is_empty()).then(|| lines.join("\n"))
            },
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    pub fn message_is(&self, expected: &str) -> bool {
        self.message() == Some(expected)
    }

    pub fn message_contains(&self, needle: &str) -> bool {
        contains_ignore_case(self.message(), needle)
    }

    pub fn details_contain(&self, needle: &str) -> bool {
        contains_ignore_case(self.details().as_deref(), needle)
    }

    pub fn stack_contains(&self, needle: &str) -> bool {
        contains_ignore_case(self.stack(), needle)
    }

    /// Match against either `message` or `details`
    pub fn mentions(&self, needle: &str) -> bool {
        self.message_contains(needle) || self.details_contain(needle)
    }
}

/// Diagnostics arrive in mixed case from z/OSMF and upper case from IDCAMS
fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase()))
}

/// Builds the error for a matched rule from the context and the resource name
pub type ErrorBuilder = fn(&ErrorContext<'_>, &str) -> ZosmfError;

/// One `(predicate) -> error` entry of a runner's failure mapping
#[derive(Clone, Copy)]
pub struct ErrorRule {
    pub name: &'static str,
    pub matches: fn(&ErrorContext<'_>) -> bool,
    pub build: ErrorBuilder,
}

impl ErrorRule {
    pub const fn new(
        name: &'static str,
        matches: fn(&ErrorContext<'_>) -> bool,
        build: ErrorBuilder,
    ) -> Self {
        Self {
            name,
            matches,
            build,
        }
    }
}

/// Evaluate rules top to bottom and build the first match
pub fn classify(rules: &[ErrorRule], ctx: &ErrorContext<'_>, resource: &str) -> Option<ZosmfError> {
    rules.iter().find(|rule| (rule.matches)(ctx)).map(|rule| {
        tracing::debug!(rule = rule.name, status = ctx.status, resource, "Classified z/OSMF failure");
        (rule.build)(ctx, resource)
    })
}

// ============================================================================
// Shared predicates
// ============================================================================

pub fn is_authorization_failure(ctx: &ErrorContext<'_>) -> bool {
    ctx.status == 500 && ctx.mentions("authorization failed")
}

pub fn is_not_cataloged(ctx: &ErrorContext<'_>) -> bool {
    ctx.status == 404 && ctx.mentions("not cataloged")
}

pub fn is_permission_denied(ctx: &ErrorContext<'_>) -> bool {
    ctx.mentions("permission denied")
}

pub fn is_no_such_file(ctx: &ErrorContext<'_>) -> bool {
    ctx.mentions("no such file or directory")
}

pub fn is_directory_not_empty(ctx: &ErrorContext<'_>) -> bool {
    ctx.mentions("directory not empty")
}

pub fn is_invalid_argument(ctx: &ErrorContext<'_>) -> bool {
    ctx.mentions("invalid argument")
}

pub fn is_data_set_locked(ctx: &ErrorContext<'_>) -> bool {
    ctx.mentions("locked by job")
}

// ============================================================================
// Shared builders
// ============================================================================

pub fn data_set_not_found(_: &ErrorContext<'_>, resource: &str) -> ZosmfError {
    ZosmfError::DataSetNotFound(resource.to_string())
}

pub fn unauthorised(_: &ErrorContext<'_>, resource: &str) -> ZosmfError {
    ZosmfError::Unauthorised(resource.to_string())
}

pub fn permission_denied(_: &ErrorContext<'_>, resource: &str) -> ZosmfError {
    ZosmfError::PermissionDenied(resource.to_string())
}

pub fn file_not_found(_: &ErrorContext<'_>, resource: &str) -> ZosmfError {
    ZosmfError::FileNotFound(resource.to_string())
}

pub fn not_a_file(_: &ErrorContext<'_>, resource: &str) -> ZosmfError {
    ZosmfError::NotAFile(resource.to_string())
}

pub fn not_an_empty_directory(_: &ErrorContext<'_>, resource: &str) -> ZosmfError {
    ZosmfError::NotAnEmptyDirectory(resource.to_string())
}

/// Pull job, system and ASID out of an enqueue diagnostic
pub fn data_set_locked(ctx: &ErrorContext<'_>, resource: &str) -> ZosmfError {
    let text = [ctx.message().map(str::to_string), ctx.details()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join("\n");

    let captures = LOCK_PATTERN.as_ref().and_then(|re| re.captures(&text));
    let part = |name: &str| {
        captures
            .as_ref()
            .and_then(|c| c.name(name))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| "UNKNOWN".to_string())
    };

    ZosmfError::DataSetLocked {
        name: resource.to_string(),
        job: part("job"),
        system: part("system"),
        asid: part("asid"),
    }
}

/// Failure mapping shared by every Unix file content runner
pub const UNIX_FILE_RULES: &[ErrorRule] = &[
    ErrorRule::new("invalid-argument", is_invalid_argument, not_a_file),
    ErrorRule::new("permission-denied", is_permission_denied, unauthorised),
    ErrorRule::new("no-such-file", is_no_such_file, file_not_found),
];
