//! Unix file-system DTOs

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CommonError;

/// Kind of Unix file-system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UnixEntityType {
    File,
    Directory,
}

impl UnixEntityType {
    /// Derive the type from a symbolic mode such as `drwxr-xr-x`
    pub fn from_mode(mode: &str) -> Self {
        if mode.starts_with('d') {
            UnixEntityType::Directory
        } else {
            UnixEntityType::File
        }
    }

    /// The `type` value z/OSMF expects when creating an entry
    pub fn as_zosmf(self) -> &'static str {
        match self {
            UnixEntityType::File => "file",
            UnixEntityType::Directory => "directory",
        }
    }
}

impl FromStr for UnixEntityType {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(UnixEntityType::File),
            "directory" | "dir" => Ok(UnixEntityType::Directory),
            other => Err(CommonError::InvalidEntityType(other.to_string())),
        }
    }
}

/// One child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnixDirectoryChild {
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: UnixEntityType,
    pub link: String,
}

/// Attributes of a directory together with its children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnixDirectoryAttributesWithChildren {
    #[serde(rename = "type")]
    pub entity_type: UnixEntityType,
    pub owner: String,
    pub group: String,
    pub permissions_symbolic: String,
    pub size: u64,
    pub last_modified_date: String,
    pub children: Vec<UnixDirectoryChild>,
}

/// Body of a Unix file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnixFileContent {
    pub content: String,
}

/// Content plus the ETag the remote system attached to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnixFileContentWithEtag {
    pub content: UnixFileContent,
    pub etag: Option<String>,
}

/// Request to create a file or directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnixCreateAssetRequest {
    #[serde(rename = "type")]
    pub entity_type: UnixEntityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
}

/// Result of a file encoding tag lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnixFileTag {
    pub tag: String,
    pub convert: bool,
}
