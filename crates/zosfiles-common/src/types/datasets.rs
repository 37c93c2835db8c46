//! Data-set DTOs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CommonError;

/// Data set organisation as reported by the catalog (`dsorg`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataSetOrganisation {
    /// Partitioned data set
    #[serde(rename = "PO")]
    Po,
    /// Partitioned data set extended (PDSE)
    #[serde(rename = "PO-E")]
    PoE,
    /// Physical sequential
    #[serde(rename = "PS")]
    Ps,
    /// VSAM cluster
    #[serde(rename = "VS")]
    Vsam,
}

impl DataSetOrganisation {
    /// The value z/OSMF uses for this organisation
    pub fn as_zosmf(self) -> &'static str {
        match self {
            DataSetOrganisation::Po => "PO",
            DataSetOrganisation::PoE => "PO-E",
            DataSetOrganisation::Ps => "PS",
            DataSetOrganisation::Vsam => "VS",
        }
    }

    pub fn is_partitioned(self) -> bool {
        matches!(self, DataSetOrganisation::Po | DataSetOrganisation::PoE)
    }
}

impl FromStr for DataSetOrganisation {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PO" => Ok(DataSetOrganisation::Po),
            "PO-E" | "POE" => Ok(DataSetOrganisation::PoE),
            "PS" => Ok(DataSetOrganisation::Ps),
            "VS" | "VSAM" => Ok(DataSetOrganisation::Vsam),
            other => Err(CommonError::InvalidDataSetOrganisation(other.to_string())),
        }
    }
}

impl fmt::Display for DataSetOrganisation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_zosmf())
    }
}

/// Space allocation unit (`alcunit` / `spacu`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AllocationUnit {
    Trk,
    Cyl,
    Blk,
}

impl AllocationUnit {
    pub fn as_zosmf(self) -> &'static str {
        match self {
            AllocationUnit::Trk => "TRK",
            AllocationUnit::Cyl => "CYL",
            AllocationUnit::Blk => "BLK",
        }
    }
}

impl FromStr for AllocationUnit {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TRK" | "TRACKS" => Ok(AllocationUnit::Trk),
            "CYL" | "CYLINDERS" => Ok(AllocationUnit::Cyl),
            "BLK" | "BLOCKS" => Ok(AllocationUnit::Blk),
            other => Err(CommonError::InvalidAllocationUnit(other.to_string())),
        }
    }
}

/// Entry of a name-only data set listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSet {
    pub name: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub migrated: bool,
}

/// Entry of a data set listing with base attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSetAttributes {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocation_unit: Option<AllocationUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_set_organization: Option<DataSetOrganisation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reference_date: Option<String>,
    pub migrated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_serial: Option<String>,
}

/// Body of a data set or member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSetContent {
    pub records: String,
}

/// Content plus the ETag the remote system attached to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSetContentWithEtag {
    pub content: DataSetContent,
    pub etag: Option<String>,
}

/// Parameters for allocating a new data set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDataSetRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_serial: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    pub data_set_organization: Option<DataSetOrganisation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocation_unit: Option<AllocationUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory_blocks: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_block: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_length: Option<u32>,
}

/// Body of a rename request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameDataSetRequest {
    pub new_name: String,
}

/// Informational result of a completed rename
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameDataSetResponse {
    pub message: String,
}
