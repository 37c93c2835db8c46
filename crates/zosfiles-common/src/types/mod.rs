//! DTOs returned by the zosfiles REST endpoints
//!
//! Field names are serialized in camelCase to match the JSON surface
//! consumed by editor clients.

pub mod datasets;
pub mod unix_files;

use serde::{Deserialize, Serialize};

/// Envelope used by every list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemsWrapper<T> {
    pub items: Vec<T>,
}

impl<T> ItemsWrapper<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> From<Vec<T>> for ItemsWrapper<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}
