//! Data set and member operations
//!
//! Queries read the catalog or the records; commands allocate, write,
//! rename and delete. Every operation is one runner in its own module.

pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{
    CreateDataSetRunner, DeleteDataSetCommand, DeleteDataSetRunner, PutDataSetContentCommand,
    PutDataSetContentRunner, RenameDataSetCommand, RenameDataSetRunner,
};
pub use queries::{
    GetDataSetContentQuery, GetDataSetContentRunner, ListDataSetAttributesRunner,
    ListDataSetsQuery, ListDataSetsRunner, ListMembersQuery, ListMembersRunner,
};
pub use routes::datasets_routes;
