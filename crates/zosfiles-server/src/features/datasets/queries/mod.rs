pub mod get_content;
pub mod list_data_sets;
pub mod list_members;

pub use get_content::{GetDataSetContentQuery, GetDataSetContentRunner};
pub use list_data_sets::{ListDataSetAttributesRunner, ListDataSetsQuery, ListDataSetsRunner};
pub use list_members::{ListMembersQuery, ListMembersRunner};
