pub mod create;
pub mod delete;
pub mod put_content;
pub mod rename;

pub use create::CreateDataSetRunner;
pub use delete::{DeleteDataSetCommand, DeleteDataSetRunner};
pub use put_content::{PutDataSetContentCommand, PutDataSetContentRunner};
pub use rename::{RenameDataSetCommand, RenameDataSetRunner};
