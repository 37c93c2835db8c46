pub mod create;
pub mod delete;
pub mod put_content;

pub use create::{CreateUnixAssetCommand, CreateUnixAssetRunner};
pub use delete::{DeleteUnixAssetCommand, DeleteUnixAssetRunner};
pub use put_content::{PutUnixFileContentCommand, PutUnixFileContentRunner};
