pub mod get_content;
pub mod get_encoding;
pub mod list_directory;

pub use get_content::{GetUnixFileContentQuery, GetUnixFileContentRunner};
pub use get_encoding::{should_convert, GetFileEncodingQuery, GetFileEncodingRunner};
pub use list_directory::{ListDirectoryQuery, ListDirectoryRunner};
