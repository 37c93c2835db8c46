//! Unix file-system operations
//!
//! Paths are absolute z/OS UNIX paths. The REST surface receives them
//! without the leading slash (`/unixfiles/u/steve/file.txt`); every runner
//! works on the normalised absolute form.

pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{
    CreateUnixAssetCommand, CreateUnixAssetRunner, DeleteUnixAssetCommand, DeleteUnixAssetRunner,
    PutUnixFileContentCommand, PutUnixFileContentRunner,
};
pub use queries::{
    GetFileEncodingQuery, GetFileEncodingRunner, GetUnixFileContentQuery,
    GetUnixFileContentRunner, ListDirectoryQuery, ListDirectoryRunner,
};
pub use routes::{unix_file_tags_routes, unix_files_routes};

/// Absolute form of a path, with exactly one leading slash
pub fn normalise_path(path: &str) -> String {
    format!("/{}", path.trim().trim_start_matches('/'))
}

/// Resource segments of a file below `restfiles`
///
/// Empty components from doubled or trailing slashes are dropped. Each
/// remaining component becomes one encoded URL segment.
pub(crate) fn fs_segments(path: &str) -> Vec<&str> {
    std::iter::once("fs")
        .chain(path.split('/').filter(|component| !component.is_empty()))
        .collect()
}
