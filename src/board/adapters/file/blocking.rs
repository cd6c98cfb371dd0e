//! Blocking filesystem helpers for the JSON file store.
//!
//! Filesystem calls are offloaded to the blocking pool so the async
//! executor's worker threads stay free.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;

use crate::board::ports::{BoardStoreError, BoardStoreResult};

/// Runs a blocking filesystem operation on the blocking thread pool.
pub(super) async fn run_blocking<F, T>(f: F) -> BoardStoreResult<T>
where
    F: FnOnce() -> BoardStoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(BoardStoreError::persistence)?
}

/// Splits `path` into its parent directory and file name.
fn split_path(path: &Utf8Path) -> io::Result<(&Utf8Path, &str)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("board path must include a file name"))?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    Ok((parent, file_name))
}

/// Reads the document at `path`, returning `None` when it does not exist.
pub(super) fn read_document(path: &Utf8Path) -> io::Result<Option<String>> {
    let (parent, file_name) = split_path(path)?;
    let dir = match Dir::open_ambient_dir(parent, ambient_authority()) {
        Ok(dir) => dir,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err),
    };
    match dir.read_to_string(file_name) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Writes `contents` next to `path` and renames it into place.
pub(super) fn write_document(path: &Utf8Path, contents: &str) -> io::Result<()> {
    let (parent, file_name) = split_path(path)?;
    Dir::create_ambient_dir_all(parent, ambient_authority())?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    let staging = format!(".{file_name}.tmp");
    dir.write(&staging, contents)?;
    dir.rename(&staging, &dir, file_name)
}
