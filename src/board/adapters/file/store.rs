//! Board store persisting the snapshot as one JSON file.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};

use super::blocking::{read_document, run_blocking, write_document};
use crate::board::{
    domain::BoardSnapshot,
    ports::{BoardStore, BoardStoreError, BoardStoreResult},
};

/// Board store backed by a JSON document on the local filesystem.
///
/// This backend has no live updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileBoardStore {
    path: Utf8PathBuf,
}

impl JsonFileBoardStore {
    /// Creates a store for the document at `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the document path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

#[async_trait]
impl BoardStore for JsonFileBoardStore {
    async fn load(&self) -> BoardStoreResult<Option<BoardSnapshot>> {
        let path = self.path.clone();
        let raw = run_blocking(move || read_document(&path).map_err(BoardStoreError::persistence))
            .await?;
        match raw {
            Some(contents) if !contents.trim().is_empty() => {
                Ok(BoardSnapshot::from_json(&contents)?)
            }
            _ => Ok(None),
        }
    }

    async fn save(&self, snapshot: &BoardSnapshot) -> BoardStoreResult<()> {
        let encoded = snapshot.to_json()?;
        let path = self.path.clone();
        run_blocking(move || {
            write_document(&path, &encoded).map_err(BoardStoreError::persistence)
        })
        .await
    }
}
