//! Persistence port for the whole-board document.

use crate::board::domain::BoardSnapshot;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;

/// Result type for board store operations.
pub type BoardStoreResult<T> = Result<T, BoardStoreError>;

/// Board persistence contract.
///
/// The board is always read and written as one snapshot; there are no
/// partial updates.
#[async_trait]
pub trait BoardStore: Send + Sync {
    /// Reads the stored snapshot.
    ///
    /// Returns `None` when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError`] when the backing store cannot be read or
    /// holds a malformed document.
    async fn load(&self) -> BoardStoreResult<Option<BoardSnapshot>>;

    /// Replaces the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError`] when the write fails.
    async fn save(&self, snapshot: &BoardSnapshot) -> BoardStoreResult<()>;

    /// Subscribes to full-snapshot replacements pushed by the backing store.
    ///
    /// Returns `None` for stores without live updates.
    fn subscribe(&self) -> Option<broadcast::Receiver<BoardSnapshot>> {
        None
    }
}

/// Errors returned by board store implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardStoreError {
    /// The stored document could not be decoded or encoded.
    #[error("malformed board document: {0}")]
    Malformed(Arc<serde_json::Error>),

    /// The backing store rejected the request.
    #[error("board store responded with status {status}: {body}")]
    Rejected {
        /// Status code reported by the store.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<serde_json::Error> for BoardStoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(Arc::new(err))
    }
}
