//! In-memory board store holding the serialized document.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

use crate::board::{
    domain::BoardSnapshot,
    ports::{BoardStore, BoardStoreError, BoardStoreResult},
};

const CHANNEL_CAPACITY: usize = 16;

/// Thread-safe in-memory board store.
///
/// Keeps the document as serialized JSON, the way a browser key-value
/// store would, and broadcasts every write to subscribers.
#[derive(Debug, Clone)]
pub struct InMemoryBoardStore {
    document: Arc<RwLock<Option<String>>>,
    changes: broadcast::Sender<BoardSnapshot>,
}

impl Default for InMemoryBoardStore {
    fn default() -> Self {
        let (changes, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            document: Arc::new(RwLock::new(None)),
            changes,
        }
    }
}

impl InMemoryBoardStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with a raw JSON document.
    #[must_use]
    pub fn with_document(raw: impl Into<String>) -> Self {
        let store = Self::default();
        if let Ok(mut document) = store.document.write() {
            *document = Some(raw.into());
        }
        store
    }

    /// Returns the raw stored document, if any.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Persistence`] when the lock is poisoned.
    pub fn raw_document(&self) -> BoardStoreResult<Option<String>> {
        let document = self.document.read().map_err(|err| {
            BoardStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(document.clone())
    }

    /// Replaces the document as another writer would, notifying
    /// subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError`] when encoding fails or the lock is
    /// poisoned.
    pub fn publish_external(&self, snapshot: &BoardSnapshot) -> BoardStoreResult<()> {
        self.write_document(snapshot)
    }

    fn write_document(&self, snapshot: &BoardSnapshot) -> BoardStoreResult<()> {
        let encoded = snapshot.to_json()?;
        {
            let mut document = self.document.write().map_err(|err| {
                BoardStoreError::persistence(std::io::Error::other(err.to_string()))
            })?;
            *document = Some(encoded);
        }
        if self.changes.send(snapshot.clone()).is_err() {
            tracing::trace!("board written with no subscribers");
        }
        Ok(())
    }
}

#[async_trait]
impl BoardStore for InMemoryBoardStore {
    async fn load(&self) -> BoardStoreResult<Option<BoardSnapshot>> {
        let Some(raw) = self.raw_document()? else {
            return Ok(None);
        };
        Ok(BoardSnapshot::from_json(&raw)?)
    }

    async fn save(&self, snapshot: &BoardSnapshot) -> BoardStoreResult<()> {
        self.write_document(snapshot)
    }

    fn subscribe(&self) -> Option<broadcast::Receiver<BoardSnapshot>> {
        Some(self.changes.subscribe())
    }
}
