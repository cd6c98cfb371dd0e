//! Board store backed by a realtime JSON document database.

use async_trait::async_trait;
use futures_util::StreamExt;
use serde::Deserialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::broadcast;

use super::sse::{SseEvent, SseLineParser};
use crate::board::{
    domain::BoardSnapshot,
    ports::{BoardStore, BoardStoreError, BoardStoreResult},
};

const CHANNEL_CAPACITY: usize = 16;
const RECONNECT_DELAY: Duration = Duration::from_secs(5);
const MAX_ERROR_BODY: usize = 512;

/// Connection settings for the remote document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteStoreConfig {
    database_url: String,
    document_path: String,
    auth_token: Option<String>,
}

impl RemoteStoreConfig {
    /// Document path used when none is configured.
    pub const DEFAULT_DOCUMENT_PATH: &'static str = "tarefas-app";

    /// Creates settings for the default document under `database_url`.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            document_path: Self::DEFAULT_DOCUMENT_PATH.to_owned(),
            auth_token: None,
        }
    }

    /// Sets the document path.
    #[must_use]
    pub fn with_document_path(mut self, document_path: impl Into<String>) -> Self {
        self.document_path = document_path.into();
        self
    }

    /// Sets the auth token sent as the `auth` query parameter.
    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Returns the REST URL of the document.
    #[must_use]
    pub fn document_url(&self) -> String {
        format!(
            "{}/{}.json",
            self.database_url.trim_end_matches('/'),
            self.document_path.trim_matches('/')
        )
    }
}

/// Remote board store with a live change stream.
#[derive(Debug, Clone)]
pub struct RemoteBoardStore {
    client: reqwest::Client,
    config: RemoteStoreConfig,
    changes: broadcast::Sender<BoardSnapshot>,
    watching: Arc<AtomicBool>,
}

#[derive(Debug, Deserialize)]
struct StreamPayload {
    path: String,
    #[serde(default)]
    data: serde_json::Value,
}

impl RemoteBoardStore {
    /// Creates a store using a default HTTP client.
    #[must_use]
    pub fn new(config: RemoteStoreConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Creates a store using the given HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: RemoteStoreConfig) -> Self {
        let (changes, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            client,
            config,
            changes,
            watching: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns the connection settings.
    #[must_use]
    pub const fn config(&self) -> &RemoteStoreConfig {
        &self.config
    }

    fn request(&self, method: reqwest::Method) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, self.config.document_url());
        match &self.config.auth_token {
            Some(token) => builder.query(&[("auth", token)]),
            None => builder,
        }
    }

    /// Follows the change stream until it ends, fails or loses its last
    /// subscriber.
    async fn stream_changes(&self) -> BoardStoreResult<()> {
        let sent = self
            .request(reqwest::Method::GET)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .send()
            .await
            .map_err(BoardStoreError::persistence)?;
        let response = ensure_success(sent).await?;
        tracing::debug!(url = %self.config.document_url(), "board change stream opened");

        let mut bytes = response.bytes_stream();
        let mut parser = SseLineParser::new();
        while let Some(next) = bytes.next().await {
            let chunk = next.map_err(BoardStoreError::persistence)?;
            for event in parser.push(&chunk) {
                if let Some(snapshot) = self.snapshot_for_event(&event).await?
                    && self.changes.send(snapshot).is_err()
                {
                    tracing::trace!("remote board change with no subscribers");
                }
            }
            if self.changes.receiver_count() == 0 {
                return Ok(());
            }
        }
        Ok(())
    }

    /// Resolves a stream event into the full document it leaves behind.
    async fn snapshot_for_event(
        &self,
        event: &SseEvent,
    ) -> BoardStoreResult<Option<BoardSnapshot>> {
        match event.event_type.as_deref() {
            Some(kind @ ("put" | "patch")) => {
                let payload: StreamPayload = serde_json::from_str(&event.data)?;
                if kind == "put" && payload.path == "/" {
                    let snapshot: Option<BoardSnapshot> = serde_json::from_value(payload.data)?;
                    return Ok(Some(snapshot.unwrap_or_default()));
                }
                // Partial changes are resolved by refetching the whole document.
                Ok(Some(self.load().await?.unwrap_or_default()))
            }
            Some(kind @ ("cancel" | "auth_revoked")) => Err(BoardStoreError::Rejected {
                status: 401,
                body: format!("change stream {kind}: {}", event.data),
            }),
            _ => Ok(None),
        }
    }

    async fn watch_loop(self) {
        loop {
            match self.stream_changes().await {
                Ok(()) => tracing::debug!("board change stream ended"),
                Err(err) => tracing::warn!(error = %err, "board change stream failed"),
            }
            if self.changes.receiver_count() == 0 {
                break;
            }
            tokio::time::sleep(RECONNECT_DELAY).await;
        }
        self.watching.store(false, Ordering::SeqCst);
        tracing::debug!("board change stream stopped, no subscribers left");
    }
}

async fn ensure_success(response: reqwest::Response) -> BoardStoreResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let full_body = response
        .text()
        .await
        .unwrap_or_else(|_| "failed to read body".to_owned());
    let body: String = full_body.chars().take(MAX_ERROR_BODY).collect();
    Err(BoardStoreError::Rejected {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl BoardStore for RemoteBoardStore {
    async fn load(&self) -> BoardStoreResult<Option<BoardSnapshot>> {
        let sent = self
            .request(reqwest::Method::GET)
            .send()
            .await
            .map_err(BoardStoreError::persistence)?;
        let response = ensure_success(sent).await?;
        let raw = response.text().await.map_err(BoardStoreError::persistence)?;
        Ok(BoardSnapshot::from_json(&raw)?)
    }

    async fn save(&self, snapshot: &BoardSnapshot) -> BoardStoreResult<()> {
        let response = self
            .request(reqwest::Method::PUT)
            .json(snapshot)
            .send()
            .await
            .map_err(BoardStoreError::persistence)?;
        ensure_success(response).await?;
        Ok(())
    }

    /// Starts the change stream on first use. Must be called from within a
    /// Tokio runtime; otherwise no stream is started and `None` is returned.
    fn subscribe(&self) -> Option<broadcast::Receiver<BoardSnapshot>> {
        let receiver = self.changes.subscribe();
        if !self.watching.swap(true, Ordering::SeqCst) {
            let Ok(handle) = tokio::runtime::Handle::try_current() else {
                self.watching.store(false, Ordering::SeqCst);
                tracing::warn!("board change stream needs a Tokio runtime");
                return None;
            };
            handle.spawn(self.clone().watch_loop());
        }
        Some(receiver)
    }
}
