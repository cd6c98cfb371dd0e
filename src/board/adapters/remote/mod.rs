//! Realtime remote board store.
//!
//! Talks to a JSON document database over its REST interface: `GET` and
//! `PUT` on `<database_url>/<document_path>.json`, and a server-sent event
//! stream on the same URL for live changes.

mod sse;
mod store;

pub use store::{RemoteBoardStore, RemoteStoreConfig};
