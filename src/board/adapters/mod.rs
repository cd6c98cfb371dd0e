//! Adapter implementations for the board store port.
//!
//! - [`memory::InMemoryBoardStore`]: in-process document with change
//!   broadcast, used by tests and embedding hosts
//! - [`file::JsonFileBoardStore`]: JSON document on the local filesystem
//! - [`remote::RemoteBoardStore`]: realtime JSON document served over HTTP

pub mod file;
pub mod memory;
pub mod remote;
