//! In-memory board store.

mod store;

pub use store::InMemoryBoardStore;
