//! Local JSON file board store.

mod blocking;
mod store;

pub use store::JsonFileBoardStore;
