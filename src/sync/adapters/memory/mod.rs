//! In-memory adapters backed by a shared task map.

pub mod fixtures;
mod store;

pub use store::InMemoryTaskStore;
