//! In-memory document store backed by `dashmap` and `tokio` locks.

pub mod matcher;
pub mod store;

pub use store::{MemoryCollection, MemoryCursor, MemoryStore};
