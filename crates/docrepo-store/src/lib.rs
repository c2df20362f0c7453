//! # docrepo-store
//!
//! Concrete [`CollectionAccessor`](docrepo_core::traits::CollectionAccessor)
//! backends, connection bootstrap and collection provisioning.
//!
//! - [`memory`]: process-local store for development and tests (feature `memory`)
//! - [`mongo`]: MongoDB driver adapter (feature `mongodb`)

pub mod connection;
#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "mongodb")]
pub mod mongo;
pub mod provision;

pub use connection::StoreConnection;
#[cfg(feature = "memory")]
pub use memory::MemoryStore;
#[cfg(feature = "mongodb")]
pub use mongo::MongoStore;
pub use provision::ensure_collections;
