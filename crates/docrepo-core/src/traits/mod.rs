//! Core traits defined in `docrepo-core` and implemented by other crates.

pub mod collection;
pub mod document;
pub mod repository;

pub use collection::{CollectionAccessor, DocumentCollection, DocumentCursor};
pub use document::Document;
pub use repository::Repository;
