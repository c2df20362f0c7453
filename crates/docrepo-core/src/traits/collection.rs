//! Collection accessor trait for pluggable document store backends.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::filter::Filter;
use crate::types::find_options::FindOptions;
use crate::types::object_id::ObjectId;
use crate::types::stored::{RawDocument, StoredDocument};

/// Resolves `(database, collection)` pairs to executable handles.
///
/// Implementations wrap an already connected store and are constructed once
/// at startup, then shared behind an `Arc`. They must be safe for concurrent
/// use; the repository layer performs no locking of its own.
#[async_trait]
pub trait CollectionAccessor: Send + Sync + Debug + 'static {
    /// Obtain a handle to a named collection within a named database.
    fn collection(&self, database: &str, collection: &str) -> Arc<dyn DocumentCollection>;

    /// Verify that the store is reachable.
    async fn ping(&self) -> AppResult<()>;

    /// List the collections that exist in a database.
    async fn list_collection_names(&self, database: &str) -> AppResult<Vec<String>>;

    /// Create an empty collection.
    async fn create_collection(&self, database: &str, collection: &str) -> AppResult<()>;
}

/// Operations against a single collection.
///
/// Each call is one round trip. Single-document writes are atomic; a failed
/// insert leaves no partial document.
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    /// Collection name, for logging.
    fn name(&self) -> &str;

    /// Insert a new document and return the identifier the store assigned.
    async fn insert_one(&self, fields: RawDocument) -> AppResult<ObjectId>;

    /// Return the first document matching `filter`.
    async fn find_one(&self, filter: &Filter) -> AppResult<Option<StoredDocument>>;

    /// Overwrite the named fields of the first document matching `filter`
    /// and return its post-update image, atomically.
    async fn find_one_and_update(
        &self,
        filter: &Filter,
        set: RawDocument,
    ) -> AppResult<Option<StoredDocument>>;

    /// Remove the first document matching `filter` and return its pre-removal image.
    async fn find_one_and_delete(&self, filter: &Filter) -> AppResult<Option<StoredDocument>>;

    /// Open a cursor over every document matching `filter`.
    async fn find(
        &self,
        filter: &Filter,
        options: &FindOptions,
    ) -> AppResult<Box<dyn DocumentCursor>>;
}

/// Lazy cursor over query results.
#[async_trait]
pub trait DocumentCursor: Send {
    /// Pull the next document.
    ///
    /// `Ok(None)` marks exhaustion. An error of kind `Decode` concerns only the
    /// current document and the cursor may be pulled again; any other error
    /// is a cursor-level failure.
    async fn try_next(&mut self) -> AppResult<Option<StoredDocument>>;
}
