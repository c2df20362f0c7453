//! In-memory document store.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::RwLock;
use tracing::debug;

use docrepo_core::error::AppError;
use docrepo_core::result::AppResult;
use docrepo_core::traits::collection::{CollectionAccessor, DocumentCollection, DocumentCursor};
use docrepo_core::types::filter::Filter;
use docrepo_core::types::find_options::FindOptions;
use docrepo_core::types::object_id::ObjectId;
use docrepo_core::types::stored::{RawDocument, StoredDocument};

use super::matcher::{compare_documents, matches, set_path};

/// Field name the store reserves for the native identifier.
const ID_KEY: &str = "_id";

/// Process-local document store.
///
/// Cloning is cheap and clones share the same data. Documents are kept in
/// insertion order, which is the order unsorted queries return them in.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Collections keyed by `(database, collection)`.
    collections: Arc<DashMap<(String, String), Arc<MemoryCollection>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a collection with its concrete type, registering it if absent.
    pub fn memory_collection(&self, database: &str, collection: &str) -> Arc<MemoryCollection> {
        self.collections
            .entry((database.to_string(), collection.to_string()))
            .or_insert_with(|| Arc::new(MemoryCollection::new(collection)))
            .value()
            .clone()
    }

    /// Registered collection, if any.
    fn lookup(&self, database: &str, collection: &str) -> Option<Arc<MemoryCollection>> {
        self.collections
            .get(&(database.to_string(), collection.to_string()))
            .map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl CollectionAccessor for MemoryStore {
    fn collection(&self, database: &str, collection: &str) -> Arc<dyn DocumentCollection> {
        Arc::new(CollectionHandle {
            store: self.clone(),
            database: database.to_string(),
            name: collection.to_string(),
        })
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn list_collection_names(&self, database: &str) -> AppResult<Vec<String>> {
        let mut names: Vec<String> = self
            .collections
            .iter()
            .filter(|entry| entry.key().0 == database && entry.value().is_materialized())
            .map(|entry| entry.key().1.clone())
            .collect();
        names.sort();
        Ok(names)
    }

    async fn create_collection(&self, database: &str, collection: &str) -> AppResult<()> {
        let handle = self.memory_collection(database, collection);
        if handle.materialized.swap(true, Ordering::SeqCst) {
            return Err(AppError::persistence(format!(
                "Collection already exists: {database}.{collection}"
            )));
        }
        debug!(database, collection, "Created in-memory collection");
        Ok(())
    }
}

/// A single in-memory collection.
#[derive(Debug)]
pub struct MemoryCollection {
    /// Collection name.
    name: String,
    /// Documents in insertion order.
    documents: RwLock<Vec<StoredDocument>>,
    /// Set once the collection has been created explicitly or written to.
    materialized: AtomicBool,
}

impl MemoryCollection {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            documents: RwLock::new(Vec::new()),
            materialized: AtomicBool::new(false),
        }
    }

    fn is_materialized(&self) -> bool {
        self.materialized.load(Ordering::SeqCst)
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Whether the collection holds no document.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl DocumentCollection for MemoryCollection {
    fn name(&self) -> &str {
        &self.name
    }

    async fn insert_one(&self, mut fields: RawDocument) -> AppResult<ObjectId> {
        fields.remove(ID_KEY);
        let id = ObjectId::new();
        self.documents
            .write()
            .await
            .push(StoredDocument::new(id, fields));
        self.materialized.store(true, Ordering::SeqCst);
        Ok(id)
    }

    async fn find_one(&self, filter: &Filter) -> AppResult<Option<StoredDocument>> {
        let documents = self.documents.read().await;
        Ok(documents.iter().find(|doc| matches(doc, filter)).cloned())
    }

    async fn find_one_and_update(
        &self,
        filter: &Filter,
        set: RawDocument,
    ) -> AppResult<Option<StoredDocument>> {
        if set.contains_key(ID_KEY) {
            return Err(AppError::persistence(format!(
                "Performing an update on the path '{ID_KEY}' would modify the immutable field '{ID_KEY}'"
            )));
        }

        let mut documents = self.documents.write().await;
        let Some(doc) = documents.iter_mut().find(|doc| matches(doc, filter)) else {
            return Ok(None);
        };
        for (path, value) in set {
            set_path(&mut doc.fields, &path, value);
        }
        Ok(Some(doc.clone()))
    }

    async fn find_one_and_delete(&self, filter: &Filter) -> AppResult<Option<StoredDocument>> {
        let mut documents = self.documents.write().await;
        let position = documents.iter().position(|doc| matches(doc, filter));
        Ok(position.map(|index| documents.remove(index)))
    }

    async fn find(
        &self,
        filter: &Filter,
        options: &FindOptions,
    ) -> AppResult<Box<dyn DocumentCursor>> {
        let mut selected: Vec<StoredDocument> = self
            .documents
            .read()
            .await
            .iter()
            .filter(|doc| matches(doc, filter))
            .cloned()
            .collect();

        if !options.sort.is_empty() {
            selected.sort_by(|a, b| compare_documents(a, b, &options.sort));
        }

        let skip = options.skip.unwrap_or(0) as usize;
        let limit = options.limit.map_or(usize::MAX, |l| l as usize);
        let remaining: VecDeque<StoredDocument> =
            selected.into_iter().skip(skip).take(limit).collect();

        Ok(Box::new(MemoryCursor { remaining }))
    }
}

/// Handle returned by [`MemoryStore::collection`].
///
/// The backing collection is looked up on every call. Reads against an
/// unregistered collection see it as empty; only inserts register it.
#[derive(Debug)]
struct CollectionHandle {
    store: MemoryStore,
    database: String,
    name: String,
}

impl CollectionHandle {
    fn existing(&self) -> Option<Arc<MemoryCollection>> {
        self.store.lookup(&self.database, &self.name)
    }
}

#[async_trait]
impl DocumentCollection for CollectionHandle {
    fn name(&self) -> &str {
        &self.name
    }

    async fn insert_one(&self, fields: RawDocument) -> AppResult<ObjectId> {
        self.store
            .memory_collection(&self.database, &self.name)
            .insert_one(fields)
            .await
    }

    async fn find_one(&self, filter: &Filter) -> AppResult<Option<StoredDocument>> {
        match self.existing() {
            Some(coll) => coll.find_one(filter).await,
            None => Ok(None),
        }
    }

    async fn find_one_and_update(
        &self,
        filter: &Filter,
        set: RawDocument,
    ) -> AppResult<Option<StoredDocument>> {
        match self.existing() {
            Some(coll) => coll.find_one_and_update(filter, set).await,
            None => Ok(None),
        }
    }

    async fn find_one_and_delete(&self, filter: &Filter) -> AppResult<Option<StoredDocument>> {
        match self.existing() {
            Some(coll) => coll.find_one_and_delete(filter).await,
            None => Ok(None),
        }
    }

    async fn find(
        &self,
        filter: &Filter,
        options: &FindOptions,
    ) -> AppResult<Box<dyn DocumentCursor>> {
        match self.existing() {
            Some(coll) => coll.find(filter, options).await,
            None => Ok(Box::new(MemoryCursor {
                remaining: VecDeque::new(),
            })),
        }
    }
}

/// Cursor over a snapshot of matching documents.
#[derive(Debug)]
pub struct MemoryCursor {
    remaining: VecDeque<StoredDocument>,
}

#[async_trait]
impl DocumentCursor for MemoryCursor {
    async fn try_next(&mut self) -> AppResult<Option<StoredDocument>> {
        Ok(self.remaining.pop_front())
    }
}
