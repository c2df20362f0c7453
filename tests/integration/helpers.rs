//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use docrepo_core::config::AppConfig;
use docrepo_core::error::AppError;
use docrepo_core::result::AppResult;
use docrepo_core::traits::collection::{CollectionAccessor, DocumentCollection, DocumentCursor};
use docrepo_core::types::filter::Filter;
use docrepo_core::types::find_options::FindOptions;
use docrepo_core::types::object_id::ObjectId;
use docrepo_core::types::stored::{RawDocument, StoredDocument};
use docrepo_entity::{DmlModel, impl_document};
use docrepo_repository::{DocumentRepository, RepositoryContext};
use docrepo_store::MemoryStore;

pub const DB: &str = "crm";
pub const CUSTOMERS: &str = "customers";

const TEST_CONFIG: &str = r#"
[store]
backend = "memory"
database = "crm"

[repository]
operation_timeout_seconds = 3
"#;

/// Postal address embedded in a customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub zip: String,
}

/// Entity used across the integration tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(flatten)]
    pub base: DmlModel,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub tier: String,
    #[serde(default)]
    pub credit_limit: Option<i64>,
    #[serde(default)]
    pub address: Option<Address>,
}

impl_document!(Customer, base);

impl Customer {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            ..Self::default()
        }
    }

    pub fn tier(mut self, tier: &str) -> Self {
        self.tier = tier.to_string();
        self
    }

    pub fn credit_limit(mut self, limit: i64) -> Self {
        self.credit_limit = Some(limit);
        self
    }

    pub fn city(mut self, city: &str) -> Self {
        self.address = Some(Address {
            city: city.to_string(),
            zip: String::new(),
        });
        self
    }

    /// A change request carrying only an identifier and the given name.
    pub fn renamed(id: &str, name: &str) -> Self {
        Self {
            base: DmlModel::with_id(id),
            name: name.to_string(),
            ..Self::default()
        }
    }
}

/// Test application context
pub struct TestApp {
    /// Backing store for direct inspection
    pub store: MemoryStore,
    /// Accessor wrapper counting collection resolutions
    pub accessor: Arc<CountingAccessor>,
    /// Repository under test
    pub repo: DocumentRepository<Customer>,
}

impl TestApp {
    /// Create a new test application over an empty in-memory store
    pub fn new() -> Self {
        let config = AppConfig::from_toml(TEST_CONFIG).expect("Failed to parse test config");
        let store = MemoryStore::new();
        let accessor = Arc::new(CountingAccessor::new(Arc::new(store.clone())));
        let ctx = RepositoryContext::from_config(accessor.clone(), &config.repository);
        assert_eq!(ctx.timeout().as_secs(), 3);
        Self {
            store,
            accessor,
            repo: DocumentRepository::new(ctx),
        }
    }

    /// Number of collection handles the repository resolved
    pub fn store_calls(&self) -> usize {
        self.accessor.resolutions()
    }

    /// Insert a raw document behind the repository's back
    pub async fn insert_raw(&self, value: Value) -> ObjectId {
        let Value::Object(fields) = value else {
            panic!("raw document must be an object");
        };
        self.store
            .collection(DB, CUSTOMERS)
            .insert_one(fields)
            .await
            .expect("raw insert failed")
    }

    /// Fetch a raw document by id
    pub async fn raw(&self, id: &str) -> Option<StoredDocument> {
        let id = ObjectId::parse_str(id).expect("valid id");
        self.store
            .collection(DB, CUSTOMERS)
            .find_one(&Filter::by_id(id))
            .await
            .expect("raw read failed")
    }
}

/// Accessor wrapper that counts how often a collection handle is resolved.
#[derive(Debug)]
pub struct CountingAccessor {
    inner: Arc<dyn CollectionAccessor>,
    resolutions: AtomicUsize,
}

impl CountingAccessor {
    pub fn new(inner: Arc<dyn CollectionAccessor>) -> Self {
        Self {
            inner,
            resolutions: AtomicUsize::new(0),
        }
    }

    pub fn resolutions(&self) -> usize {
        self.resolutions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CollectionAccessor for CountingAccessor {
    fn collection(&self, database: &str, collection: &str) -> Arc<dyn DocumentCollection> {
        self.resolutions.fetch_add(1, Ordering::SeqCst);
        self.inner.collection(database, collection)
    }

    async fn ping(&self) -> AppResult<()> {
        self.inner.ping().await
    }

    async fn list_collection_names(&self, database: &str) -> AppResult<Vec<String>> {
        self.inner.list_collection_names(database).await
    }

    async fn create_collection(&self, database: &str, collection: &str) -> AppResult<()> {
        self.inner.create_collection(database, collection).await
    }
}

/// Accessor whose query cursors fail after yielding a fixed number of
/// documents. Everything else is delegated.
#[derive(Debug)]
pub struct FlakyCursorAccessor {
    inner: MemoryStore,
    fail_after: usize,
}

impl FlakyCursorAccessor {
    pub fn new(inner: MemoryStore, fail_after: usize) -> Self {
        Self { inner, fail_after }
    }
}

#[async_trait]
impl CollectionAccessor for FlakyCursorAccessor {
    fn collection(&self, database: &str, collection: &str) -> Arc<dyn DocumentCollection> {
        Arc::new(FlakyCollection {
            inner: self.inner.collection(database, collection),
            fail_after: self.fail_after,
        })
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn list_collection_names(&self, database: &str) -> AppResult<Vec<String>> {
        self.inner.list_collection_names(database).await
    }

    async fn create_collection(&self, database: &str, collection: &str) -> AppResult<()> {
        self.inner.create_collection(database, collection).await
    }
}

struct FlakyCollection {
    inner: Arc<dyn DocumentCollection>,
    fail_after: usize,
}

#[async_trait]
impl DocumentCollection for FlakyCollection {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn insert_one(&self, fields: RawDocument) -> AppResult<ObjectId> {
        self.inner.insert_one(fields).await
    }

    async fn find_one(&self, filter: &Filter) -> AppResult<Option<StoredDocument>> {
        self.inner.find_one(filter).await
    }

    async fn find_one_and_update(
        &self,
        filter: &Filter,
        set: RawDocument,
    ) -> AppResult<Option<StoredDocument>> {
        self.inner.find_one_and_update(filter, set).await
    }

    async fn find_one_and_delete(&self, filter: &Filter) -> AppResult<Option<StoredDocument>> {
        self.inner.find_one_and_delete(filter).await
    }

    async fn find(
        &self,
        filter: &Filter,
        options: &FindOptions,
    ) -> AppResult<Box<dyn DocumentCursor>> {
        Ok(Box::new(FlakyCursor {
            inner: self.inner.find(filter, options).await?,
            remaining: self.fail_after,
        }))
    }
}

struct FlakyCursor {
    inner: Box<dyn DocumentCursor>,
    remaining: usize,
}

#[async_trait]
impl DocumentCursor for FlakyCursor {
    async fn try_next(&mut self) -> AppResult<Option<StoredDocument>> {
        if self.remaining == 0 {
            return Err(AppError::persistence("connection reset by peer"));
        }
        self.remaining -= 1;
        self.inner.try_next().await
    }
}
