//! Entity and store doubles shared by the unit tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use docrepo_core::error::AppError;
use docrepo_core::result::AppResult;
use docrepo_core::traits::collection::{CollectionAccessor, DocumentCollection, DocumentCursor};
use docrepo_core::types::filter::Filter;
use docrepo_core::types::find_options::FindOptions;
use docrepo_core::types::object_id::ObjectId;
use docrepo_core::types::stored::{RawDocument, StoredDocument};
use docrepo_entity::{DmlModel, impl_document};
use docrepo_store::MemoryStore;

use crate::context::RepositoryContext;

pub const DB: &str = "app";
pub const PEOPLE: &str = "people";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(flatten)]
    pub base: DmlModel,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub age: Option<u32>,
}

impl_document!(Person, base);

impl Person {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = tag.to_string();
        self
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }
}

pub fn memory_context() -> (MemoryStore, RepositoryContext) {
    let store = MemoryStore::new();
    let ctx = RepositoryContext::new(Arc::new(store.clone()), Duration::from_secs(5));
    (store, ctx)
}

/// Accessor that counts every collection call before delegating.
#[derive(Debug, Clone, Default)]
pub struct CountingAccessor {
    inner: MemoryStore,
    calls: Arc<AtomicUsize>,
}

impl CountingAccessor {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn context(&self) -> RepositoryContext {
        RepositoryContext::new(Arc::new(self.clone()), Duration::from_secs(5))
    }
}

#[async_trait]
impl CollectionAccessor for CountingAccessor {
    fn collection(&self, database: &str, collection: &str) -> Arc<dyn DocumentCollection> {
        Arc::new(CountingCollection {
            inner: self.inner.collection(database, collection),
            calls: Arc::clone(&self.calls),
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

struct CountingCollection {
    inner: Arc<dyn DocumentCollection>,
    calls: Arc<AtomicUsize>,
}

impl CountingCollection {
    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentCollection for CountingCollection {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn insert_one(&self, fields: RawDocument) -> AppResult<ObjectId> {
        self.tick();
        self.inner.insert_one(fields).await
    }

    async fn find_one(&self, filter: &Filter) -> AppResult<Option<StoredDocument>> {
        self.tick();
        self.inner.find_one(filter).await
    }

    async fn find_one_and_update(
        &self,
        filter: &Filter,
        set: RawDocument,
    ) -> AppResult<Option<StoredDocument>> {
        self.tick();
        self.inner.find_one_and_update(filter, set).await
    }

    async fn find_one_and_delete(&self, filter: &Filter) -> AppResult<Option<StoredDocument>> {
        self.tick();
        self.inner.find_one_and_delete(filter).await
    }

    async fn find(
        &self,
        filter: &Filter,
        options: &FindOptions,
    ) -> AppResult<Box<dyn DocumentCursor>> {
        self.tick();
        self.inner.find(filter, options).await
    }
}

/// One scripted step of a [`ScriptedCursor`].
#[derive(Debug, Clone)]
pub enum Step {
    Yield(StoredDocument),
    Fail(AppError),
    Stall,
}

/// Accessor whose single collection replays scripted behaviour.
///
/// Writes and point reads stall forever; `find` returns a cursor over the script.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAccessor {
    script: Vec<Step>,
}

impl ScriptedAccessor {
    pub fn new(script: Vec<Step>) -> Self {
        Self { script }
    }

    pub fn context(&self, timeout: Duration) -> RepositoryContext {
        RepositoryContext::new(Arc::new(self.clone()), timeout)
    }
}

#[async_trait]
impl CollectionAccessor for ScriptedAccessor {
    fn collection(&self, _database: &str, _collection: &str) -> Arc<dyn DocumentCollection> {
        Arc::new(ScriptedCollection {
            script: self.script.clone(),
        })
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn list_collection_names(&self, _database: &str) -> AppResult<Vec<String>> {
        Ok(Vec::new())
    }

    async fn create_collection(&self, _database: &str, _collection: &str) -> AppResult<()> {
        Ok(())
    }
}

struct ScriptedCollection {
    script: Vec<Step>,
}

async fn stall<T>() -> AppResult<T> {
    tokio::time::sleep(Duration::from_secs(3600)).await;
    Err(AppError::internal("stall finished"))
}

#[async_trait]
impl DocumentCollection for ScriptedCollection {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn insert_one(&self, _fields: RawDocument) -> AppResult<ObjectId> {
        stall().await
    }

    async fn find_one(&self, _filter: &Filter) -> AppResult<Option<StoredDocument>> {
        stall().await
    }

    async fn find_one_and_update(
        &self,
        _filter: &Filter,
        _set: RawDocument,
    ) -> AppResult<Option<StoredDocument>> {
        stall().await
    }

    async fn find_one_and_delete(&self, _filter: &Filter) -> AppResult<Option<StoredDocument>> {
        stall().await
    }

    async fn find(
        &self,
        _filter: &Filter,
        _options: &FindOptions,
    ) -> AppResult<Box<dyn DocumentCursor>> {
        Ok(Box::new(ScriptedCursor {
            steps: self.script.clone().into(),
        }))
    }
}

struct ScriptedCursor {
    steps: VecDeque<Step>,
}

#[async_trait]
impl DocumentCursor for ScriptedCursor {
    async fn try_next(&mut self) -> AppResult<Option<StoredDocument>> {
        match self.steps.pop_front() {
            None => Ok(None),
            Some(Step::Yield(doc)) => Ok(Some(doc)),
            Some(Step::Fail(err)) => Err(err),
            Some(Step::Stall) => stall().await,
        }
    }
}

pub fn stored(value: serde_json::Value) -> StoredDocument {
    match value {
        serde_json::Value::Object(fields) => StoredDocument::new(ObjectId::new(), fields),
        _ => panic!("stored document must be an object"),
    }
}
