//! MongoDB collection accessor.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bson::{Bson, Document, doc};
use futures::TryStreamExt;
use mongodb::options::{
    ClientOptions, FindOneAndUpdateOptions, FindOptions as MongoFindOptions, ReturnDocument,
};
use mongodb::{Client, Collection, Cursor};
use tracing::info;

use docrepo_core::config::StoreConfig;
use docrepo_core::error::{AppError, ErrorKind};
use docrepo_core::result::AppResult;
use docrepo_core::traits::collection::{CollectionAccessor, DocumentCollection, DocumentCursor};
use docrepo_core::types::filter::Filter;
use docrepo_core::types::find_options::FindOptions;
use docrepo_core::types::object_id::ObjectId;
use docrepo_core::types::stored::{RawDocument, StoredDocument};

use super::convert::{
    filter_to_bson, from_bson_document, from_bson_oid, sort_to_bson, to_bson_document,
};

fn persistence(message: &str, err: mongodb::error::Error) -> AppError {
    AppError::with_source(ErrorKind::Persistence, format!("{message}: {err}"), err)
}

/// Accessor backed by a MongoDB client.
///
/// The driver pools connections internally; clones share the pool.
#[derive(Debug, Clone)]
pub struct MongoStore {
    client: Client,
}

impl MongoStore {
    /// Build a client from configuration. The driver connects lazily; call
    /// [`CollectionAccessor::ping`] to verify connectivity.
    pub async fn connect(config: &StoreConfig) -> AppResult<Self> {
        let mut options = ClientOptions::parse(config.uri())
            .await
            .map_err(|e| persistence("Failed to parse MongoDB connection string", e))?;

        let timeout = Duration::from_secs(config.connect_timeout_seconds);
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let client = Client::with_options(options)
            .map_err(|e| persistence("Failed to create MongoDB client", e))?;

        info!(host = %config.host, port = config.port, "MongoDB client created");
        Ok(Self { client })
    }

    /// Wrap an existing driver client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CollectionAccessor for MongoStore {
    fn collection(&self, database: &str, collection: &str) -> Arc<dyn DocumentCollection> {
        Arc::new(MongoCollection {
            name: collection.to_string(),
            inner: self.client.database(database).collection::<Document>(collection),
        })
    }

    async fn ping(&self) -> AppResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| persistence("Failed to ping MongoDB", e))?;
        Ok(())
    }

    async fn list_collection_names(&self, database: &str) -> AppResult<Vec<String>> {
        self.client
            .database(database)
            .list_collection_names(None)
            .await
            .map_err(|e| persistence(&format!("Failed to list collections in DB {database}"), e))
    }

    async fn create_collection(&self, database: &str, collection: &str) -> AppResult<()> {
        self.client
            .database(database)
            .create_collection(collection, None)
            .await
            .map_err(|e| persistence(&format!("Failed to create collection {collection}"), e))
    }
}

/// A MongoDB collection holding untyped documents.
#[derive(Debug, Clone)]
pub struct MongoCollection {
    name: String,
    inner: Collection<Document>,
}

#[async_trait]
impl DocumentCollection for MongoCollection {
    fn name(&self) -> &str {
        &self.name
    }

    async fn insert_one(&self, fields: RawDocument) -> AppResult<ObjectId> {
        let document = to_bson_document(&fields)?;
        let result = self
            .inner
            .insert_one(document, None)
            .await
            .map_err(|e| persistence("Failed to insert document", e))?;

        match result.inserted_id {
            Bson::ObjectId(oid) => Ok(from_bson_oid(oid)),
            other => Err(AppError::decode(format!(
                "Store assigned a non-ObjectId identifier: {other}"
            ))),
        }
    }

    async fn find_one(&self, filter: &Filter) -> AppResult<Option<StoredDocument>> {
        let query = filter_to_bson(filter)?;
        self.inner
            .find_one(query, None)
            .await
            .map_err(|e| persistence("Failed to find document", e))?
            .map(from_bson_document)
            .transpose()
    }

    async fn find_one_and_update(
        &self,
        filter: &Filter,
        set: RawDocument,
    ) -> AppResult<Option<StoredDocument>> {
        let query = filter_to_bson(filter)?;
        let update = doc! { "$set": to_bson_document(&set)? };

        let mut options = FindOneAndUpdateOptions::default();
        options.return_document = Some(ReturnDocument::After);

        self.inner
            .find_one_and_update(query, update, options)
            .await
            .map_err(|e| persistence("Failed to update document", e))?
            .map(from_bson_document)
            .transpose()
    }

    async fn find_one_and_delete(&self, filter: &Filter) -> AppResult<Option<StoredDocument>> {
        let query = filter_to_bson(filter)?;
        self.inner
            .find_one_and_delete(query, None)
            .await
            .map_err(|e| persistence("Failed to delete document", e))?
            .map(from_bson_document)
            .transpose()
    }

    async fn find(
        &self,
        filter: &Filter,
        options: &FindOptions,
    ) -> AppResult<Box<dyn DocumentCursor>> {
        let query = filter_to_bson(filter)?;

        let mut find_options = MongoFindOptions::default();
        if !options.sort.is_empty() {
            find_options.sort = Some(sort_to_bson(&options.sort));
        }
        find_options.skip = options.skip;
        find_options.limit = options.limit.map(|l| l.min(i64::MAX as u64) as i64);

        let cursor = self
            .inner
            .find(query, find_options)
            .await
            .map_err(|e| persistence("Failed to query documents", e))?;
        Ok(Box::new(MongoCursor { inner: cursor }))
    }
}

/// Cursor over raw MongoDB documents.
pub struct MongoCursor {
    inner: Cursor<Document>,
}

#[async_trait]
impl DocumentCursor for MongoCursor {
    async fn try_next(&mut self) -> AppResult<Option<StoredDocument>> {
        match self.inner.try_next().await {
            Ok(Some(document)) => from_bson_document(document).map(Some),
            Ok(None) => Ok(None),
            Err(e) => Err(persistence("MongoDB cursor failed", e)),
        }
    }
}
