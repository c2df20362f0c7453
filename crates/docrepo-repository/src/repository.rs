//! Facade over the per-verb operations.

use async_trait::async_trait;

use docrepo_core::result::{AppResult, QueryResult};
use docrepo_core::traits::document::Document;
use docrepo_core::traits::repository::Repository;
use docrepo_core::types::filter::Filter;
use docrepo_core::types::find_options::FindOptions;
use docrepo_core::types::patch::UpdatePatch;

use crate::cmd::{CreateRepository, DeleteRepository, UpdateRepository};
use crate::context::RepositoryContext;
use crate::query::{GetAllRepository, GetByFilterRepository, GetByIdRepository};

/// Generic repository for any [`Document`] type.
///
/// Holds no per-call state; one instance may serve concurrent callers.
#[derive(Debug)]
pub struct DocumentRepository<T> {
    create: CreateRepository<T>,
    update: UpdateRepository<T>,
    delete: DeleteRepository<T>,
    get_by_id: GetByIdRepository<T>,
    get_all: GetAllRepository<T>,
    get_by_filter: GetByFilterRepository<T>,
}

impl<T: Document> DocumentRepository<T> {
    pub fn new(ctx: RepositoryContext) -> Self {
        Self {
            create: CreateRepository::new(ctx.clone()),
            update: UpdateRepository::new(ctx.clone()),
            delete: DeleteRepository::new(ctx.clone()),
            get_by_id: GetByIdRepository::new(ctx.clone()),
            get_all: GetAllRepository::new(ctx.clone()),
            get_by_filter: GetByFilterRepository::new(ctx),
        }
    }
}

#[async_trait]
impl<T: Document> Repository<T> for DocumentRepository<T> {
    async fn create(
        &self,
        entity: T,
        database: &str,
        collection: &str,
        actor: &str,
    ) -> AppResult<T> {
        self.create.create(entity, database, collection, actor).await
    }

    async fn update(
        &self,
        entity: T,
        database: &str,
        collection: &str,
        actor: &str,
    ) -> AppResult<T> {
        self.update.update(entity, database, collection, actor).await
    }

    async fn update_fields(
        &self,
        id: &str,
        patch: UpdatePatch,
        database: &str,
        collection: &str,
        actor: &str,
    ) -> AppResult<T> {
        self.update
            .update_fields(id, patch, database, collection, actor)
            .await
    }

    async fn delete(&self, id: &str, database: &str, collection: &str) -> AppResult<T> {
        self.delete.delete(id, database, collection).await
    }

    async fn get_by_id(
        &self,
        id: &str,
        database: &str,
        collection: &str,
        owner: &str,
    ) -> AppResult<T> {
        self.get_by_id
            .get_by_id(id, database, collection, owner)
            .await
    }

    async fn get_all(&self, database: &str, collection: &str, owner: &str) -> QueryResult<T> {
        self.get_all.get_all(database, collection, owner).await
    }

    async fn get_by_filter(
        &self,
        filter: Filter,
        options: FindOptions,
        database: &str,
        collection: &str,
    ) -> QueryResult<T> {
        self.get_by_filter
            .get_by_filter(&filter, &options, database, collection)
            .await
    }
}
