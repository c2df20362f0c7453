//! Generic repository trait over the document capability contract.

use async_trait::async_trait;

use crate::result::{AppResult, QueryResult};
use crate::traits::document::Document;
use crate::types::filter::Filter;
use crate::types::find_options::FindOptions;
use crate::types::patch::UpdatePatch;

/// Generic CRUD repository trait.
///
/// One implementation serves every entity type; callers name the database
/// and collection on each call and pass the acting user's identity as a
/// plain string.
#[async_trait]
pub trait Repository<T: Document>: Send + Sync + 'static {
    /// Stamp audit fields, insert `entity` and return it with its assigned id.
    async fn create(
        &self,
        entity: T,
        database: &str,
        collection: &str,
        actor: &str,
    ) -> AppResult<T>;

    /// Merge the non-empty fields of `entity` into the stored document with
    /// the same id and return the post-update image.
    async fn update(
        &self,
        entity: T,
        database: &str,
        collection: &str,
        actor: &str,
    ) -> AppResult<T>;

    /// Merge an explicit patch into the stored document `id` and return the
    /// post-update image.
    async fn update_fields(
        &self,
        id: &str,
        patch: UpdatePatch,
        database: &str,
        collection: &str,
        actor: &str,
    ) -> AppResult<T>;

    /// Remove the document `id` and return its pre-removal image.
    async fn delete(&self, id: &str, database: &str, collection: &str) -> AppResult<T>;

    /// Fetch the document `id` owned by `owner`.
    async fn get_by_id(
        &self,
        id: &str,
        database: &str,
        collection: &str,
        owner: &str,
    ) -> AppResult<T>;

    /// Fetch every document owned by `owner`.
    async fn get_all(&self, database: &str, collection: &str, owner: &str) -> QueryResult<T>;

    /// Fetch every document matching `filter`.
    async fn get_by_filter(
        &self,
        filter: Filter,
        options: FindOptions,
        database: &str,
        collection: &str,
    ) -> QueryResult<T>;
}
