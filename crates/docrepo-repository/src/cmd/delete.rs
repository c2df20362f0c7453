//! Delete operation.

use std::marker::PhantomData;

use tracing::{debug, error};

use docrepo_core::error::AppError;
use docrepo_core::result::AppResult;
use docrepo_core::traits::document::Document;
use docrepo_core::types::filter::Filter;

use crate::context::RepositoryContext;
use crate::decode::{decode_entity, parse_id};

/// Removes documents by identifier.
#[derive(Debug)]
pub struct DeleteRepository<T> {
    ctx: RepositoryContext,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Document> DeleteRepository<T> {
    pub fn new(ctx: RepositoryContext) -> Self {
        Self {
            ctx,
            _entity: PhantomData,
        }
    }

    /// Remove document `id` and return its last stored image.
    pub async fn delete(&self, id: &str, database: &str, collection: &str) -> AppResult<T> {
        let id = parse_id(id)?;
        let handle = self.ctx.collection(database, collection);

        let removed = self
            .ctx
            .bounded("delete", handle.find_one_and_delete(&Filter::by_id(id)))
            .await
            .inspect_err(|e| {
                error!(
                    database,
                    collection,
                    id = %id,
                    error = %e,
                    "Failed to delete document"
                );
            })?;

        let Some(document) = removed else {
            return Err(AppError::not_found(format!(
                "No document found with id: {id}"
            )));
        };

        debug!(database, collection, id = %id, "Deleted document");
        decode_entity(document)
    }
}
