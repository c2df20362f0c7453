//! Owner-scoped point read.

use std::marker::PhantomData;

use tracing::error;

use docrepo_core::error::AppError;
use docrepo_core::result::AppResult;
use docrepo_core::traits::document::Document;
use docrepo_core::types::filter::Filter;

use crate::context::RepositoryContext;
use crate::decode::{decode_entity, parse_id};

/// Fetches a single document owned by the caller.
#[derive(Debug)]
pub struct GetByIdRepository<T> {
    ctx: RepositoryContext,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Document> GetByIdRepository<T> {
    pub fn new(ctx: RepositoryContext) -> Self {
        Self {
            ctx,
            _entity: PhantomData,
        }
    }

    /// Fetch document `id` if its owner field equals `owner`.
    ///
    /// A document owned by someone else is indistinguishable from a missing one.
    pub async fn get_by_id(
        &self,
        id: &str,
        database: &str,
        collection: &str,
        owner: &str,
    ) -> AppResult<T> {
        let oid = parse_id(id)?;
        let filter = Filter::by_id(oid).and_eq(T::OWNER_FIELD, owner);
        let handle = self.ctx.collection(database, collection);

        let found = self
            .ctx
            .bounded("get_by_id", handle.find_one(&filter))
            .await
            .inspect_err(|e| {
                error!(
                    database,
                    collection,
                    id,
                    error = %e,
                    "Failed to fetch document"
                );
            })?;

        let Some(document) = found else {
            return Err(AppError::not_found(format!(
                "No document found with id: {id}"
            )));
        };

        let mut entity: T = decode_entity(document)?;
        entity.set_id(id.to_string());
        Ok(entity)
    }
}
