//! Update operations.

use std::marker::PhantomData;

use tracing::{debug, error};

use docrepo_core::error::AppError;
use docrepo_core::result::AppResult;
use docrepo_core::traits::document::Document;
use docrepo_core::types::filter::Filter;
use docrepo_core::types::object_id::ObjectId;
use docrepo_core::types::patch::UpdatePatch;
use docrepo_core::types::timestamp::audit_now;

use crate::context::RepositoryContext;
use crate::decode::{decode_entity, parse_id};
use crate::diff;

/// Merges changes into stored documents.
#[derive(Debug)]
pub struct UpdateRepository<T> {
    ctx: RepositoryContext,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Document> UpdateRepository<T> {
    pub fn new(ctx: RepositoryContext) -> Self {
        Self {
            ctx,
            _entity: PhantomData,
        }
    }

    /// Merge-patch the stored document identified by `entity.id()`.
    ///
    /// Fields holding null or an empty string are left untouched in the store.
    /// The creation audit fields are never written.
    pub async fn update(
        &self,
        mut entity: T,
        database: &str,
        collection: &str,
        actor: &str,
    ) -> AppResult<T> {
        entity.set_modified_by(actor);
        entity.set_modified_on(&audit_now());

        let id = parse_id(entity.id())?;
        let patch = diff::partial_update(&entity)?;
        self.apply(id, patch, database, collection).await
    }

    /// Merge an explicit patch into document `id`.
    ///
    /// Unlike [`update`](Self::update), empty strings and nulls in `patch` are
    /// written as given.
    pub async fn update_fields(
        &self,
        id: &str,
        patch: UpdatePatch,
        database: &str,
        collection: &str,
        actor: &str,
    ) -> AppResult<T> {
        let id = parse_id(id)?;
        let patch = diff::writable::<T>(patch)
            .set(T::MODIFIED_BY_FIELD, actor)
            .set(T::MODIFIED_ON_FIELD, audit_now());
        self.apply(id, patch, database, collection).await
    }

    async fn apply(
        &self,
        id: ObjectId,
        patch: UpdatePatch,
        database: &str,
        collection: &str,
    ) -> AppResult<T> {
        let handle = self.ctx.collection(database, collection);
        let updated = self
            .ctx
            .bounded(
                "update",
                handle.find_one_and_update(&Filter::by_id(id), patch.into_fields()),
            )
            .await
            .inspect_err(|e| {
                error!(
                    database,
                    collection,
                    id = %id,
                    error = %e,
                    "Failed to update document"
                );
            })?;

        let Some(document) = updated else {
            return Err(AppError::not_found(format!(
                "No document found with id: {id}"
            )));
        };

        debug!(database, collection, id = %id, "Updated document");
        decode_entity(document)
    }
}
