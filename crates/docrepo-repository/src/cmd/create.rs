//! Create operation.

use std::marker::PhantomData;

use tracing::{debug, error};

use docrepo_core::result::AppResult;
use docrepo_core::traits::document::Document;
use docrepo_core::types::timestamp::audit_now;

use crate::context::RepositoryContext;
use crate::decode::encode_entity;

/// Inserts new documents.
#[derive(Debug)]
pub struct CreateRepository<T> {
    ctx: RepositoryContext,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Document> CreateRepository<T> {
    /// Create the operation over a shared context.
    pub fn new(ctx: RepositoryContext) -> Self {
        Self {
            ctx,
            _entity: PhantomData,
        }
    }

    /// Stamp all four audit fields with `actor` and the current time, insert
    /// the entity, and return it carrying the identifier the store assigned.
    ///
    /// A failed insert is reported as-is and never reissued.
    pub async fn create(
        &self,
        mut entity: T,
        database: &str,
        collection: &str,
        actor: &str,
    ) -> AppResult<T> {
        let now = audit_now();
        entity.set_created_by(actor);
        entity.set_created_on(&now);
        entity.set_modified_by(actor);
        entity.set_modified_on(&now);

        let fields = encode_entity(&entity)?;
        let handle = self.ctx.collection(database, collection);
        let id = self
            .ctx
            .bounded("create", handle.insert_one(fields))
            .await
            .inspect_err(|e| {
                error!(
                    database,
                    collection,
                    error = %e,
                    "Failed to insert data in collection"
                );
            })?;

        entity.set_id(id.to_hex());
        debug!(database, collection, id = %id, "Created document");
        Ok(entity)
    }
}
