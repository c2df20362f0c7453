//! Owner-scoped bulk read and the shared cursor drain.

use std::marker::PhantomData;

use tokio::time::timeout_at;
use tracing::{debug, error, warn};

use docrepo_core::error::{AppError, QueryFailure};
use docrepo_core::result::QueryResult;
use docrepo_core::traits::document::Document;
use docrepo_core::types::filter::Filter;
use docrepo_core::types::find_options::FindOptions;

use crate::context::RepositoryContext;
use crate::decode::decode_entity;

/// Lists every document owned by the caller.
#[derive(Debug)]
pub struct GetAllRepository<T> {
    ctx: RepositoryContext,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Document> GetAllRepository<T> {
    pub fn new(ctx: RepositoryContext) -> Self {
        Self {
            ctx,
            _entity: PhantomData,
        }
    }

    /// Fetch every document whose owner field equals `owner`, in store order.
    ///
    /// Documents that fail to decode are logged and skipped. A cursor failure
    /// ends the read and carries the entities decoded so far.
    pub async fn get_all(&self, database: &str, collection: &str, owner: &str) -> QueryResult<T> {
        let filter = Filter::owned_by(T::OWNER_FIELD, owner);
        collect_documents(
            &self.ctx,
            "get_all",
            database,
            collection,
            &filter,
            &FindOptions::default(),
        )
        .await
    }
}

/// Run `filter` and drain the cursor into entities.
///
/// The whole drain, query included, shares one deadline.
pub(crate) async fn collect_documents<T: Document>(
    ctx: &RepositoryContext,
    operation: &'static str,
    database: &str,
    collection: &str,
    filter: &Filter,
    options: &FindOptions,
) -> QueryResult<T> {
    let deadline = ctx.deadline();
    let handle = ctx.collection(database, collection);

    let mut cursor = match timeout_at(deadline, handle.find(filter, options)).await {
        Ok(Ok(cursor)) => cursor,
        Ok(Err(e)) => {
            error!(operation, database, collection, error = %e, "Failed to query documents");
            return Err(QueryFailure::empty(e));
        }
        Err(_) => return Err(QueryFailure::empty(AppError::deadline_exceeded(operation))),
    };

    let mut results = Vec::new();
    let mut skipped = 0usize;
    loop {
        let next = match timeout_at(deadline, cursor.try_next()).await {
            Ok(next) => next,
            Err(_) => {
                warn!(
                    operation,
                    database,
                    collection,
                    read = results.len(),
                    "Query deadline exceeded while reading documents"
                );
                return Err(QueryFailure {
                    partial: results,
                    error: AppError::deadline_exceeded(operation),
                });
            }
        };

        let document = match next {
            Ok(Some(document)) => document,
            Ok(None) => break,
            Err(e) if e.is_decode() => {
                warn!(operation, database, collection, error = %e, "Skipping undecodable document");
                skipped += 1;
                continue;
            }
            Err(e) => {
                error!(
                    operation,
                    database,
                    collection,
                    read = results.len(),
                    error = %e,
                    "Cursor failed while reading documents"
                );
                return Err(QueryFailure {
                    partial: results,
                    error: e,
                });
            }
        };

        match decode_entity::<T>(document) {
            Ok(entity) => results.push(entity),
            Err(e) => {
                warn!(operation, database, collection, error = %e, "Skipping undecodable document");
                skipped += 1;
            }
        }
    }

    debug!(
        operation,
        database,
        collection,
        count = results.len(),
        skipped,
        "Query completed"
    );
    Ok(results)
}
