//! Caller-filtered bulk read.

use std::marker::PhantomData;

use docrepo_core::result::QueryResult;
use docrepo_core::traits::document::Document;
use docrepo_core::types::filter::Filter;
use docrepo_core::types::find_options::FindOptions;

use crate::context::RepositoryContext;
use crate::query::get_all::collect_documents;

/// Lists documents matching an arbitrary filter.
///
/// No owner scoping is applied; callers add an owner condition themselves
/// when they need one.
#[derive(Debug)]
pub struct GetByFilterRepository<T> {
    ctx: RepositoryContext,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Document> GetByFilterRepository<T> {
    pub fn new(ctx: RepositoryContext) -> Self {
        Self {
            ctx,
            _entity: PhantomData,
        }
    }

    pub async fn get_by_filter(
        &self,
        filter: &Filter,
        options: &FindOptions,
        database: &str,
        collection: &str,
    ) -> QueryResult<T> {
        collect_documents(&self.ctx, "get_by_filter", database, collection, filter, options).await
    }
}
