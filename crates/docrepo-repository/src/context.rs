//! Shared execution context for repository operations.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use docrepo_core::config::RepositoryConfig;
use docrepo_core::error::AppError;
use docrepo_core::result::AppResult;
use docrepo_core::traits::collection::{CollectionAccessor, DocumentCollection};

/// The store handle and per-call bound every operation runs with.
#[derive(Debug, Clone)]
pub struct RepositoryContext {
    /// Shared collection accessor.
    accessor: Arc<dyn CollectionAccessor>,
    /// Upper bound for one store call.
    timeout: Duration,
}

impl RepositoryContext {
    /// Create a context with an explicit bound.
    pub fn new(accessor: Arc<dyn CollectionAccessor>, timeout: Duration) -> Self {
        Self { accessor, timeout }
    }

    /// Create a context from configuration.
    pub fn from_config(accessor: Arc<dyn CollectionAccessor>, config: &RepositoryConfig) -> Self {
        Self::new(accessor, config.operation_timeout())
    }

    /// The per-call bound.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The instant by which a call started now must finish.
    pub fn deadline(&self) -> Instant {
        Instant::now() + self.timeout
    }

    /// Resolve a collection handle.
    pub fn collection(&self, database: &str, collection: &str) -> Arc<dyn DocumentCollection> {
        self.accessor.collection(database, collection)
    }

    /// Run one store call under the bound. Expiry yields a `Persistence`
    /// error and the call is not reissued.
    pub async fn bounded<F, R>(&self, operation: &'static str, call: F) -> AppResult<R>
    where
        F: Future<Output = AppResult<R>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(AppError::deadline_exceeded(operation)),
        }
    }
}
