//! Document store connection bootstrap.

use std::sync::Arc;

use tracing::info;

use docrepo_core::config::{StoreBackend, StoreConfig};
use docrepo_core::result::AppResult;
use docrepo_core::traits::collection::CollectionAccessor;

/// A connected, verified document store.
///
/// Constructed once at startup; the accessor is then handed by reference to
/// every repository.
#[derive(Debug, Clone)]
pub struct StoreConnection {
    /// The shared collection accessor.
    accessor: Arc<dyn CollectionAccessor>,
    /// Database named in the configuration.
    database: String,
}

impl StoreConnection {
    /// Connect the configured backend and verify it with a ping.
    pub async fn connect(config: &StoreConfig) -> AppResult<Self> {
        info!(
            backend = ?config.backend,
            url = %mask_password(&config.uri()),
            database = %config.database,
            "Connecting to document store"
        );

        let accessor = match config.backend {
            StoreBackend::Memory => connect_memory()?,
            StoreBackend::Mongodb => connect_mongodb(config).await?,
        };

        accessor.ping().await?;

        info!(port = config.port, "Connected to document store");
        Ok(Self {
            accessor,
            database: config.database.clone(),
        })
    }

    /// Wrap an accessor that is already connected.
    pub fn from_accessor(
        accessor: Arc<dyn CollectionAccessor>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            accessor,
            database: database.into(),
        }
    }

    /// Return a clone of the shared accessor.
    pub fn accessor(&self) -> Arc<dyn CollectionAccessor> {
        Arc::clone(&self.accessor)
    }

    /// The configured database name.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Check store connectivity.
    pub async fn health_check(&self) -> AppResult<bool> {
        self.accessor.ping().await.map(|_| true)
    }
}

#[cfg(feature = "memory")]
fn connect_memory() -> AppResult<Arc<dyn CollectionAccessor>> {
    Ok(Arc::new(crate::memory::MemoryStore::new()))
}

#[cfg(not(feature = "memory"))]
fn connect_memory() -> AppResult<Arc<dyn CollectionAccessor>> {
    Err(docrepo_core::error::AppError::configuration(
        "The memory backend requires the `memory` feature",
    ))
}

#[cfg(feature = "mongodb")]
async fn connect_mongodb(config: &StoreConfig) -> AppResult<Arc<dyn CollectionAccessor>> {
    Ok(Arc::new(crate::mongo::MongoStore::connect(config).await?))
}

#[cfg(not(feature = "mongodb"))]
async fn connect_mongodb(_config: &StoreConfig) -> AppResult<Arc<dyn CollectionAccessor>> {
    Err(docrepo_core::error::AppError::configuration(
        "The mongodb backend requires the `mongodb` feature",
    ))
}

/// Mask the password portion of a connection URL for safe logging.
///
/// The userinfo ends at the last `@`, so an unescaped `@` inside the
/// password is masked too.
fn mask_password(url: &str) -> String {
    let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
    let rest = &url[scheme_end..];

    let Some(at) = rest.rfind('@') else {
        return url.to_string();
    };
    let Some(colon) = rest[..at].find(':') else {
        return url.to_string();
    };
    format!("{}{}:****{}", &url[..scheme_end], &rest[..colon], &rest[at..])
}
