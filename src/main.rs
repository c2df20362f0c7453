//! DocRepo provisioning tool
//!
//! Connects the configured document store and makes sure the configured
//! collections exist.

use tracing_subscriber::{EnvFilter, fmt};

use docrepo_core::config::AppConfig;
use docrepo_core::error::AppError;
use docrepo_store::{StoreConnection, ensure_collections};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Provisioning failed: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("DOCREPO_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting DocRepo provisioning v{}", env!("CARGO_PKG_VERSION"));

    let connection = StoreConnection::connect(&config.store).await?;

    let accessor = connection.accessor();
    let created = ensure_collections(
        accessor.as_ref(),
        connection.database(),
        &config.store.collections,
    )
    .await?;

    if created.is_empty() {
        tracing::info!(
            database = %connection.database(),
            "All configured collections already exist"
        );
    } else {
        tracing::info!(
            database = %connection.database(),
            created = ?created,
            "Created {} collection(s)",
            created.len()
        );
    }

    Ok(())
}
