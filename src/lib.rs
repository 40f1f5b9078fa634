pub mod analytics;
pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod storage;

use anyhow::Result;
use std::sync::Arc;

use config::{Config, DatabaseBackend};
use storage::{LeadStore, PostgresLeadStore, SqliteLeadStore};

/// Open and initialize the configured lead store
pub async fn open_store(config: &Config) -> Result<Arc<dyn LeadStore>> {
    let store: Arc<dyn LeadStore> = match config.database.backend {
        DatabaseBackend::Sqlite => Arc::new(
            SqliteLeadStore::new(&config.database.url, config.database.max_connections).await?,
        ),
        DatabaseBackend::Postgres => Arc::new(
            PostgresLeadStore::new(&config.database.url, config.database.max_connections).await?,
        ),
    };

    store.init().await?;
    Ok(store)
}

/// Install the tracing subscriber, honouring `RUST_LOG` (default `info`)
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
