use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use leadboard::analytics::LeadAnalytics;
use leadboard::api;
use leadboard::auth::AccessGuard;
use leadboard::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    leadboard::init_tracing();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration");

    // Initialize storage
    info!(
        "Using {:?} lead store: {}",
        config.database.backend,
        config.database.redacted_url()
    );
    let store = leadboard::open_store(&config).await?;
    info!("Lead store initialized successfully");

    // Initialize access guard
    let guard = Arc::new(AccessGuard::new(config.auth.admin_key.as_deref()));
    if guard.is_configured() {
        info!("🔐 Analytics protected by admin key");
    } else {
        warn!("ADMIN_KEY is not set - every analytics request will be rejected");
    }

    let analytics = LeadAnalytics::new(
        store,
        config.analytics.read_policy(),
        config.analytics.aggregation_settings()?,
    );

    let router = api::create_api_router(analytics, guard);

    let api_addr = format!("{}:{}", config.api_server.host, config.api_server.port);
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("🚀 Analytics API listening on http://{}", api_addr);
    info!("   - GET http://{}/analytics?period=30d", api_addr);

    axum::serve(listener, router).await?;

    Ok(())
}
