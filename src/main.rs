// ==========================================
// Tire registry - HTTP service entry point
// ==========================================

use std::sync::Arc;
use tire_registry::app::{app_router, AppState};
use tire_registry::config::AppConfig;
use tire_registry::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    logging::init(config.log_format);

    tracing::info!(version = tire_registry::VERSION, "starting tire registry service");

    let state = Arc::new(AppState::new(&config)?);
    let router = app_router(state);

    tracing::info!(listen_addr = %config.listen_addr, db_path = %config.db_path, "listening");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
