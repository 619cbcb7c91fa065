// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::application::query_cache::QueryCache;
use crate::application::visualization_service::VisualizationService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::dhis2_repository::Dhis2Repository;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(Dhis2Repository::new(&config.dhis2)?);
    let cache = Arc::new(QueryCache::new(Duration::from_secs(config.cache.stale_time_secs)));

    // Create services (application layer)
    let dashboard_service = DashboardService::new(repository, cache);
    let visualization_service = VisualizationService::new(config.charts.mode_bar_exclusions);

    let state = Arc::new(AppState {
        dashboard_service,
        visualization_service,
    });

    // Build router (presentation layer)
    let router = build_router(state);

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!("Starting dashboard-client on {} (DHIS2 at {})", addr, config.dhis2.base_url);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
