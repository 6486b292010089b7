// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::application::series_service::{SeriesService, share_source};
use crate::application::streaming_service::StreamingDashboardService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::rng::StdRandomSource;
use crate::presentation::app_state::AppState;
use crate::presentation::router::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (RUST_LOG overrides the default level)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Random source (infrastructure layer)
    let source = share_source(StdRandomSource::from_seed_option(config.generator.seed));
    match config.generator.seed {
        Some(seed) => tracing::info!("Generating reproducible data from seed {}", seed),
        None => tracing::info!("Generating data from OS entropy"),
    }

    // Create services (application layer)
    let series_service = SeriesService::new(source);
    let dashboard_service = DashboardService::new(series_service.clone(), config.dashboard);
    let streaming_service =
        StreamingDashboardService::new(dashboard_service.clone(), config.generator);

    // Create application state
    let state = Arc::new(AppState {
        series_service,
        dashboard_service,
        streaming_service,
    });

    // Build router (presentation layer)
    let app = router(state);

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!("Starting factory-insights service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
