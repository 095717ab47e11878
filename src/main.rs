//! searxng-proxy: JSON search proxy with public-instance fallback
//!
//! This is the main entry point for the application.

use anyhow::Result;
use searxng_proxy::{
    config,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let settings_path = config::find_settings_file();
    let settings = config::load(settings_path.as_deref())?;

    // Initialize logging
    let level = if settings.general.debug { "debug" } else { "info" };
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::new(format!(
            "searxng_proxy={level},tower_http={level},warn"
        )))
        .with_target(false)
        .init();

    info!("Starting {} v{}", settings.general.instance_name, searxng_proxy::VERSION);
    match settings_path {
        Some(path) => info!("Loaded settings from: {}", path.display()),
        None => info!("No settings file found, using defaults"),
    }
    info!("SearXNG URL: {}", settings.upstream.local_url);
    info!(
        "Public fallback instances: {}",
        settings.upstream.public_instances.len()
    );
    info!("Debug mode: {}", settings.general.debug);

    // Bind address
    let addr = SocketAddr::new(
        settings.server.bind_address.parse()?,
        settings.server.port,
    );

    // Create application state and router
    let state = AppState::new(settings)?;
    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
