//! Mars Rover Dashboard proxy server.

use mars_dashboard::config::Config;
use mars_dashboard::{create_router, init_tracing, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_tracing(&config);

    tracing::info!("Starting Mars Rover Dashboard");
    tracing::info!("Upstream API: {}", config.upstream_url);
    tracing::info!("Static directory: {:?}", config.static_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.api_key == "DEMO_KEY" {
        tracing::warn!("No API_KEY configured, using the rate-limited DEMO_KEY");
    }

    let bind_addr = config.bind_addr;

    // Create application state
    let state = AppState::new(config)?;

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
