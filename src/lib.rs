//! Mars Rover Dashboard
//!
//! A thin proxy over the NASA Mars rover photo API plus the client engine that
//! renders the rover grid and rover detail views from an immutable store.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod models;
pub mod upstream;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, LogFormat};
use crate::upstream::UpstreamClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, errors::ProxyError> {
        let upstream = UpstreamClient::new(
            &config.upstream_url,
            &config.api_key,
            config.upstream_timeout,
        )?;
        Ok(Self {
            upstream: Arc::new(upstream),
            config: Arc::new(config),
        })
    }
}

/// Install the global tracing subscriber.
pub fn init_tracing(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_files = ServeDir::new(&state.config.static_dir);

    let rover_routes = Router::new()
        .route("/rovers", get(api::list_rovers))
        .route("/rovers/{name}", get(api::get_rover))
        .route("/rovers/{name}/latestphotos", get(api::latest_photos));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .merge(rover_routes)
        .merge(health_routes)
        .fallback_service(static_files)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
