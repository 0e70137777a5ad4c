//! Forms API Server - legal document generation
//!
//! Provides REST endpoints for:
//! - Template listing
//! - Meeting minutes generation and history
//! - Property records and sale agreement generation
//! - One-shot document delivery
//!
//! Callers are identified by the `X-User-Name` and `X-Group-Id` headers set
//! by the fronting proxy.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod delivery;
mod error;
mod handlers;
mod identity;
mod models;
mod state;
mod store;

use config::Config;
use state::AppState;

/// Build the router over shared state
pub fn app(state: Arc<AppState>) -> Router {
    // CORS configuration for web clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        .route("/api/templates", get(handlers::templates))
        // Meeting minutes
        .route(
            "/api/actas",
            get(handlers::list_actas).post(handlers::create_acta),
        )
        // Sale agreements
        .route(
            "/api/alicuotas",
            get(handlers::list_alicuotas).post(handlers::create_alicuota),
        )
        .route("/api/minutas", post(handlers::create_minuta))
        // Document delivery
        .route("/api/documents/:id", get(handlers::download_document))
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = Config::parse();

    // Initialize logging
    let log_level = if config.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::from_default_env()
                .add_directive(log_level.into())
                .add_directive("tower_http=debug".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Initializing forms API...");
    let state = Arc::new(AppState::new(&config).await?);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Starting forms API on http://{}", addr);
    info!("Templates: {}", config.templates_dir.display());
    info!("Output: {}", config.output_dir.display());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
