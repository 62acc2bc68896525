//! FitLens API Server
//!
//! HTTP front end for the candidate evaluator.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       FITLENS SERVER                         │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌──────────────┐   ┌─────────────────────┐  │
//! │  │  API      │──▶│  Evaluator   │──▶│  Oracle (Ollama)    │  │
//! │  │  (Axum)   │   │  (core)      │   │  /api/generate      │  │
//! │  └─────┬─────┘   └──────┬───────┘   └─────────────────────┘  │
//! │        ▼                ▼                                    │
//! │  ┌───────────┐   ┌──────────────┐                            │
//! │  │ Candidate │   │ Highlighter  │                            │
//! │  │ CSV       │   │ + Surrogate  │                            │
//! │  └───────────┘   └──────────────┘                            │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod models;
mod handlers;
mod error;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fitlens_core::{Evaluator, OllamaClient};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    let default_filter = if config.is_production() {
        "fitlens_server=info,fitlens_core=info,tower_http=info"
    } else {
        "fitlens_server=debug,fitlens_core=info,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.json_logs() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("FitLens Server starting ({})...", config.environment);
    tracing::info!("Oracle: {} (default model {})", config.evaluator.oracle.url, config.evaluator.oracle.default_model);
    tracing::info!("Candidates: {}", config.candidates_csv.display());

    let client = OllamaClient::new(config.evaluator.oracle.clone())
        .context("Failed to build oracle client")?;

    // Build application state
    let state = AppState {
        evaluator: Arc::new(Evaluator::new(Arc::new(client), config.evaluator.clone())),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub evaluator: Arc<Evaluator>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/basic_hiring", post(handlers::hiring::basic))
        .route("/api/advanced_hiring", post(handlers::hiring::advanced))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
