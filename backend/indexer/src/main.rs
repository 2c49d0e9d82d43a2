//! Crowdfund escrow event indexer.
//!
//! Starts a background indexer task that polls Soroban `getEvents` RPC for
//! escrow contract events and persists them to SQLite. Simultaneously
//! exposes a small Axum REST API so clients can discover project ids and
//! follow contributions, claims and refunds.

mod api;
mod config;
mod db;
mod errors;
mod events;
mod indexer;
mod rpc;

use std::sync::Arc;

use axum::{routing::get, Router};
use reqwest::Client;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use indexer::IndexerState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load optional .env file (ignored if missing) before reading RUST_LOG.
    let _ = dotenvy::dotenv();

    // Initialise structured logging (RUST_LOG controls verbosity).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // Set up the SQLite connection pool and run migrations.
    let pool = db::init_pool(&config.database_url).await?;

    let client = Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    // ─── Background indexer ───────────────────────────────
    let indexer_state = Arc::new(IndexerState {
        pool: pool.clone(),
        config: config.clone(),
        client,
    });
    tokio::spawn(indexer::run(indexer_state));

    // ─── REST API ─────────────────────────────────────────
    let api_state = Arc::new(api::ApiState { pool });

    let app = Router::new()
        .route("/health", get(api::health))
        .route("/events", get(api::get_all_events))
        .route("/projects/:id/events", get(api::get_project_events))
        .route("/accounts/:address/events", get(api::get_account_events))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(api_state);

    let addr = format!("0.0.0.0:{}", config.api_port);
    info!("API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
