//! Task escrow event indexer: entry point.
//!
//! Starts a background task that polls Soroban `getEvents` for the escrow
//! contract's events and persists them to SQLite, and serves them over a
//! small Axum REST API.

mod api;
mod config;
mod db;
mod decode;
mod errors;
mod events;
mod indexer;
mod rpc;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use indexer::IndexerState;
use rpc::RpcClient;

const HTTP_TIMEOUT_SECS: u64 = 30;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load optional .env file (ignored if missing) before reading RUST_LOG.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;

    let pool = db::init_pool(&config.database_url).await?;

    let http = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()?;

    // ─── Background indexer ───────────────────────────────
    let indexer_state = Arc::new(IndexerState {
        pool: pool.clone(),
        rpc: RpcClient::new(http, config.rpc_url.clone(), config.contract_id.clone()),
        config: config.clone(),
    });
    tokio::spawn(indexer::run(indexer_state));

    // ─── REST API ─────────────────────────────────────────
    let app = api::router(Arc::new(api::ApiState { pool }));

    let addr = format!("0.0.0.0:{}", config.api_port);
    info!("API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
