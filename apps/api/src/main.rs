mod ai;
mod config;
mod db;
mod errors;
mod hiring;
mod llm_client;
mod models;
mod persistence;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StorageBackend};
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::persistence::memory::MemoryJobStore;
use crate::persistence::postgres::PgJobStore;
use crate::persistence::redis_store::{RedisJobStore, JOBS_BLOB_KEY};
use crate::persistence::JobStore;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::StateStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting hiring API v{}", env!("CARGO_PKG_VERSION"));

    let backend = build_job_store(&config).await?;
    let store = Arc::new(StateStore::new(backend));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.anthropic_api_key.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )?;
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        llm_client::MODEL,
        config.llm_timeout_secs
    );

    // Warm the job cache; an unreachable store is reported, not fatal
    match store.fetch_jobs().await {
        Ok(jobs) => info!("Loaded {} jobs", jobs.len()),
        Err(e) => tracing::warn!("Initial job fetch failed: {e}"),
    }

    let state = AppState {
        store,
        llm,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to PUBLIC_BASE_URL

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Connects the persistence backend selected by `STORAGE_BACKEND`.
async fn build_job_store(config: &Config) -> Result<Arc<dyn JobStore>> {
    match config.storage_backend {
        StorageBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres backend")?;
            let pool = create_pool(url).await?;
            Ok(Arc::new(PgJobStore::new(pool)))
        }
        StorageBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("REDIS_URL is required for the redis backend")?;
            let client = redis::Client::open(url)?;
            info!("Redis client initialized (key: {JOBS_BLOB_KEY})");
            Ok(Arc::new(RedisJobStore::new(client)))
        }
        StorageBackend::Memory => {
            info!("Using in-memory job store; data is lost on restart");
            Ok(Arc::new(MemoryJobStore::new()))
        }
    }
}
