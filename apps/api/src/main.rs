mod config;
mod db;
mod errors;
mod matching;
mod models;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::matching::fetcher::HttpPdfFetcher;
use crate::matching::keywords::KeywordExtractor;
use crate::matching::matcher::JobMatcher;
use crate::matching::tagger::LexiconTagger;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url, config.database_max_connections).await?;
    let store = Arc::new(PgStore::new(db));

    // Initialize resume fetcher
    let fetcher = Arc::new(HttpPdfFetcher::new(
        Duration::from_secs(config.fetch_timeout_secs),
        config.max_resume_bytes,
    )?);
    info!(
        "Resume fetcher initialized (timeout: {}s, max size: {} bytes)",
        config.fetch_timeout_secs, config.max_resume_bytes
    );

    // Initialize tagger; shared read-only by every request
    let extractor = KeywordExtractor::new(Arc::new(LexiconTagger::new()));

    let matcher = JobMatcher::new(store.clone(), store, fetcher, extractor);

    // Build app state
    let state = AppState {
        matcher: Arc::new(matcher),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
