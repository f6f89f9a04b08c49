mod analysis;
mod config;
mod errors;
mod llm_client;
mod render;
mod routes;
mod state;
mod transcript_log;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::models::SentimentPolicy;
use crate::config::Config;
use crate::llm_client::GroqClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::transcript_log::TranscriptLog;

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

    info!("Starting call analyzer v{}", env!("CARGO_PKG_VERSION"));

    // Initialize completion client
    let llm = GroqClient::new(&config.upstream).context("Failed to build HTTP client")?;
    info!(
        "Completion client initialized (model: {}, timeout: {:?})",
        config.upstream.model, config.upstream.timeout
    );

    let policy = SentimentPolicy::from_strict_flag(config.strict_sentiment);
    let log = Arc::new(TranscriptLog::new(config.log_path.clone()));
    info!(
        "Recording analyses to {} (sentiment policy: {:?})",
        log.path().display(),
        policy
    );

    // Build app state
    let state = AppState {
        analyzer: Analyzer::new(Arc::new(llm), policy),
        log,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
