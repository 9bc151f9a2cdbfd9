mod analysis;
mod config;
mod errors;
mod llm_client;
mod resume;
mod routes;
mod state;
mod website;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::pipeline::StageMode;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::resume::PdfResumeParser;
use crate::routes::build_router;
use crate::state::AppState;
use crate::website::extractor::HttpPageExtractor;

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

    info!("Starting resume analyzer v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.llm.clone())?;
    info!("LLM client initialized (model: {})", llm.model());

    let page_extractor = HttpPageExtractor::new(config.llm.timeout_secs)?;

    let stage_mode = StageMode::from_flag(config.parallel_stages);
    info!("Analysis stages run {:?}", stage_mode);

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        resume_parser: Arc::new(PdfResumeParser),
        page_extractor: Arc::new(page_extractor),
        stage_mode,
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
