mod config;
mod errors;
mod extract;
mod generation;
mod history;
mod llm_client;
mod models;
mod render;
mod routes;
mod state;
mod workflow;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::generation::generator::LlmNotesGenerator;
use crate::history::preferences::Preferences;
use crate::history::{FileStore, HistoryStore, KeyValueStore};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::workflow::Workflow;

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

    info!("Starting studypack v{}", env!("CARGO_PKG_VERSION"));

    // Initialize local persistence (theme + history)
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.data_dir)?);
    info!("Local store at {}", config.data_dir.display());
    let history = HistoryStore::load(store.clone());
    let preferences = Arc::new(Preferences::new(store));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.gemini_api_key.clone(),
        config.gemini_api_base.clone(),
    );
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    let generator = Arc::new(LlmNotesGenerator::new(llm));

    if let Some(max) = config.max_input_chars {
        info!("Submitted text capped at {max} characters");
    }

    let workflow = Arc::new(Workflow::new(generator, history, config.max_input_chars));

    // Build app state
    let state = AppState {
        workflow,
        preferences,
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
