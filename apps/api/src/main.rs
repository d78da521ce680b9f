mod actions;
mod config;
mod content;
mod errors;
mod flows;
mod interview;
mod llm_client;
mod routes;
mod speech;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::speech::SpeechClient;
use crate::state::AppState;
use crate::store::memory::MemoryStore;
use crate::store::redis_store::RedisStore;
use crate::store::KeyValueStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("mitra_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Mitra API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.anthropic_api_key.clone(),
        &config.anthropic_base_url,
        &config.llm_model,
    );
    if llm.is_configured() {
        info!("LLM client initialized (model: {})", llm.model());
    } else {
        warn!("ANTHROPIC_API_KEY not set; AI flows will report they are not configured");
    }

    // Initialize speech client
    let speech = SpeechClient::new(
        config.tts_api_key.clone(),
        &config.tts_base_url,
        config.tts_poll_delay,
    );
    if config.tts_api_key.is_none() {
        warn!("TTS_API_KEY not set; speech synthesis will report it is not configured");
    }

    // Initialize session store
    let store: Arc<dyn KeyValueStore> = match &config.redis_url {
        Some(url) => Arc::new(RedisStore::open(url)?),
        None => {
            info!("REDIS_URL not set; session state is kept in memory");
            Arc::new(MemoryStore::new())
        }
    };

    // Build app state
    let state = AppState {
        generator: Arc::new(llm),
        speech,
        store,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the web app's domain

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
