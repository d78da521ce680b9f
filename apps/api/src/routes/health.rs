use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service version and which upstream providers are configured.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "mitra-api",
        "llm_configured": state.config.anthropic_api_key.is_some(),
        "tts_configured": state.config.tts_api_key.is_some(),
    }))
}
