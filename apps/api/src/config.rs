use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_LLM_MODEL: &str = "claude-sonnet-4-5";
const DEFAULT_TTS_BASE_URL: &str = "https://api.voice-synth.example/v1/tts";
const DEFAULT_TTS_POLL_DELAY_MS: u64 = 3000;

/// Application configuration loaded from environment variables.
///
/// Provider credentials are optional: a server without them still boots and
/// serves static content and session state, while AI flows report that they
/// are not configured.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub anthropic_base_url: String,
    pub llm_model: String,
    pub tts_api_key: Option<String>,
    pub tts_base_url: String,
    pub tts_poll_delay: Duration,
    /// When unset, session state lives in process memory.
    pub redis_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let tts_poll_delay_ms = match optional_env("TTS_POLL_DELAY_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("TTS_POLL_DELAY_MS must be a whole number of milliseconds")?,
            None => DEFAULT_TTS_POLL_DELAY_MS,
        };

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            anthropic_base_url: optional_env("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|| DEFAULT_ANTHROPIC_BASE_URL.to_string()),
            llm_model: optional_env("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            tts_api_key: optional_env("TTS_API_KEY"),
            tts_base_url: optional_env("TTS_BASE_URL")
                .unwrap_or_else(|| DEFAULT_TTS_BASE_URL.to_string()),
            tts_poll_delay: Duration::from_millis(tts_poll_delay_ms),
            redis_url: optional_env("REDIS_URL"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an env var, treating empty or whitespace-only values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
