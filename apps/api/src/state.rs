use std::sync::Arc;

use uuid::Uuid;

use crate::config::Config;
use crate::llm_client::Generator;
use crate::speech::SpeechClient;
use crate::store::{KeyValueStore, SessionStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Hosted model behind every flow. `LlmClient` in production.
    pub generator: Arc<dyn Generator>,
    pub speech: SpeechClient,
    /// Session-state backend: Redis when configured, otherwise process memory.
    pub store: Arc<dyn KeyValueStore>,
    pub config: Config,
}

impl AppState {
    /// Session-scoped view of the store.
    pub fn session(&self, session_id: Uuid) -> SessionStore {
        SessionStore::new(self.store.clone(), session_id)
    }
}
