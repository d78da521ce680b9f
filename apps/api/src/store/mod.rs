//! Per-session user state: saved quotes, chat history, display name, mood log.
//!
//! [`SessionStore`] is an explicit object over an injectable
//! [`KeyValueStore`] backend. Values are JSON documents under fixed keys.
//! Unreadable documents are treated as empty and overwritten on next write.
//! List updates go through [`KeyValueStore::update`], so concurrent writers
//! on one session never drop each other's entries.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

pub mod handlers;
pub mod memory;
pub mod redis_store;

pub const MAX_CHAT_MESSAGES: usize = 50;
pub const MAX_MOOD_ENTRIES: usize = 90;
pub const MAX_DISPLAY_NAME_CHARS: usize = 50;

const SAVED_QUOTES_KEY: &str = "savedQuotes";
const CHAT_HISTORY_KEY: &str = "chatHistory";
const USER_NAME_KEY: &str = "userName";
const MOOD_LOG_KEY: &str = "moodLog";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("redis error: {0}")]
    Redis(#[from] ::redis::RedisError),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("update of {0} kept conflicting with concurrent writers")]
    Contention(String),
}

/// Turns the current value of a key (if any) into its replacement.
pub type UpdateFn<'a> = dyn Fn(Option<String>) -> Result<String, StoreError> + Send + Sync + 'a;

/// Minimal persistence interface. Swap backends without touching callers.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
    async fn clear(&self, key: &str) -> Result<(), StoreError>;

    /// Atomic read-modify-write. `apply` may run more than once when a
    /// backend retries after a conflicting write. Returns the stored value.
    async fn update(&self, key: &str, apply: &UpdateFn<'_>) -> Result<String, StoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Calm,
    Neutral,
    Anxious,
    Sad,
    Angry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub mood: Mood,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Session store
// ────────────────────────────────────────────────────────────────────────────

/// State for one browser session, namespaced by session id.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn KeyValueStore>,
    session_id: Uuid,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn KeyValueStore>, session_id: Uuid) -> Self {
        Self {
            backend,
            session_id,
        }
    }

    fn key(&self, name: &str) -> String {
        format!("mitra:{}:{name}", self.session_id)
    }

    /// Reads a JSON document. Missing or malformed documents yield `None`.
    async fn read<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, StoreError> {
        let key = self.key(name);
        let raw = self.backend.get(&key).await?;
        Ok(parse_document(&key, raw.as_deref()))
    }

    async fn read_list<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, StoreError> {
        Ok(self.read::<Vec<T>>(name).await?.unwrap_or_default())
    }

    /// Applies `modify` to a stored list as one atomic backend update.
    async fn update_list<T, F>(&self, name: &str, modify: F) -> Result<Vec<T>, StoreError>
    where
        T: Serialize + DeserializeOwned,
        F: Fn(&mut Vec<T>) + Send + Sync,
    {
        let key = self.key(name);
        let apply = |current: Option<String>| -> Result<String, StoreError> {
            let mut items: Vec<T> = parse_document(&key, current.as_deref()).unwrap_or_default();
            modify(&mut items);
            Ok(serde_json::to_string(&items)?)
        };
        let stored = self.backend.update(&key, &apply).await?;
        Ok(serde_json::from_str(&stored)?)
    }

    async fn write<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.backend.set(&self.key(name), raw).await
    }

    // ── Saved quotes ────────────────────────────────────────────────────────

    pub async fn saved_quotes(&self) -> Result<Vec<String>, StoreError> {
        self.read_list(SAVED_QUOTES_KEY).await
    }

    /// Adds a quote id if not already saved. Returns the updated list.
    pub async fn save_quote(&self, quote_id: &str) -> Result<Vec<String>, StoreError> {
        self.update_list(SAVED_QUOTES_KEY, |quotes: &mut Vec<String>| {
            if !quotes.iter().any(|q| q == quote_id) {
                quotes.push(quote_id.to_string());
            }
        })
        .await
    }

    /// Removes a quote id. Returns the updated list.
    pub async fn remove_quote(&self, quote_id: &str) -> Result<Vec<String>, StoreError> {
        self.update_list(SAVED_QUOTES_KEY, |quotes: &mut Vec<String>| {
            quotes.retain(|q| q != quote_id)
        })
        .await
    }

    // ── Chat history ────────────────────────────────────────────────────────

    pub async fn chat_history(&self) -> Result<Vec<ChatMessage>, StoreError> {
        self.read_list(CHAT_HISTORY_KEY).await
    }

    /// Appends a message, keeping only the most recent `MAX_CHAT_MESSAGES`.
    pub async fn append_chat(&self, message: ChatMessage) -> Result<Vec<ChatMessage>, StoreError> {
        self.update_list(CHAT_HISTORY_KEY, |history: &mut Vec<ChatMessage>| {
            history.push(message.clone());
            keep_most_recent(history, MAX_CHAT_MESSAGES);
        })
        .await
    }

    pub async fn clear_chat(&self) -> Result<(), StoreError> {
        self.backend.clear(&self.key(CHAT_HISTORY_KEY)).await
    }

    // ── Display name ────────────────────────────────────────────────────────

    pub async fn display_name(&self) -> Result<Option<String>, StoreError> {
        self.read::<String>(USER_NAME_KEY).await
    }

    /// Stores the trimmed name. The caller validates length.
    pub async fn set_display_name(&self, name: &str) -> Result<String, StoreError> {
        let name = name.trim().to_string();
        self.write(USER_NAME_KEY, &name).await?;
        Ok(name)
    }

    pub async fn clear_display_name(&self) -> Result<(), StoreError> {
        self.backend.clear(&self.key(USER_NAME_KEY)).await
    }

    // ── Mood log ────────────────────────────────────────────────────────────

    pub async fn moods(&self) -> Result<Vec<MoodEntry>, StoreError> {
        self.read_list(MOOD_LOG_KEY).await
    }

    /// Records a mood, newest last, keeping only the most recent `MAX_MOOD_ENTRIES`.
    pub async fn record_mood(&self, entry: MoodEntry) -> Result<Vec<MoodEntry>, StoreError> {
        self.update_list(MOOD_LOG_KEY, |log: &mut Vec<MoodEntry>| {
            log.push(entry.clone());
            keep_most_recent(log, MAX_MOOD_ENTRIES);
        })
        .await
    }
}

fn parse_document<T: DeserializeOwned>(key: &str, raw: Option<&str>) -> Option<T> {
    match serde_json::from_str(raw?) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring malformed value under {key}: {e}");
            None
        }
    }
}

fn keep_most_recent<T>(items: &mut Vec<T>, max: usize) {
    if items.len() > max {
        let excess = items.len() - max;
        items.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryStore;
    use super::*;

    fn session(backend: Arc<MemoryStore>) -> SessionStore {
        SessionStore::new(backend, Uuid::new_v4())
    }

    fn message(n: usize) -> ChatMessage {
        ChatMessage {
            role: if n % 2 == 0 { ChatRole::User } else { ChatRole::Assistant },
            content: format!("message {n}"),
            sent_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_saved_quote_round_trip() {
        let backend = Arc::new(MemoryStore::new());
        let store = session(backend);

        store.save_quote("gita-2-47").await.unwrap();
        store.save_quote("gita-2-47").await.unwrap();
        let reloaded = store.saved_quotes().await.unwrap();
        assert_eq!(reloaded, vec!["gita-2-47".to_string()]);

        store.remove_quote("gita-2-47").await.unwrap();
        let reloaded = store.saved_quotes().await.unwrap();
        assert!(!reloaded.contains(&"gita-2-47".to_string()));
    }

    #[tokio::test]
    async fn test_saved_quotes_survive_new_store_handle() {
        let backend = Arc::new(MemoryStore::new());
        let id = Uuid::new_v4();
        SessionStore::new(backend.clone(), id)
            .save_quote("kalam-dreams")
            .await
            .unwrap();

        let reopened = SessionStore::new(backend, id);
        assert_eq!(reopened.saved_quotes().await.unwrap(), vec!["kalam-dreams"]);
    }

    #[tokio::test]
    async fn test_non_array_saved_quotes_treated_as_empty() {
        let backend = Arc::new(MemoryStore::new());
        let store = session(backend.clone());
        backend
            .set(&store.key(SAVED_QUOTES_KEY), r#"{"not": "an array"}"#.to_string())
            .await
            .unwrap();

        assert!(store.saved_quotes().await.unwrap().is_empty());
        assert_eq!(store.save_quote("q1").await.unwrap(), vec!["q1"]);
    }

    #[tokio::test]
    async fn test_garbage_saved_quotes_treated_as_empty() {
        let backend = Arc::new(MemoryStore::new());
        let store = session(backend.clone());
        backend
            .set(&store.key(SAVED_QUOTES_KEY), "{{{".to_string())
            .await
            .unwrap();
        assert!(store.saved_quotes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let backend = Arc::new(MemoryStore::new());
        let a = session(backend.clone());
        let b = session(backend);
        a.save_quote("q1").await.unwrap();
        assert!(b.saved_quotes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chat_history_is_capped_to_most_recent() {
        let store = session(Arc::new(MemoryStore::new()));
        for n in 0..(MAX_CHAT_MESSAGES + 5) {
            store.append_chat(message(n)).await.unwrap();
        }
        let history = store.chat_history().await.unwrap();
        assert_eq!(history.len(), MAX_CHAT_MESSAGES);
        assert_eq!(history[0].content, "message 5");
        assert_eq!(
            history.last().unwrap().content,
            format!("message {}", MAX_CHAT_MESSAGES + 4)
        );
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_all_kept() {
        let backend = Arc::new(MemoryStore::new());
        let id = Uuid::new_v4();

        let writers: Vec<_> = (0..20)
            .map(|n| {
                let store = SessionStore::new(backend.clone(), id);
                tokio::spawn(async move { store.append_chat(message(n)).await })
            })
            .collect();
        for writer in writers {
            writer.await.unwrap().unwrap();
        }

        let history = SessionStore::new(backend, id).chat_history().await.unwrap();
        assert_eq!(history.len(), 20);
    }

    #[tokio::test]
    async fn test_update_overwrites_malformed_list() {
        let backend = Arc::new(MemoryStore::new());
        let store = session(backend.clone());
        backend
            .set(&store.key(MOOD_LOG_KEY), "42".to_string())
            .await
            .unwrap();
        let log = store
            .record_mood(MoodEntry {
                mood: Mood::Happy,
                note: None,
                recorded_at: Utc::now(),
            })
            .await
            .unwrap();
        assert_eq!(log.len(), 1);
    }

    #[tokio::test]
    async fn test_clear_chat() {
        let store = session(Arc::new(MemoryStore::new()));
        store.append_chat(message(0)).await.unwrap();
        store.clear_chat().await.unwrap();
        assert!(store.chat_history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_display_name_set_trim_clear() {
        let store = session(Arc::new(MemoryStore::new()));
        assert_eq!(store.display_name().await.unwrap(), None);

        let stored = store.set_display_name("  Arjun ").await.unwrap();
        assert_eq!(stored, "Arjun");
        assert_eq!(store.display_name().await.unwrap(), Some("Arjun".to_string()));

        store.clear_display_name().await.unwrap();
        assert_eq!(store.display_name().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_mood_log_keeps_newest_last() {
        let store = session(Arc::new(MemoryStore::new()));
        for mood in [Mood::Sad, Mood::Calm] {
            store
                .record_mood(MoodEntry {
                    mood,
                    note: None,
                    recorded_at: Utc::now(),
                })
                .await
                .unwrap();
        }
        let log = store.moods().await.unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[1].mood, Mood::Calm);
    }

    #[tokio::test]
    async fn test_mood_log_is_capped() {
        let store = session(Arc::new(MemoryStore::new()));
        for _ in 0..(MAX_MOOD_ENTRIES + 3) {
            store
                .record_mood(MoodEntry {
                    mood: Mood::Neutral,
                    note: Some("ok".to_string()),
                    recorded_at: Utc::now(),
                })
                .await
                .unwrap();
        }
        assert_eq!(store.moods().await.unwrap().len(), MAX_MOOD_ENTRIES);
    }
}
