//! Axum route handlers for per-session state.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content::find_quote;
use crate::errors::AppError;
use crate::state::AppState;
use crate::store::{ChatMessage, ChatRole, Mood, MoodEntry, MAX_DISPLAY_NAME_CHARS};

const MAX_CHAT_CONTENT_CHARS: usize = 4000;
const MAX_MOOD_NOTE_CHARS: usize = 280;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedQuotesResponse {
    pub quote_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveQuoteRequest {
    pub quote_id: String,
}

#[derive(Debug, Deserialize)]
pub struct AppendChatRequest {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ChatHistoryResponse {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DisplayName {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecordMoodRequest {
    pub mood: Mood,
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MoodLogResponse {
    pub entries: Vec<MoodEntry>,
}

// ────────────────────────────────────────────────────────────────────────────
// Saved quotes
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/sessions/:session_id/quotes
pub async fn handle_list_quotes(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SavedQuotesResponse>, AppError> {
    let quote_ids = state.session(session_id).saved_quotes().await?;
    Ok(Json(SavedQuotesResponse { quote_ids }))
}

/// POST /api/v1/sessions/:session_id/quotes
pub async fn handle_save_quote(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<SaveQuoteRequest>,
) -> Result<Json<SavedQuotesResponse>, AppError> {
    let quote_id = req.quote_id.trim();
    if find_quote(quote_id).is_none() {
        return Err(AppError::NotFound(format!("Quote {quote_id} not found")));
    }
    let quote_ids = state.session(session_id).save_quote(quote_id).await?;
    Ok(Json(SavedQuotesResponse { quote_ids }))
}

/// DELETE /api/v1/sessions/:session_id/quotes/:quote_id
pub async fn handle_remove_quote(
    State(state): State<AppState>,
    Path((session_id, quote_id)): Path<(Uuid, String)>,
) -> Result<Json<SavedQuotesResponse>, AppError> {
    let quote_ids = state.session(session_id).remove_quote(&quote_id).await?;
    Ok(Json(SavedQuotesResponse { quote_ids }))
}

// ────────────────────────────────────────────────────────────────────────────
// Chat history
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/sessions/:session_id/chat
pub async fn handle_get_chat(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ChatHistoryResponse>, AppError> {
    let messages = state.session(session_id).chat_history().await?;
    Ok(Json(ChatHistoryResponse { messages }))
}

/// POST /api/v1/sessions/:session_id/chat
pub async fn handle_append_chat(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<AppendChatRequest>,
) -> Result<Json<ChatHistoryResponse>, AppError> {
    let content = req.content.trim();
    if content.is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }
    if content.chars().count() > MAX_CHAT_CONTENT_CHARS {
        return Err(AppError::Validation(format!(
            "content must be at most {MAX_CHAT_CONTENT_CHARS} characters"
        )));
    }

    let message = ChatMessage {
        role: req.role,
        content: content.to_string(),
        sent_at: Utc::now(),
    };
    let messages = state.session(session_id).append_chat(message).await?;
    Ok(Json(ChatHistoryResponse { messages }))
}

/// DELETE /api/v1/sessions/:session_id/chat
pub async fn handle_clear_chat(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.session(session_id).clear_chat().await?;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Display name
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/sessions/:session_id/name
pub async fn handle_get_name(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<DisplayName>, AppError> {
    let name = state.session(session_id).display_name().await?;
    Ok(Json(DisplayName { name }))
}

/// PUT /api/v1/sessions/:session_id/name
pub async fn handle_set_name(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<DisplayName>,
) -> Result<Json<DisplayName>, AppError> {
    let name = req.name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    if name.chars().count() > MAX_DISPLAY_NAME_CHARS {
        return Err(AppError::Validation(format!(
            "name must be at most {MAX_DISPLAY_NAME_CHARS} characters"
        )));
    }
    let stored = state.session(session_id).set_display_name(name).await?;
    Ok(Json(DisplayName { name: Some(stored) }))
}

/// DELETE /api/v1/sessions/:session_id/name
pub async fn handle_clear_name(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.session(session_id).clear_display_name().await?;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Mood log
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/sessions/:session_id/moods
pub async fn handle_list_moods(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<MoodLogResponse>, AppError> {
    let entries = state.session(session_id).moods().await?;
    Ok(Json(MoodLogResponse { entries }))
}

/// POST /api/v1/sessions/:session_id/moods
pub async fn handle_record_mood(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<RecordMoodRequest>,
) -> Result<Json<MoodLogResponse>, AppError> {
    let note = req
        .note
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);
    if note
        .as_ref()
        .is_some_and(|n| n.chars().count() > MAX_MOOD_NOTE_CHARS)
    {
        return Err(AppError::Validation(format!(
            "note must be at most {MAX_MOOD_NOTE_CHARS} characters"
        )));
    }

    let entry = MoodEntry {
        mood: req.mood,
        note,
        recorded_at: Utc::now(),
    };
    let entries = state.session(session_id).record_mood(entry).await?;
    Ok(Json(MoodLogResponse { entries }))
}
