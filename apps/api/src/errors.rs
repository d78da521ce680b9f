use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::flows::validation::FieldErrors;
use crate::llm_client::LlmError;
use crate::speech::SpeechError;
use crate::store::StoreError;

/// Longest slice of an upstream failure shown to users.
const MAX_CAUSE_CHARS: usize = 150;

// ────────────────────────────────────────────────────────────────────────────
// REST errors
// ────────────────────────────────────────────────────────────────────────────

/// Error type for the plain REST endpoints (content, session state).
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "Session state could not be read or saved".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Action errors
// ────────────────────────────────────────────────────────────────────────────

/// Failure taxonomy for server actions (AI flows and speech).
///
/// Never returned to clients as-is: handlers turn it into an `ActionResult`
/// via [`ActionError::user_message`].
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("input failed validation: {0}")]
    Validation(FieldErrors),

    #[error("upstream produced no usable output: {0}")]
    Generation(String),

    #[error("service not configured: {0}")]
    ServiceUnavailable(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("audio job {0} still processing")]
    StillProcessing(String),
}

impl ActionError {
    /// The user-facing message for this failure. `subject` names what the
    /// action produces, e.g. "Study notes".
    pub fn user_message(&self, subject: &str) -> String {
        match self {
            ActionError::Validation(_) => {
                "Invalid input. Please check the highlighted fields.".to_string()
            }
            ActionError::Generation(_) => {
                format!("{subject} could not be generated right now. Please try again later.")
            }
            ActionError::ServiceUnavailable(_) => {
                format!("{subject} is not configured on this server.")
            }
            ActionError::Network(cause) => {
                let cause = truncate_chars(cause.trim(), MAX_CAUSE_CHARS);
                if cause.is_empty() {
                    format!("Failed to generate {}. Please try again.", subject.to_lowercase())
                } else {
                    format!("Failed to generate {}: {cause}", subject.to_lowercase())
                }
            }
            ActionError::StillProcessing(_) => {
                "Audio is still being prepared. Please try again in a moment.".to_string()
            }
        }
    }

    /// Per-field messages, present only for validation failures.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ActionError::Validation(fields) => Some(fields),
            _ => None,
        }
    }
}

impl From<FieldErrors> for ActionError {
    fn from(fields: FieldErrors) -> Self {
        ActionError::Validation(fields)
    }
}

impl From<LlmError> for ActionError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::NotConfigured => {
                ActionError::ServiceUnavailable("ANTHROPIC_API_KEY is not set".to_string())
            }
            LlmError::Http(e) => ActionError::Network(e.to_string()),
            LlmError::Api { status, message } => {
                ActionError::Network(format!("AI service returned {status}: {message}"))
            }
            e @ (LlmError::Parse(_) | LlmError::EmptyContent | LlmError::Contract(_)) => {
                ActionError::Generation(e.to_string())
            }
        }
    }
}

impl From<SpeechError> for ActionError {
    fn from(e: SpeechError) -> Self {
        match e {
            SpeechError::NotConfigured => {
                ActionError::ServiceUnavailable("TTS_API_KEY is not set".to_string())
            }
            SpeechError::EmptyText => {
                let mut fields = FieldErrors::default();
                fields.add("text", "Text to speak cannot be empty.");
                ActionError::Validation(fields)
            }
            SpeechError::TextTooLong { max } => {
                let mut fields = FieldErrors::default();
                fields.add("text", format!("Text to speak must be at most {max} characters."));
                ActionError::Validation(fields)
            }
            SpeechError::Http(e) => ActionError::Network(e.to_string()),
            SpeechError::Api { status, message } => {
                ActionError::Network(format!("speech service returned {status}: {message}"))
            }
            SpeechError::StillProcessing { job_id } => ActionError::StillProcessing(job_id),
            SpeechError::InvalidBaseUrl(detail) => ActionError::ServiceUnavailable(detail),
            e @ (SpeechError::JobFailed(_) | SpeechError::MalformedResponse(_)) => {
                ActionError::Generation(e.to_string())
            }
        }
    }
}

/// Truncates to at most `max` characters, marking the cut with "...".
fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max).collect();
    out.push_str("...");
    out
}
