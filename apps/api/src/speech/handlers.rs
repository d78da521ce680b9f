use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::actions::{ActionJson, ActionResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
    pub voice: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechAudio {
    pub audio_url: String,
}

/// POST /api/v1/speech
pub async fn handle_speech(
    State(state): State<AppState>,
    ActionJson(request): ActionJson<SpeechRequest>,
) -> Json<ActionResult<SpeechAudio>> {
    let outcome = state
        .speech
        .synthesize(&request.text, request.voice.as_deref())
        .await;
    let result = match outcome {
        Ok(audio_url) => ActionResult::success("Audio ready.", SpeechAudio { audio_url }),
        Err(err) => ActionResult::failure("Audio", err.into()),
    };
    Json(result)
}
