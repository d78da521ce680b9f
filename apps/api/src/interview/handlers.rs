use axum::{extract::State, Json};

use crate::actions::{ActionJson, ActionResult};
use crate::interview::{conduct_turn, InterviewResult, InterviewTurnRequest};
use crate::state::AppState;

/// POST /api/v1/flows/interview
///
/// Runs one interview turn. The request carries the full session; nothing
/// is stored server-side.
pub async fn handle_interview_turn(
    State(state): State<AppState>,
    ActionJson(request): ActionJson<InterviewTurnRequest>,
) -> Json<ActionResult<InterviewResult>> {
    let outcome = conduct_turn(state.generator.as_ref(), &request).await;
    let result = match outcome {
        Ok(result) if result.is_interview_over => {
            ActionResult::success("Interview complete. Here is your feedback.", result)
        }
        Ok(result) => ActionResult::success("Next question ready.", result),
        Err(err) => ActionResult::failure("Interview response", err),
    };
    Json(result)
}
