//! Axum route handlers ("server actions") for the single-shot flows.
//!
//! Each handler always answers 200 with an `ActionResult`; failures are
//! reported through `isError`.

use axum::{extract::State, Json};

use crate::actions::{ActionJson, ActionResult};
use crate::flows::guidance::{Guidance, GuidanceFlow, GuidanceRequest};
use crate::flows::project_ideas::{ProjectIdeas, ProjectIdeasFlow, ProjectIdeasRequest};
use crate::flows::report::{Report, ReportFlow, ReportRequest};
use crate::flows::roadmap::{Roadmap, RoadmapFlow, RoadmapRequest};
use crate::flows::story::{Story, StoryFlow, StoryRequest};
use crate::flows::study_notes::{StudyNotes, StudyNotesFlow, StudyNotesRequest};
use crate::flows::{run_flow, Flow};
use crate::state::AppState;

async fn run_action<F: Flow>(state: &AppState, input: F::Input) -> Json<ActionResult<F::Output>> {
    let outcome = run_flow::<F>(state.generator.as_ref(), &input).await;
    Json(ActionResult::from_outcome(F::SUBJECT, outcome))
}

/// POST /api/v1/flows/guidance
pub async fn handle_guidance(
    State(state): State<AppState>,
    ActionJson(input): ActionJson<GuidanceRequest>,
) -> Json<ActionResult<Guidance>> {
    run_action::<GuidanceFlow>(&state, input).await
}

/// POST /api/v1/flows/story
pub async fn handle_story(
    State(state): State<AppState>,
    ActionJson(input): ActionJson<StoryRequest>,
) -> Json<ActionResult<Story>> {
    run_action::<StoryFlow>(&state, input).await
}

/// POST /api/v1/flows/study-notes
pub async fn handle_study_notes(
    State(state): State<AppState>,
    ActionJson(input): ActionJson<StudyNotesRequest>,
) -> Json<ActionResult<StudyNotes>> {
    run_action::<StudyNotesFlow>(&state, input).await
}

/// POST /api/v1/flows/project-ideas
pub async fn handle_project_ideas(
    State(state): State<AppState>,
    ActionJson(input): ActionJson<ProjectIdeasRequest>,
) -> Json<ActionResult<ProjectIdeas>> {
    run_action::<ProjectIdeasFlow>(&state, input).await
}

/// POST /api/v1/flows/report
pub async fn handle_report(
    State(state): State<AppState>,
    ActionJson(input): ActionJson<ReportRequest>,
) -> Json<ActionResult<Report>> {
    run_action::<ReportFlow>(&state, input).await
}

/// POST /api/v1/flows/roadmap
pub async fn handle_roadmap(
    State(state): State<AppState>,
    ActionJson(input): ActionJson<RoadmapRequest>,
) -> Json<ActionResult<Roadmap>> {
    run_action::<RoadmapFlow>(&state, input).await
}
