pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::content::handlers as content;
use crate::flows::handlers as flows;
use crate::interview::handlers as interview;
use crate::speech::handlers as speech;
use crate::state::AppState;
use crate::store::handlers as sessions;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Server actions
        .route("/api/v1/flows/guidance", post(flows::handle_guidance))
        .route("/api/v1/flows/story", post(flows::handle_story))
        .route("/api/v1/flows/study-notes", post(flows::handle_study_notes))
        .route("/api/v1/flows/project-ideas", post(flows::handle_project_ideas))
        .route("/api/v1/flows/report", post(flows::handle_report))
        .route("/api/v1/flows/roadmap", post(flows::handle_roadmap))
        .route(
            "/api/v1/flows/interview",
            post(interview::handle_interview_turn),
        )
        .route("/api/v1/speech", post(speech::handle_speech))
        // Static content
        .route("/api/v1/content/about", get(content::handle_about))
        .route(
            "/api/v1/content/resume-tips",
            get(content::handle_resume_tips),
        )
        .route("/api/v1/content/quotes", get(content::handle_quotes))
        // Session state
        .route(
            "/api/v1/sessions/:session_id/quotes",
            get(sessions::handle_list_quotes).post(sessions::handle_save_quote),
        )
        .route(
            "/api/v1/sessions/:session_id/quotes/:quote_id",
            delete(sessions::handle_remove_quote),
        )
        .route(
            "/api/v1/sessions/:session_id/chat",
            get(sessions::handle_get_chat)
                .post(sessions::handle_append_chat)
                .delete(sessions::handle_clear_chat),
        )
        .route(
            "/api/v1/sessions/:session_id/name",
            get(sessions::handle_get_name)
                .put(sessions::handle_set_name)
                .delete(sessions::handle_clear_name),
        )
        .route(
            "/api/v1/sessions/:session_id/moods",
            get(sessions::handle_list_moods).post(sessions::handle_record_mood),
        )
        .with_state(state)
}
