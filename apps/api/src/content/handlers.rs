use axum::Json;

use crate::content::{AboutPage, Quote, TipCategory, ABOUT, QUOTES, RESUME_TIPS};

/// GET /api/v1/content/about
pub async fn handle_about() -> Json<&'static AboutPage> {
    Json(&ABOUT)
}

/// GET /api/v1/content/resume-tips
pub async fn handle_resume_tips() -> Json<&'static [TipCategory]> {
    Json(RESUME_TIPS)
}

/// GET /api/v1/content/quotes
pub async fn handle_quotes() -> Json<&'static [Quote]> {
    Json(QUOTES)
}
