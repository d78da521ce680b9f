//! Study notes flow.

use serde::{Deserialize, Serialize};

use crate::flows::prompts::{STUDY_NOTES_PROMPT_TEMPLATE, STUDY_NOTES_ROLE};
use crate::flows::validation::{check_text, require_items, require_text, FieldErrors, Validate};
use crate::flows::{Flow, SkillLevel};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyNotesRequest {
    pub topic: String,
    #[serde(default)]
    pub level: SkillLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesSection {
    pub heading: String,
    pub points: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyNotes {
    pub title: String,
    pub summary: String,
    pub sections: Vec<NotesSection>,
    #[serde(default)]
    pub key_terms: Vec<String>,
}

impl Validate for StudyNotesRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_text(&mut errors, "topic", "Topic", &self.topic, 3, 200);
        errors.into_result()
    }
}

impl Validate for StudyNotes {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        require_text(&mut errors, "title", &self.title);
        require_text(&mut errors, "summary", &self.summary);
        require_items(&mut errors, "sections", &self.sections);
        if self.sections.iter().any(|s| s.points.is_empty()) {
            errors.add("sections", "every section must have at least one point");
        }
        errors.into_result()
    }
}

pub struct StudyNotesFlow;

impl Flow for StudyNotesFlow {
    const SUBJECT: &'static str = "Study notes";
    const ROLE: &'static str = STUDY_NOTES_ROLE;

    type Input = StudyNotesRequest;
    type Output = StudyNotes;

    fn render_prompt(input: &StudyNotesRequest) -> String {
        STUDY_NOTES_PROMPT_TEMPLATE
            .replace("{level}", input.level.as_str())
            .replace("{topic}", input.topic.trim())
    }
}
