//! Report flow: structured long-form reports.

use serde::{Deserialize, Serialize};

use crate::flows::prompts::{REPORT_PROMPT_TEMPLATE, REPORT_ROLE};
use crate::flows::validation::{
    check_range, check_text, require_items, require_text, FieldErrors, Validate,
};
use crate::flows::Flow;

fn default_target_words() -> u32 {
    800
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    #[default]
    Academic,
    Business,
    Technical,
}

impl ReportType {
    fn as_str(self) -> &'static str {
        match self {
            ReportType::Academic => "academic",
            ReportType::Business => "business",
            ReportType::Technical => "technical",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub topic: String,
    #[serde(default)]
    pub report_type: ReportType,
    #[serde(default = "default_target_words")]
    pub target_words: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSection {
    pub heading: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    #[serde(rename = "abstract")]
    pub summary: String,
    pub sections: Vec<ReportSection>,
    pub conclusion: String,
}

impl Validate for ReportRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_text(&mut errors, "topic", "Topic", &self.topic, 5, 300);
        check_range(&mut errors, "targetWords", "Target length", self.target_words, 200, 5000);
        errors.into_result()
    }
}

impl Validate for Report {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        require_text(&mut errors, "title", &self.title);
        require_text(&mut errors, "abstract", &self.summary);
        require_items(&mut errors, "sections", &self.sections);
        require_text(&mut errors, "conclusion", &self.conclusion);
        errors.into_result()
    }
}

pub struct ReportFlow;

impl Flow for ReportFlow {
    const SUBJECT: &'static str = "Report";
    const ROLE: &'static str = REPORT_ROLE;

    type Input = ReportRequest;
    type Output = Report;

    fn render_prompt(input: &ReportRequest) -> String {
        REPORT_PROMPT_TEMPLATE
            .replace("{report_type}", input.report_type.as_str())
            .replace("{target_words}", &input.target_words.to_string())
            .replace("{topic}", input.topic.trim())
    }
}
