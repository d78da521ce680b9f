//! Guidance flow: life guidance for a free-text concern.

use serde::{Deserialize, Serialize};

use crate::flows::prompts::{GUIDANCE_PROMPT_TEMPLATE, GUIDANCE_ROLE};
use crate::flows::validation::{check_text, require_items, require_text, FieldErrors, Validate};
use crate::flows::{Flow, Language};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidanceRequest {
    pub query: String,
    #[serde(default)]
    pub language: Language,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guidance {
    pub guidance: String,
    pub key_points: Vec<String>,
    #[serde(default)]
    pub reflection_prompt: Option<String>,
}

impl Validate for GuidanceRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_text(&mut errors, "query", "Your question", &self.query, 10, 1000);
        errors.into_result()
    }
}

impl Validate for Guidance {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        require_text(&mut errors, "guidance", &self.guidance);
        require_items(&mut errors, "keyPoints", &self.key_points);
        errors.into_result()
    }
}

pub struct GuidanceFlow;

impl Flow for GuidanceFlow {
    const SUBJECT: &'static str = "Guidance";
    const ROLE: &'static str = GUIDANCE_ROLE;

    type Input = GuidanceRequest;
    type Output = Guidance;

    fn render_prompt(input: &GuidanceRequest) -> String {
        GUIDANCE_PROMPT_TEMPLATE
            .replace("{language_instruction}", input.language.instruction())
            .replace("{query}", input.query.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_minimum_length() {
        let request = GuidanceRequest {
            query: "help me".to_string(),
            language: Language::En,
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(
            errors.get("query").unwrap()[0],
            "Your question must be at least 10 characters."
        );
    }

    #[test]
    fn test_language_defaults_to_english() {
        let request: GuidanceRequest =
            serde_json::from_str(r#"{"query": "How do I stay calm before exams?"}"#).unwrap();
        assert_eq!(request.language, Language::En);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_prompt_includes_query_and_language() {
        let request = GuidanceRequest {
            query: "  How do I stay calm before exams?  ".to_string(),
            language: Language::Hi,
        };
        let prompt = GuidanceFlow::render_prompt(&request);
        assert!(prompt.contains("\"How do I stay calm before exams?\""));
        assert!(prompt.contains("Devanagari"));
        assert!(!prompt.contains("{query}"));
    }

    #[test]
    fn test_output_without_reflection_prompt_is_valid() {
        let output: Guidance = serde_json::from_str(
            r#"{"guidance": "Breathe slowly.", "keyPoints": ["Sleep well"]}"#,
        )
        .unwrap();
        assert!(output.reflection_prompt.is_none());
        assert!(output.validate().is_ok());
    }

    #[test]
    fn test_output_requires_key_points() {
        let output = Guidance {
            guidance: "Breathe slowly.".to_string(),
            key_points: vec![],
            reflection_prompt: None,
        };
        assert!(output.validate().unwrap_err().get("keyPoints").is_some());
    }
}
