//! Single-shot generation flows.
//!
//! Every flow follows the same shape: input contract → prompt template →
//! one hosted-model call → output contract. [`run_flow`] is the only place
//! that shape is implemented; each flow module just declares its contract.
//! All LLM calls go through llm_client.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::info;

use crate::errors::ActionError;
use crate::flows::validation::{validate, Validate};
use crate::llm_client::prompts::system_prompt;
use crate::llm_client::{call_json, Generator};

pub mod guidance;
pub mod handlers;
pub mod project_ideas;
pub mod prompts;
pub mod report;
pub mod roadmap;
pub mod story;
pub mod study_notes;
pub mod validation;

/// A request/response contract for one flow.
pub trait Flow {
    /// What the flow produces, used in user-facing messages.
    const SUBJECT: &'static str;
    /// Role description appended to the shared system prompt.
    const ROLE: &'static str;

    type Input: Validate + Send + Sync;
    type Output: DeserializeOwned + Validate + Send;

    fn render_prompt(input: &Self::Input) -> String;
}

/// Validates `input`, renders the prompt, makes one generation call and
/// returns the validated output untransformed.
///
/// Invalid input fails before the generator is touched.
pub async fn run_flow<F: Flow>(
    generator: &dyn Generator,
    input: &F::Input,
) -> Result<F::Output, ActionError> {
    validate(input)?;

    let prompt = F::render_prompt(input);
    let output = call_json::<F::Output>(generator, &prompt, &system_prompt(F::ROLE)).await?;

    info!("{} generated", F::SUBJECT);
    Ok(output)
}

/// Output language requested by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
}

impl Language {
    pub fn instruction(self) -> &'static str {
        match self {
            Language::En => "Respond in English.",
            Language::Hi => "Respond in Hindi, written in Devanagari script. Keep JSON keys in English.",
        }
    }
}

/// Self-assessed skill level shared by several flows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::study_notes::{StudyNotesFlow, StudyNotesRequest};
    use crate::llm_client::testing::ScriptedGenerator;
    use crate::llm_client::LlmError;

    const NOTES_JSON: &str = r#"{
        "title": "Photosynthesis",
        "summary": "How plants turn light into chemical energy.",
        "sections": [{"heading": "Light reactions", "points": ["Occur in thylakoids"]}],
        "keyTerms": ["chlorophyll"]
    }"#;

    fn notes_request(topic: &str) -> StudyNotesRequest {
        StudyNotesRequest {
            topic: topic.to_string(),
            level: SkillLevel::Beginner,
        }
    }

    #[tokio::test]
    async fn test_short_input_never_reaches_generator() {
        let generator = ScriptedGenerator::new().with_reply(NOTES_JSON);
        let result = run_flow::<StudyNotesFlow>(&generator, &notes_request("ab")).await;

        let err = result.unwrap_err();
        let fields = err.field_errors().expect("validation error");
        assert_eq!(
            fields.get("topic").unwrap()[0],
            "Topic must be at least 3 characters."
        );
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_valid_input_returns_output_unchanged() {
        let generator = ScriptedGenerator::new().with_reply(NOTES_JSON);
        let notes = run_flow::<StudyNotesFlow>(&generator, &notes_request("Photosynthesis"))
            .await
            .unwrap();

        assert_eq!(generator.calls(), 1);
        assert_eq!(notes.title, "Photosynthesis");
        assert_eq!(notes.sections[0].points, vec!["Occur in thylakoids"]);
    }

    #[tokio::test]
    async fn test_unparseable_output_is_generation_error() {
        let generator = ScriptedGenerator::new().with_reply("Sorry, I cannot help with that.");
        let err = run_flow::<StudyNotesFlow>(&generator, &notes_request("Photosynthesis"))
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::Generation(_)));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_not_retried() {
        let generator = ScriptedGenerator::new()
            .with_error(LlmError::Api {
                status: 503,
                message: "unavailable".to_string(),
            })
            .with_reply(NOTES_JSON);
        let err = run_flow::<StudyNotesFlow>(&generator, &notes_request("Photosynthesis"))
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::Network(_)));
        assert_eq!(generator.calls(), 1);
    }

    #[test]
    fn test_language_serde_lowercase() {
        let lang: Language = serde_json::from_str(r#""hi""#).unwrap();
        assert_eq!(lang, Language::Hi);
        assert!(lang.instruction().contains("Hindi"));
    }

    #[test]
    fn test_skill_level_default_is_beginner() {
        assert_eq!(SkillLevel::default().as_str(), "beginner");
    }
}
