//! Story flow: short original stories with a moral.

use serde::{Deserialize, Serialize};

use crate::flows::prompts::{STORY_PROMPT_TEMPLATE, STORY_ROLE};
use crate::flows::validation::{check_text, require_text, FieldErrors, Validate};
use crate::flows::{Flow, Language};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    Child,
    Teen,
    #[default]
    Adult,
}

impl AgeGroup {
    fn audience(self) -> &'static str {
        match self {
            AgeGroup::Child => "children aged 6-10; simple words and a playful tone",
            AgeGroup::Teen => "teenagers; relatable characters and everyday dilemmas",
            AgeGroup::Adult => "adults; nuanced characters and a reflective tone",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryRequest {
    pub theme: String,
    #[serde(default)]
    pub age_group: AgeGroup,
    #[serde(default)]
    pub language: Language,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    pub title: String,
    pub story: String,
    pub moral: String,
}

impl Validate for StoryRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_text(&mut errors, "theme", "Theme", &self.theme, 3, 200);
        errors.into_result()
    }
}

impl Validate for Story {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        require_text(&mut errors, "title", &self.title);
        require_text(&mut errors, "story", &self.story);
        require_text(&mut errors, "moral", &self.moral);
        errors.into_result()
    }
}

pub struct StoryFlow;

impl Flow for StoryFlow {
    const SUBJECT: &'static str = "Story";
    const ROLE: &'static str = STORY_ROLE;

    type Input = StoryRequest;
    type Output = Story;

    fn render_prompt(input: &StoryRequest) -> String {
        STORY_PROMPT_TEMPLATE
            .replace("{audience}", input.age_group.audience())
            .replace("{language_instruction}", input.language.instruction())
            .replace("{theme}", input.theme.trim())
    }
}
