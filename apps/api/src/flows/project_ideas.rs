//! Project ideas flow.

use serde::{Deserialize, Serialize};

use crate::flows::prompts::{PROJECT_IDEAS_PROMPT_TEMPLATE, PROJECT_IDEAS_ROLE};
use crate::flows::validation::{check_range, check_text, require_items, FieldErrors, Validate};
use crate::flows::{Flow, SkillLevel};

const DEFAULT_IDEA_COUNT: u32 = 3;
const MAX_IDEA_COUNT: u32 = 10;

fn default_count() -> u32 {
    DEFAULT_IDEA_COUNT
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectIdeasRequest {
    pub interests: String,
    #[serde(default)]
    pub skill_level: SkillLevel,
    #[serde(default = "default_count")]
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectIdea {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    pub difficulty: SkillLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectIdeas {
    pub ideas: Vec<ProjectIdea>,
}

impl Validate for ProjectIdeasRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_text(&mut errors, "interests", "Interests", &self.interests, 3, 300);
        check_range(&mut errors, "count", "Number of ideas", self.count, 1, MAX_IDEA_COUNT);
        errors.into_result()
    }
}

impl Validate for ProjectIdeas {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        require_items(&mut errors, "ideas", &self.ideas);
        if self.ideas.len() > MAX_IDEA_COUNT as usize {
            errors.add("ideas", format!("must contain at most {MAX_IDEA_COUNT} ideas"));
        }
        if self
            .ideas
            .iter()
            .any(|i| i.title.trim().is_empty() || i.description.trim().is_empty())
        {
            errors.add("ideas", "every idea needs a title and a description");
        }
        errors.into_result()
    }
}

pub struct ProjectIdeasFlow;

impl Flow for ProjectIdeasFlow {
    const SUBJECT: &'static str = "Project ideas";
    const ROLE: &'static str = PROJECT_IDEAS_ROLE;

    type Input = ProjectIdeasRequest;
    type Output = ProjectIdeas;

    fn render_prompt(input: &ProjectIdeasRequest) -> String {
        PROJECT_IDEAS_PROMPT_TEMPLATE
            .replace("{count}", &input.count.to_string())
            .replace("{skill_level}", input.skill_level.as_str())
            .replace("{interests}", input.interests.trim())
    }
}
