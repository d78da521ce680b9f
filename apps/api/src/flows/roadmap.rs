//! Roadmap flow: phased learning plans toward a goal.

use serde::{Deserialize, Serialize};

use crate::flows::prompts::{ROADMAP_PROMPT_TEMPLATE, ROADMAP_ROLE};
use crate::flows::validation::{check_text, require_items, require_text, FieldErrors, Validate};
use crate::flows::{Flow, SkillLevel};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapRequest {
    pub goal: String,
    #[serde(default)]
    pub current_level: SkillLevel,
    pub timeframe: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    pub phase: String,
    pub duration: String,
    pub objectives: Vec<String>,
    #[serde(default)]
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roadmap {
    pub title: String,
    pub overview: String,
    pub milestones: Vec<Milestone>,
}

impl Validate for RoadmapRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_text(&mut errors, "goal", "Goal", &self.goal, 5, 300);
        check_text(&mut errors, "timeframe", "Timeframe", &self.timeframe, 2, 50);
        errors.into_result()
    }
}

impl Validate for Roadmap {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        require_text(&mut errors, "title", &self.title);
        require_text(&mut errors, "overview", &self.overview);
        require_items(&mut errors, "milestones", &self.milestones);
        if self.milestones.iter().any(|m| m.objectives.is_empty()) {
            errors.add("milestones", "every milestone needs at least one objective");
        }
        errors.into_result()
    }
}

pub struct RoadmapFlow;

impl Flow for RoadmapFlow {
    const SUBJECT: &'static str = "Roadmap";
    const ROLE: &'static str = ROADMAP_ROLE;

    type Input = RoadmapRequest;
    type Output = Roadmap;

    fn render_prompt(input: &RoadmapRequest) -> String {
        ROADMAP_PROMPT_TEMPLATE
            .replace("{current_level}", input.current_level.as_str())
            .replace("{timeframe}", input.timeframe.trim())
            .replace("{goal}", input.goal.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_fields_reported() {
        let request = RoadmapRequest {
            goal: "ML".to_string(),
            current_level: SkillLevel::Beginner,
            timeframe: "".to_string(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.get("goal").is_some());
        assert!(errors.get("timeframe").is_some());
    }

    #[test]
    fn test_prompt_renders_all_fields() {
        let request = RoadmapRequest {
            goal: "Become a backend developer".to_string(),
            current_level: SkillLevel::Intermediate,
            timeframe: "6 months".to_string(),
        };
        let prompt = RoadmapFlow::render_prompt(&request);
        assert!(prompt.contains("\"Become a backend developer\""));
        assert!(prompt.contains("Current level: intermediate"));
        assert!(prompt.contains("Available time: 6 months"));
    }

    #[test]
    fn test_milestone_without_objectives_rejected() {
        let roadmap = Roadmap {
            title: "Backend path".to_string(),
            overview: "From basics to deployment.".to_string(),
            milestones: vec![Milestone {
                phase: "Foundations".to_string(),
                duration: "4 weeks".to_string(),
                objectives: vec![],
                resources: vec![],
            }],
        };
        assert!(roadmap.validate().is_err());
    }
}
