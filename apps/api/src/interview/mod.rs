//! Mock interview flow.
//!
//! Flow: validate request → rebuild session → controller picks the action →
//! render turn prompt → one LLM call → assemble result with the controller's
//! counter. All LLM calls go through llm_client.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::ActionError;
use crate::flows::validation::{
    check_text, require_items, require_text, validate, FieldErrors, Validate,
};
use crate::interview::controller::{TurnAction, MAX_QUESTIONS};
use crate::interview::prompts::{
    CONCLUDE_INSTRUCTION, FEEDBACK_SCHEMA, FOLLOW_UP_INSTRUCTION, INTERVIEWER_ROLE,
    INTRODUCE_INSTRUCTION, QUESTION_SCHEMA, TURN_PROMPT_TEMPLATE,
};
use crate::interview::session::InterviewSession;
use crate::llm_client::prompts::system_prompt;
use crate::llm_client::{call_json, Generator};

pub mod controller;
pub mod handlers;
pub mod prompts;
pub mod session;

const MAX_DOMAIN_CHARS: usize = 100;
const MAX_ANSWER_CHARS: usize = 4000;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Interviewer,
    User,
}

/// One entry of the interview transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

#[cfg(test)]
impl ConversationTurn {
    pub fn interviewer(content: impl Into<String>) -> Self {
        Self {
            role: Role::Interviewer,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Request body for one interview turn. Carries the whole session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewTurnRequest {
    pub domain: String,
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
    #[serde(default)]
    pub latest_answer: String,
    #[serde(default)]
    pub questions_asked: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewFeedback {
    pub summary: String,
    pub areas_for_improvement: Vec<String>,
    /// 0 – 100
    pub score: u32,
}

/// Result of one turn. Feedback fields appear only once the interview is over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewResult {
    pub response_text: String,
    pub questions_asked: u32,
    pub is_interview_over: bool,
    #[serde(flatten)]
    pub feedback: Option<InterviewFeedback>,
}

/// Model output for an introduce or follow-up turn.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionReply {
    response_text: String,
}

/// Model output for the concluding turn.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClosingReply {
    response_text: String,
    summary: String,
    areas_for_improvement: Vec<String>,
    score: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Contracts
// ────────────────────────────────────────────────────────────────────────────

/// Number of interviewer turns in a transcript. Always equals the counter of
/// a consistent session.
pub fn count_interviewer_turns(history: &[ConversationTurn]) -> usize {
    history
        .iter()
        .filter(|t| t.role == Role::Interviewer)
        .count()
}

impl Validate for InterviewTurnRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_text(&mut errors, "domain", "Interview domain", &self.domain, 1, MAX_DOMAIN_CHARS);

        if self.questions_asked >= MAX_QUESTIONS {
            errors.add("questionsAsked", "This interview has already finished.");
        } else if self.questions_asked > 0 {
            check_text(
                &mut errors,
                "latestAnswer",
                "Your answer",
                &self.latest_answer,
                1,
                MAX_ANSWER_CHARS,
            );
        } else if self.latest_answer.chars().count() > MAX_ANSWER_CHARS {
            errors.add(
                "latestAnswer",
                format!("Your answer must be at most {MAX_ANSWER_CHARS} characters."),
            );
        }

        let interviewer_turns = count_interviewer_turns(&self.history);
        if interviewer_turns != self.questions_asked as usize {
            errors.add(
                "history",
                format!(
                    "History has {interviewer_turns} interviewer turns but {} questions were asked.",
                    self.questions_asked
                ),
            );
        }

        errors.into_result()
    }
}

impl Validate for QuestionReply {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        require_text(&mut errors, "responseText", &self.response_text);
        errors.into_result()
    }
}

impl Validate for ClosingReply {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        require_text(&mut errors, "responseText", &self.response_text);
        require_text(&mut errors, "summary", &self.summary);
        require_items(&mut errors, "areasForImprovement", &self.areas_for_improvement);
        if !(0.0..=100.0).contains(&self.score) {
            errors.add("score", "must be between 0 and 100");
        }
        errors.into_result()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Turn orchestration
// ────────────────────────────────────────────────────────────────────────────

/// Runs one interview turn. Makes exactly one generation call; an invalid
/// model reply fails the turn and the client may resubmit the same request.
pub async fn conduct_turn(
    generator: &dyn Generator,
    request: &InterviewTurnRequest,
) -> Result<InterviewResult, ActionError> {
    validate(request)?;

    let session = InterviewSession::from_request(request);
    let state = session.state();
    let Some(action) = state.next_action() else {
        let mut errors = FieldErrors::default();
        errors.add("questionsAsked", "This interview has already finished.");
        return Err(ActionError::Validation(errors));
    };
    let questions_asked = state.advance(action).questions_asked();

    let prompt = render_turn_prompt(&session, action);
    let system = system_prompt(INTERVIEWER_ROLE);

    let result = if action.ends_interview() {
        let reply: ClosingReply = call_json(generator, &prompt, &system).await?;
        InterviewResult {
            response_text: reply.response_text,
            questions_asked,
            is_interview_over: true,
            feedback: Some(InterviewFeedback {
                summary: reply.summary,
                areas_for_improvement: reply.areas_for_improvement,
                score: reply.score.round() as u32,
            }),
        }
    } else {
        let reply: QuestionReply = call_json(generator, &prompt, &system).await?;
        InterviewResult {
            response_text: reply.response_text,
            questions_asked,
            is_interview_over: false,
            feedback: None,
        }
    };

    info!(
        "Interview turn for '{}': {:?}, questions asked {}/{}",
        session.domain, action, questions_asked, MAX_QUESTIONS
    );
    Ok(result)
}

fn render_turn_prompt(session: &InterviewSession, action: TurnAction) -> String {
    let transcript = if session.history.is_empty() {
        "(the interview has not started yet)".to_string()
    } else {
        session
            .history
            .iter()
            .map(|turn| match turn.role {
                Role::Interviewer => format!("Interviewer: {}", turn.content),
                Role::User => format!("Candidate: {}", turn.content),
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let (instruction, schema) = match action {
        TurnAction::Introduce => (
            INTRODUCE_INSTRUCTION.replace("{max_questions}", &MAX_QUESTIONS.to_string()),
            QUESTION_SCHEMA,
        ),
        TurnAction::AskFollowUp => (
            FOLLOW_UP_INSTRUCTION
                .replace("{question_number}", &(session.questions_asked + 1).to_string())
                .replace("{max_questions}", &MAX_QUESTIONS.to_string()),
            QUESTION_SCHEMA,
        ),
        TurnAction::Conclude => (CONCLUDE_INSTRUCTION.to_string(), FEEDBACK_SCHEMA),
    };

    fill_template(
        TURN_PROMPT_TEMPLATE,
        &[
            ("instruction", instruction.as_str()),
            ("schema", schema),
            ("domain", session.domain.as_str()),
            ("transcript", transcript.as_str()),
            (
                "latest_answer",
                session.pending_answer.as_deref().unwrap_or("(none yet)"),
            ),
        ],
    )
}

/// Substitutes `{key}` placeholders in one left-to-right pass. Inserted
/// values are never scanned again, so user text containing `{...}` stays
/// literal.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after_brace = &rest[start + 1..];
        let matched = values.iter().find_map(|(key, value)| {
            after_brace
                .strip_prefix(key)
                .and_then(|tail| tail.strip_prefix('}'))
                .map(|tail| (*value, tail))
        });
        match matched {
            Some((value, tail)) => {
                out.push_str(value);
                rest = tail;
            }
            None => {
                out.push('{');
                rest = after_brace;
            }
        }
    }
    out.push_str(rest);
    out
}
