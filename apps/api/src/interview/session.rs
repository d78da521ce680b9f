//! Interview session, reconstructed from each request.
//!
//! The server keeps no interview state between calls. A session is rebuilt
//! from the history the client sends. Tests drive whole interviews through
//! the client-side replay helpers at the bottom of this file.

use crate::interview::controller::InterviewState;
use crate::interview::{ConversationTurn, InterviewTurnRequest};
#[cfg(test)]
use crate::interview::{
    controller::MAX_QUESTIONS, count_interviewer_turns, InterviewResult,
};

#[derive(Debug, Clone, PartialEq)]
pub struct InterviewSession {
    pub domain: String,
    pub history: Vec<ConversationTurn>,
    pub questions_asked: u32,
    pub pending_answer: Option<String>,
}

impl InterviewSession {
    pub fn from_request(request: &InterviewTurnRequest) -> Self {
        let answer = request.latest_answer.trim();
        Self {
            domain: request.domain.trim().to_string(),
            history: request.history.clone(),
            questions_asked: request.questions_asked,
            pending_answer: (!answer.is_empty()).then(|| answer.to_string()),
        }
    }

    pub fn state(&self) -> InterviewState {
        InterviewState::from_count(self.questions_asked)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Client-side replay
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
impl InterviewSession {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            history: Vec::new(),
            questions_asked: 0,
            pending_answer: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state() == InterviewState::Finished
    }

    pub fn interviewer_turns(&self) -> usize {
        count_interviewer_turns(&self.history)
    }

    /// Builds the request a client sends to answer the current question.
    pub fn turn_request(&self, answer: &str) -> InterviewTurnRequest {
        InterviewTurnRequest {
            domain: self.domain.clone(),
            history: self.history.clone(),
            latest_answer: answer.to_string(),
            questions_asked: self.questions_asked,
        }
    }

    /// Appends the answer (when given) and the interviewer's reply, and
    /// takes the result's counter. The counter never moves backwards and
    /// never exceeds the cap.
    pub fn record_turn(&mut self, answer: &str, result: &InterviewResult) {
        let answer = answer.trim();
        if !answer.is_empty() {
            self.history.push(ConversationTurn::user(answer));
        }
        self.history
            .push(ConversationTurn::interviewer(&result.response_text));
        self.questions_asked = result
            .questions_asked
            .max(self.questions_asked)
            .min(MAX_QUESTIONS);
        self.pending_answer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(n: u32) -> InterviewResult {
        InterviewResult {
            response_text: format!("Question {n}?"),
            questions_asked: n,
            is_interview_over: false,
            feedback: None,
        }
    }

    #[test]
    fn test_from_request_drops_blank_answer() {
        let request = InterviewTurnRequest {
            domain: "  Data Science ".to_string(),
            history: vec![],
            latest_answer: "   ".to_string(),
            questions_asked: 0,
        };
        let session = InterviewSession::from_request(&request);
        assert_eq!(session.domain, "Data Science");
        assert_eq!(session.pending_answer, None);
        assert_eq!(session.state(), InterviewState::NotStarted);
    }

    #[test]
    fn test_record_turn_without_answer_only_adds_interviewer() {
        let mut session = InterviewSession::new("Frontend");
        session.record_turn("", &question(1));
        assert_eq!(session.history.len(), 1);
        assert_eq!(session.interviewer_turns(), 1);
        assert_eq!(session.questions_asked, 1);
    }

    #[test]
    fn test_record_turn_never_decreases_counter() {
        let mut session = InterviewSession::new("Frontend");
        session.record_turn("ready", &question(2));
        session.record_turn("my answer", &question(1));
        assert_eq!(session.questions_asked, 2);
    }

    #[test]
    fn test_record_turn_caps_counter() {
        let mut session = InterviewSession::new("Frontend");
        session.record_turn("ready", &question(7));
        assert_eq!(session.questions_asked, MAX_QUESTIONS);
        assert!(session.is_finished());
    }

    #[test]
    fn test_turn_request_carries_session() {
        let mut session = InterviewSession::new("Backend");
        session.record_turn("", &question(1));
        let request = session.turn_request("I would use a queue.");
        assert_eq!(request.questions_asked, 1);
        assert_eq!(request.history.len(), 1);
        assert_eq!(request.latest_answer, "I would use a queue.");
    }
}
