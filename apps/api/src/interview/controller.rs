//! Interview turn controller: the counter-driven state machine behind the
//! mock interview.
//!
//! The controller is the single owner of the question counter. The model is
//! only ever asked for text, so a turn's counter is always recomputed here
//! from the transition rule and never read back from model output.

/// Questions asked before the interview concludes with feedback.
pub const MAX_QUESTIONS: u32 = 3;

/// Where a session stands, derived purely from its question counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterviewState {
    NotStarted,
    InProgress { questions_asked: u32 },
    Finished,
}

/// What the interviewer does on the next call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    /// Introduction plus the first question.
    Introduce,
    /// Acknowledge the last answer and ask the next question.
    AskFollowUp,
    /// Closing remarks plus summary, improvement areas and a score.
    Conclude,
}

impl InterviewState {
    pub fn from_count(questions_asked: u32) -> Self {
        match questions_asked {
            0 => InterviewState::NotStarted,
            n if n >= MAX_QUESTIONS => InterviewState::Finished,
            n => InterviewState::InProgress { questions_asked: n },
        }
    }

    pub fn questions_asked(self) -> u32 {
        match self {
            InterviewState::NotStarted => 0,
            InterviewState::InProgress { questions_asked } => questions_asked,
            InterviewState::Finished => MAX_QUESTIONS,
        }
    }

    /// The next action, or `None` once the session is finished.
    pub fn next_action(self) -> Option<TurnAction> {
        if self == InterviewState::Finished {
            return None;
        }
        if self.questions_asked() + 1 >= MAX_QUESTIONS {
            return Some(TurnAction::Conclude);
        }
        match self {
            InterviewState::NotStarted => Some(TurnAction::Introduce),
            _ => Some(TurnAction::AskFollowUp),
        }
    }

    /// Applies `action`, returning the state after the turn.
    pub fn advance(self, action: TurnAction) -> Self {
        match action {
            TurnAction::Conclude => InterviewState::Finished,
            TurnAction::Introduce | TurnAction::AskFollowUp => {
                InterviewState::from_count(self.questions_asked() + 1)
            }
        }
    }
}

impl TurnAction {
    pub fn ends_interview(self) -> bool {
        self == TurnAction::Conclude
    }
}
