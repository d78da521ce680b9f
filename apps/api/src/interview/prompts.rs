// Prompt templates for the mock interview.

pub const INTERVIEWER_ROLE: &str = "You are conducting a friendly but rigorous mock job \
    interview. Ask one clear question at a time and keep your turns short.";

/// Replace: {domain}, {transcript}, {latest_answer}, {instruction}, {schema}
pub const TURN_PROMPT_TEMPLATE: &str = r#"Interview domain: {domain}

Conversation so far:
{transcript}

Candidate's latest answer:
{latest_answer}

{instruction}

Return a JSON object with this EXACT schema:
{schema}"#;

/// Replace: {max_questions}
pub const INTRODUCE_INSTRUCTION: &str = "Introduce yourself in one or two sentences, explain \
    that the interview has {max_questions} questions, then ask the first question.";

/// Replace: {question_number}, {max_questions}
pub const FOLLOW_UP_INSTRUCTION: &str = "Briefly acknowledge the candidate's latest answer \
    without grading it, then ask question {question_number} of {max_questions}. Build on what \
    the candidate has said so far.";

pub const CONCLUDE_INSTRUCTION: &str = "The interview is now over. Thank the candidate and give \
    closing remarks. Then assess the whole conversation: write a short summary of the \
    candidate's performance, list concrete areas for improvement, and give an overall score \
    from 0 to 100. Do NOT ask another question.";

pub const QUESTION_SCHEMA: &str = r#"{
  "responseText": "What you say to the candidate, ending with your question"
}"#;

pub const FEEDBACK_SCHEMA: &str = r#"{
  "responseText": "Your closing remarks to the candidate",
  "summary": "Summary of the candidate's performance",
  "areasForImprovement": ["Concrete area to improve", "..."],
  "score": 72
}"#;
