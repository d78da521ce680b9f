// All LLM prompt templates for the single-shot flows.
// Placeholders are `{name}` and are substituted by each flow's `render_prompt`.

pub const GUIDANCE_ROLE: &str = "You offer grounded life guidance drawn from timeless wisdom \
    traditions, applied to the user's concrete situation.";

/// Replace: {query}, {language_instruction}
pub const GUIDANCE_PROMPT_TEMPLATE: &str = r#"A user has come to you with the following concern:

"{query}"

Offer thoughtful, compassionate guidance. Ground it in practical steps the user can take this week.
{language_instruction}

Return a JSON object with this EXACT schema:
{
  "guidance": "Several paragraphs of guidance addressed directly to the user",
  "keyPoints": ["Short actionable takeaway", "..."],
  "reflectionPrompt": "One question the user can reflect on, or null"
}"#;

pub const STORY_ROLE: &str = "You write short original stories that carry a gentle moral.";

/// Replace: {theme}, {audience}, {language_instruction}
pub const STORY_PROMPT_TEMPLATE: &str = r#"Write an original short story on the theme: "{theme}".

Audience: {audience}
Keep it between 300 and 700 words. {language_instruction}

Return a JSON object with this EXACT schema:
{
  "title": "Story title",
  "story": "The full story text, paragraphs separated by blank lines",
  "moral": "The moral of the story in one sentence"
}"#;

pub const STUDY_NOTES_ROLE: &str = "You are an expert teacher who writes clear, well-structured \
    study notes.";

/// Replace: {topic}, {level}
pub const STUDY_NOTES_PROMPT_TEMPLATE: &str = r#"Prepare study notes on the topic: "{topic}".

The student is at the {level} level. Prefer short bullet points over long prose.

Return a JSON object with this EXACT schema:
{
  "title": "Notes title",
  "summary": "A 2-4 sentence overview of the topic",
  "sections": [
    {"heading": "Section heading", "points": ["Concise point", "..."]}
  ],
  "keyTerms": ["Important term", "..."]
}"#;

pub const PROJECT_IDEAS_ROLE: &str = "You are a mentor who suggests realistic, portfolio-worthy \
    project ideas.";

/// Replace: {interests}, {skill_level}, {count}
pub const PROJECT_IDEAS_PROMPT_TEMPLATE: &str = r#"Suggest exactly {count} project ideas for a learner at the {skill_level} level who is interested in: "{interests}".

Each idea must be buildable by one person and teach something concrete.

Return a JSON object with this EXACT schema:
{
  "ideas": [
    {
      "title": "Project title",
      "description": "What the project does and what the learner will gain",
      "techStack": ["Technology", "..."],
      "difficulty": "beginner" | "intermediate" | "advanced"
    }
  ]
}"#;

pub const REPORT_ROLE: &str = "You are a careful writer who produces well-organised reports.";

/// Replace: {topic}, {report_type}, {target_words}
pub const REPORT_PROMPT_TEMPLATE: &str = r#"Write a {report_type} report on: "{topic}".

Aim for roughly {target_words} words in total. Use a formal tone and do not invent statistics or citations.

Return a JSON object with this EXACT schema:
{
  "title": "Report title",
  "abstract": "A short abstract",
  "sections": [
    {"heading": "Section heading", "content": "Section body"}
  ],
  "conclusion": "Concluding paragraph"
}"#;

pub const ROADMAP_ROLE: &str = "You are a career and learning coach who designs step-by-step \
    roadmaps.";

/// Replace: {goal}, {current_level}, {timeframe}
pub const ROADMAP_PROMPT_TEMPLATE: &str = r#"Design a learning roadmap for this goal: "{goal}".

Current level: {current_level}
Available time: {timeframe}

Split the roadmap into ordered phases that fit the available time.

Return a JSON object with this EXACT schema:
{
  "title": "Roadmap title",
  "overview": "Short overview of the path",
  "milestones": [
    {
      "phase": "Phase name",
      "duration": "e.g. 2 weeks",
      "objectives": ["What to achieve", "..."],
      "resources": ["Suggested resource", "..."]
    }
  ]
}"#;
