// Shared prompt constants and prompt-building utilities.
// Each flow defines its own templates in flows/prompts.rs or alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Persona shared by every Mitra flow.
pub const MITRA_PERSONA: &str = "You are Mitra, a warm, encouraging guide for students and \
    young professionals. You are practical, honest and kind, and you never shame the user.";

/// Builds a flow's system prompt from its role description.
pub fn system_prompt(role: &str) -> String {
    format!("{MITRA_PERSONA} {role} {JSON_ONLY_SYSTEM}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_always_demands_json() {
        let system = system_prompt("You write study notes.");
        assert!(system.starts_with(MITRA_PERSONA));
        assert!(system.contains("You write study notes."));
        assert!(system.ends_with(JSON_ONLY_SYSTEM));
    }
}
