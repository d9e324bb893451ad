// Shared prompt constants and prompt-building utilities.
// Each AI flow defines its own template in ai::prompts.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction appended to every scoring prompt.
pub const SCORE_RANGE_INSTRUCTION: &str = "\
    Every score is a number from 0 to 100 inclusive, where 0 means no evidence \
    of the skill and 100 means exceptional, well-evidenced proficiency. \
    Judge only what the answers show; do not reward length or polish alone.";

/// Builds a system prompt from a role sentence plus the JSON-only fragment.
pub fn json_system(role: &str) -> String {
    format!("{role} {JSON_ONLY_SYSTEM}")
}
