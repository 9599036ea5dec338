// Shared prompt fragments.
// Each feature that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only, \
    matching the provided response schema exactly. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Instruction that keeps generated material anchored to the submitted text.
pub const SOURCE_GROUNDING_INSTRUCTION: &str = "\
    Base every statement on the material provided by the student. \
    Where the material is thin, explain the standard textbook understanding of the topic \
    it introduces, but never contradict the material.";
