// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt fragment that enforces plain-text output.
pub const PLAIN_TEXT_ONLY: &str = "Respond with the rewritten text only. \
    Do NOT use markdown, code fences, or surrounding quotes. \
    Do NOT include explanations or apologies.";

/// Instruction that forbids invented facts.
pub const GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: Keep every fact from the original text and add none. \
    Do NOT invent employers, titles, metrics, dates, or skills.";
