// LLM prompt constants for the summary transform.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, PLAIN_TEXT_ONLY};

/// Role line for the summary rewrite.
pub const SUMMARY_REWRITE_ROLE: &str = "You are an experienced résumé editor. \
    You rewrite professional summaries so they are concise, active, and results-oriented.";

/// Summary rewrite prompt template. Replace `{raw_text}` before sending.
pub const SUMMARY_REWRITE_PROMPT_TEMPLATE: &str = r#"Rewrite the following professional summary for a résumé.

Keep it to at most four sentences. Use active voice and lead with impact.
Keep the author's own voice: do not switch between first and third person.

Summary:
{raw_text}"#;

/// Full system prompt: role plus the shared grounding and plain-text rules.
pub fn summary_rewrite_system() -> String {
    format!("{SUMMARY_REWRITE_ROLE}\n\n{GROUNDING_INSTRUCTION}\n\n{PLAIN_TEXT_ONLY}")
}

pub fn summary_rewrite_prompt(raw_text: &str) -> String {
    SUMMARY_REWRITE_PROMPT_TEMPLATE.replace("{raw_text}", raw_text)
}
