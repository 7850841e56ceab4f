//! Prompt optimization domain (results, strategies, input validation).

pub mod model;

use crate::error::{EcoError, EcoResult};

/// Longest prompt accepted at the boundary, in characters.
pub const MAX_PROMPT_CHARS: usize = 2000;

/// Check a prompt before it is handed to the rewriter.
///
/// Whitespace-only input is rejected the same way as an empty string.
pub fn validate_prompt(prompt: &str, max_chars: usize) -> EcoResult<()> {
    if prompt.trim().is_empty() {
        return Err(EcoError::EmptyPrompt);
    }

    let length = prompt.chars().count();
    if length > max_chars {
        tracing::warn!(length, max = max_chars, "prompt rejected");
        return Err(EcoError::PromptTooLong {
            length,
            max: max_chars,
        });
    }

    Ok(())
}
