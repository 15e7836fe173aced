//! Question selector — delegates next-question choice to the oracle.
//!
//! The oracle is advisory only: its answer is accepted solely when it is an
//! exact (case-sensitive, whitespace-trimmed) member of the remaining pool.
//! Anything else — a paraphrase, an off-list invention, or an outright call
//! failure — falls back to the first pool entry, which keeps selection
//! deterministic under oracle misbehavior and guarantees forward progress.

use tracing::warn;

use crate::console::Answer;
use crate::errors::AppError;
use crate::interview::{prompts, AdvisorMode};
use crate::llm_client::Oracle;

/// Picks the next question from `remaining`.
///
/// `remaining` must be non-empty; the engine checks before calling. An
/// empty pool here is an invariant violation, reported as `EmptyPool`
/// rather than an oracle failure.
pub async fn select_question(
    history: &[(String, Answer)],
    remaining: &[String],
    mode: AdvisorMode,
    oracle: &dyn Oracle,
) -> Result<String, AppError> {
    if remaining.is_empty() {
        return Err(AppError::EmptyPool);
    }

    let prompt = prompts::selection_prompt(history, remaining, mode);
    match oracle.complete(&prompt).await {
        Ok(response) => {
            let selected = response.trim();
            if remaining.iter().any(|question| question == selected) {
                Ok(selected.to_string())
            } else {
                Ok(remaining[0].clone())
            }
        }
        Err(e) => {
            warn!("error selecting next question from oracle: {e}");
            Ok(remaining[0].clone())
        }
    }
}
