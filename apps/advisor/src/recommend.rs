//! Recommendation synthesizer — turns the interview history into a single
//! career/skill suggestion.
//!
//! Recommendations are free-form, so the oracle's trimmed text is returned
//! verbatim — there is no known set to validate against. A failed call
//! yields the "N/A" sentinel; callers must treat that as "no recommendation
//! available", not as an answer.

use tracing::warn;

use crate::console::Answer;
use crate::interview::{prompts, AdvisorMode};
use crate::llm_client::Oracle;
use crate::market::UNAVAILABLE;

fn suggestion_prompt(history: &[(String, Answer)], mode: AdvisorMode) -> String {
    format!(
        "Based on these yes/no answers:\n{}\nSuggest a suitable {}.",
        prompts::format_history(history),
        mode.role_noun(),
    )
}

pub async fn synthesize(
    history: &[(String, Answer)],
    mode: AdvisorMode,
    oracle: &dyn Oracle,
) -> String {
    let prompt = suggestion_prompt(history, mode);
    match oracle.complete(&prompt).await {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            warn!("error fetching suggestion: {e}");
            UNAVAILABLE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedOracle;

    fn history() -> Vec<(String, Answer)> {
        vec![
            ("Do you like coding?".to_string(), Answer::Yes),
            ("Do you prefer teams?".to_string(), Answer::No),
        ]
    }

    #[tokio::test]
    async fn test_returns_trimmed_oracle_text_verbatim() {
        let oracle = ScriptedOracle::new([Ok("  Backend Engineer\n".to_string())]);
        let suggestion = synthesize(&history(), AdvisorMode::Career, &oracle).await;
        assert_eq!(suggestion, "Backend Engineer");
    }

    #[tokio::test]
    async fn test_oracle_failure_yields_sentinel() {
        let oracle = ScriptedOracle::failing();
        let suggestion = synthesize(&history(), AdvisorMode::Career, &oracle).await;
        assert_eq!(suggestion, UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_prompt_replays_history_and_role() {
        let oracle = ScriptedOracle::new([Ok("SQL".to_string())]);
        synthesize(&history(), AdvisorMode::Skills, &oracle).await;

        let prompts = oracle.prompts.lock().unwrap();
        assert!(prompts[0].contains("- Do you like coding?: YES"));
        assert!(prompts[0].contains("- Do you prefer teams?: NO"));
        assert!(prompts[0].contains("Suggest a suitable skill."));
    }
}
