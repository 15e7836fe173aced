//! Prompt builders for the interview loop.

use crate::console::Answer;
use crate::interview::AdvisorMode;

/// One line per prior (question, answer) pair, answers upper-cased.
pub(crate) fn format_history(history: &[(String, Answer)]) -> String {
    history
        .iter()
        .map(|(question, answer)| format!("- {question}: {}", answer.as_prompt_str()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Asks the oracle to pick exactly one verbatim question from the pool.
pub(crate) fn selection_prompt(
    history: &[(String, Answer)],
    remaining: &[String],
    mode: AdvisorMode,
) -> String {
    let role = mode.role_noun();
    let listing = remaining
        .iter()
        .enumerate()
        .map(|(i, question)| format!("{}. {question}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a {role} advisor. Based on previous answers:\n{}\n\
         Select the most relevant yes/no question from this list to narrow down {role} recommendations:\n{listing}\n\
         Output only the selected question text.",
        format_history(history),
    )
}
