//! Interview engine — the turn-by-turn questioning state machine.
//!
//! Each turn either follows the static yes/no links in the question source
//! (branching mode) or delegates selection to the oracle (oracle-driven
//! mode). The mode transition is one-directional: once branching is
//! abandoned — a missing record, a dead branch, or simply five turns on the
//! clock — the engine stays oracle-driven for the rest of the interview.
//!
//! Oracle failures never abort a run. The only way an interview ends below
//! the minimum turn count is an exhausted question pool.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::console::{Answer, Prompter};
use crate::errors::AppError;
use crate::interview::{selector, AdvisorMode};
use crate::llm_client::Oracle;
use crate::questions::QuestionBank;

/// After this many turns the oracle takes over selection for good.
const ORACLE_TAKEOVER_TURNS: usize = 5;

/// How the next question is chosen. The only legal transition is
/// `Branching -> OracleDriven`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Branching,
    OracleDriven,
}

/// Mutable state of a single interview run. Owned by the engine for the
/// duration of `run`; nothing in here outlives the interview.
struct InterviewState {
    mode: Mode,
    current_id: Option<String>,
    asked: HashSet<String>,
    remaining: Vec<String>,
    history: Vec<(String, Answer)>,
    turns: usize,
}

impl InterviewState {
    fn new(start_id: &str, pool: Vec<String>) -> Self {
        Self {
            mode: Mode::Branching,
            current_id: Some(start_id.to_string()),
            asked: HashSet::new(),
            remaining: pool,
            history: Vec::new(),
            turns: 0,
        }
    }
}

pub struct InterviewEngine<'a> {
    bank: &'a QuestionBank,
    oracle: &'a dyn Oracle,
    mode: AdvisorMode,
    min_questions: usize,
}

impl<'a> InterviewEngine<'a> {
    pub fn new(
        bank: &'a QuestionBank,
        oracle: &'a dyn Oracle,
        mode: AdvisorMode,
        min_questions: usize,
    ) -> Self {
        Self {
            bank,
            oracle,
            mode,
            min_questions,
        }
    }

    /// Runs the interview to completion and returns the collected
    /// (question, answer) history in asking order.
    pub async fn run(
        &self,
        start_id: &str,
        prompter: &mut dyn Prompter,
    ) -> Result<Vec<(String, Answer)>, AppError> {
        let mut state = InterviewState::new(start_id, self.bank.question_texts());

        while state.turns < self.min_questions {
            if state.turns >= ORACLE_TAKEOVER_TURNS {
                state.mode = Mode::OracleDriven;
            }

            // Pick this turn's question. Branch targets are remembered only
            // when the question came from a live branching lookup.
            let mut branch_targets = None;
            let question = match state.mode {
                Mode::Branching => {
                    let record = state
                        .current_id
                        .as_deref()
                        .and_then(|id| self.bank.find_by_id(id));
                    match record {
                        Some(record) => {
                            state.asked.insert(record.id.clone());
                            branch_targets =
                                Some((record.next_if_yes.clone(), record.next_if_no.clone()));
                            record.text.clone()
                        }
                        None => {
                            debug!(
                                "no record for current id {:?}, switching to oracle-driven selection",
                                state.current_id
                            );
                            state.mode = Mode::OracleDriven;
                            match self.select_from_pool(&mut state).await? {
                                Some(question) => question,
                                None => break,
                            }
                        }
                    }
                }
                Mode::OracleDriven => match self.select_from_pool(&mut state).await? {
                    Some(question) => question,
                    None => break,
                },
            };

            let answer = prompter.ask(&question)?;

            state.history.push((question.clone(), answer));
            state.remaining.retain(|text| text != &question);
            state.turns += 1;

            // Advance: follow the answered branch, or abandon branching for
            // good when the target is empty, unknown, or already asked. The
            // next loop iteration then selects via the oracle before
            // presenting, so no turn is skipped.
            if state.mode == Mode::Branching {
                if let Some((next_if_yes, next_if_no)) = branch_targets {
                    let target = if answer.is_yes() { next_if_yes } else { next_if_no };
                    if self.branch_is_usable(&target, &state.asked) {
                        state.current_id = Some(target);
                    } else {
                        debug!(
                            "branch target {target:?} is unusable after turn {}, \
                             switching to oracle-driven selection",
                            state.turns
                        );
                        state.mode = Mode::OracleDriven;
                        state.current_id = None;
                    }
                }
            }
        }

        Ok(state.history)
    }

    /// Oracle-driven selection. Returns `None` when the pool is exhausted,
    /// which ends the interview even below the minimum turn count.
    async fn select_from_pool(
        &self,
        state: &mut InterviewState,
    ) -> Result<Option<String>, AppError> {
        if state.remaining.is_empty() {
            warn!(
                "no more questions available, ending the interview after {} turns",
                state.turns
            );
            return Ok(None);
        }

        let question =
            selector::select_question(&state.history, &state.remaining, self.mode, self.oracle)
                .await?;

        // Adopt the matching record's id when the selected text is a known
        // question; oracle-only questions keep the id absent.
        match self.bank.find_by_text(&question) {
            Some(record) => {
                state.current_id = Some(record.id.clone());
                state.asked.insert(record.id.clone());
            }
            None => state.current_id = None,
        }

        Ok(Some(question))
    }

    /// A branch target is usable only if it is non-empty, resolves to an
    /// existing record, and has not already been asked.
    fn branch_is_usable(&self, target: &str, asked: &HashSet<String>) -> bool {
        !target.is_empty() && self.bank.find_by_id(target).is_some() && !asked.contains(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedOracle;
    use crate::questions::QuestionRecord;
    use std::collections::VecDeque;
    use std::io;

    fn record(id: &str, text: &str, next_if_yes: &str, next_if_no: &str) -> QuestionRecord {
        QuestionRecord {
            id: id.to_string(),
            text: text.to_string(),
            next_if_yes: next_if_yes.to_string(),
            next_if_no: next_if_no.to_string(),
        }
    }

    fn bank(records: Vec<QuestionRecord>) -> QuestionBank {
        QuestionBank::from_records(records).unwrap()
    }

    /// Prompter replaying a fixed answer script; once the script runs dry
    /// it answers yes to everything.
    struct ScriptedPrompter {
        answers: VecDeque<Answer>,
        fail_next: bool,
    }

    impl ScriptedPrompter {
        fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
            Self {
                answers: answers.into_iter().collect(),
                fail_next: false,
            }
        }

        fn all_yes() -> Self {
            Self::new(std::iter::empty())
        }
    }

    impl Prompter for ScriptedPrompter {
        fn ask(&mut self, _question: &str) -> io::Result<Answer> {
            if self.fail_next {
                return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
            }
            Ok(self.answers.pop_front().unwrap_or(Answer::Yes))
        }
    }

    fn questions(history: &[(String, Answer)]) -> Vec<&str> {
        history.iter().map(|(q, _)| q.as_str()).collect()
    }

    #[tokio::test]
    async fn test_branching_chain_never_calls_oracle() {
        let bank = bank(vec![
            record("Q1", "Like coding?", "Q2", "Q3"),
            record("Q2", "Prefer teams?", "Q3", ""),
            record("Q3", "Enjoy data?", "", ""),
        ]);
        let oracle = ScriptedOracle::failing();
        let engine = InterviewEngine::new(&bank, &oracle, AdvisorMode::Career, 3);
        let mut prompter = ScriptedPrompter::all_yes();

        let history = engine.run("Q1", &mut prompter).await.unwrap();

        assert_eq!(
            questions(&history),
            vec!["Like coding?", "Prefer teams?", "Enjoy data?"]
        );
        assert_eq!(oracle.call_count(), 0);
    }

    #[tokio::test]
    async fn test_no_answer_follows_the_no_branch() {
        let bank = bank(vec![
            record("Q1", "Like coding?", "Q2", "Q3"),
            record("Q2", "Prefer teams?", "", ""),
            record("Q3", "Enjoy data?", "", ""),
        ]);
        let oracle = ScriptedOracle::failing();
        let engine = InterviewEngine::new(&bank, &oracle, AdvisorMode::Career, 2);
        let mut prompter = ScriptedPrompter::new([Answer::No, Answer::Yes]);

        let history = engine.run("Q1", &mut prompter).await.unwrap();

        assert_eq!(questions(&history), vec!["Like coding?", "Enjoy data?"]);
        assert_eq!(history[0].1, Answer::No);
    }

    /// Q1 -> (yes: Q2, no: Q3), Q2 has both branches empty, Q3 is absent
    /// from the source. Answering yes must reach Q2 and only then fall back
    /// to the oracle — after Q2, not before.
    #[tokio::test]
    async fn test_dead_end_falls_back_after_the_dead_question() {
        let bank = bank(vec![
            record("Q1", "Like coding?", "Q2", "Q3"),
            record("Q2", "Prefer teams?", "", ""),
            record("Q4", "Enjoy data?", "", ""),
        ]);
        let oracle = ScriptedOracle::new([Ok("Enjoy data?".to_string())]);
        let engine = InterviewEngine::new(&bank, &oracle, AdvisorMode::Career, 3);
        let mut prompter = ScriptedPrompter::all_yes();

        let history = engine.run("Q1", &mut prompter).await.unwrap();

        assert_eq!(
            questions(&history),
            vec!["Like coding?", "Prefer teams?", "Enjoy data?"]
        );
        assert_eq!(oracle.call_count(), 1);
        // The single selection happened after both branching answers were in.
        let prompts = oracle.prompts.lock().unwrap();
        assert!(prompts[0].contains("- Like coding?: YES"));
        assert!(prompts[0].contains("- Prefer teams?: YES"));
    }

    #[tokio::test]
    async fn test_unknown_start_id_switches_to_oracle_on_turn_one() {
        let bank = bank(vec![
            record("Q1", "Like coding?", "", ""),
            record("Q2", "Prefer teams?", "", ""),
        ]);
        let oracle = ScriptedOracle::new([
            Ok("Prefer teams?".to_string()),
            Ok("Like coding?".to_string()),
        ]);
        let engine = InterviewEngine::new(&bank, &oracle, AdvisorMode::Career, 2);
        let mut prompter = ScriptedPrompter::all_yes();

        let history = engine.run("Q9", &mut prompter).await.unwrap();

        assert_eq!(questions(&history), vec!["Prefer teams?", "Like coding?"]);
        assert_eq!(oracle.call_count(), 2);
    }

    #[tokio::test]
    async fn test_oracle_takes_over_after_five_turns() {
        let bank = bank(vec![
            record("Q1", "Q1?", "Q2", ""),
            record("Q2", "Q2?", "Q3", ""),
            record("Q3", "Q3?", "Q4", ""),
            record("Q4", "Q4?", "Q5", ""),
            record("Q5", "Q5?", "Q6", ""),
            record("Q6", "Q6?", "Q7", ""),
            record("Q7", "Q7?", "", ""),
            record("Q8", "Q8?", "", ""),
        ]);
        // Even though Q5 -> Q6 is a perfectly valid branch, turns 6 and 7
        // must go through the oracle.
        let oracle = ScriptedOracle::new([Ok("Q8?".to_string()), Ok("Q6?".to_string())]);
        let engine = InterviewEngine::new(&bank, &oracle, AdvisorMode::Career, 7);
        let mut prompter = ScriptedPrompter::all_yes();

        let history = engine.run("Q1", &mut prompter).await.unwrap();

        assert_eq!(
            questions(&history),
            vec!["Q1?", "Q2?", "Q3?", "Q4?", "Q5?", "Q8?", "Q6?"]
        );
        assert_eq!(oracle.call_count(), 2);
    }

    #[tokio::test]
    async fn test_mode_never_reverts_after_branching_failure() {
        let bank = bank(vec![
            record("Q1", "Q1?", "", ""),
            record("Q2", "Q2?", "Q3", ""),
            record("Q3", "Q3?", "", ""),
        ]);
        // Turn 1 dead-ends immediately; oracle then picks Q2, whose yes
        // branch to Q3 is valid — but branching stays abandoned, so turn 3
        // is another oracle selection.
        let oracle = ScriptedOracle::new([Ok("Q2?".to_string()), Ok("Q3?".to_string())]);
        let engine = InterviewEngine::new(&bank, &oracle, AdvisorMode::Career, 3);
        let mut prompter = ScriptedPrompter::all_yes();

        let history = engine.run("Q1", &mut prompter).await.unwrap();

        assert_eq!(questions(&history), vec!["Q1?", "Q2?", "Q3?"]);
        assert_eq!(oracle.call_count(), 2);
    }

    #[tokio::test]
    async fn test_pool_exhaustion_ends_below_the_minimum() {
        let bank = bank(vec![
            record("Q1", "Q1?", "Q2", ""),
            record("Q2", "Q2?", "Q1", ""),
        ]);
        let oracle = ScriptedOracle::failing();
        let engine = InterviewEngine::new(&bank, &oracle, AdvisorMode::Career, 5);
        let mut prompter = ScriptedPrompter::all_yes();

        let history = engine.run("Q1", &mut prompter).await.unwrap();

        // Q2's yes branch points back at the already-asked Q1; the pool is
        // empty by then, so the interview ends at two turns.
        assert_eq!(questions(&history), vec!["Q1?", "Q2?"]);
        assert_eq!(oracle.call_count(), 0);
    }

    #[tokio::test]
    async fn test_asked_guard_prevents_revisits_and_duplicates() {
        let bank = bank(vec![
            record("Q1", "Q1?", "Q2", ""),
            record("Q2", "Q2?", "Q1", ""),
            record("Q3", "Q3?", "", ""),
            record("Q4", "Q4?", "", ""),
        ]);
        let oracle = ScriptedOracle::new([Ok("Q3?".to_string()), Ok("Q4?".to_string())]);
        let engine = InterviewEngine::new(&bank, &oracle, AdvisorMode::Career, 4);
        let mut prompter = ScriptedPrompter::all_yes();

        let history = engine.run("Q1", &mut prompter).await.unwrap();

        let mut texts = questions(&history);
        assert_eq!(texts.len(), 4);
        texts.sort_unstable();
        texts.dedup();
        assert_eq!(texts.len(), 4, "a question was asked twice");
    }

    #[tokio::test]
    async fn test_oracle_failures_degrade_to_first_pool_entry() {
        let bank = bank(vec![
            record("Q1", "First?", "", ""),
            record("Q2", "Second?", "", ""),
        ]);
        let oracle = ScriptedOracle::failing();
        let engine = InterviewEngine::new(&bank, &oracle, AdvisorMode::Career, 2);
        let mut prompter = ScriptedPrompter::all_yes();

        // Unknown start id forces oracle mode from turn one; every call
        // fails, so selection walks the pool front-to-back.
        let history = engine.run("Q9", &mut prompter).await.unwrap();

        assert_eq!(questions(&history), vec!["First?", "Second?"]);
        assert_eq!(oracle.call_count(), 2);
    }

    #[tokio::test]
    async fn test_input_error_propagates() {
        let bank = bank(vec![record("Q1", "Q1?", "", "")]);
        let oracle = ScriptedOracle::failing();
        let engine = InterviewEngine::new(&bank, &oracle, AdvisorMode::Career, 1);
        let mut prompter = ScriptedPrompter::all_yes();
        prompter.fail_next = true;

        let err = engine.run("Q1", &mut prompter).await.unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
