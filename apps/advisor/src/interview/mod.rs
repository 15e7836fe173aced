// Adaptive interview — branching-tree questioning with oracle fallback.
// All LLM calls go through llm_client — no direct API calls here.

pub mod engine;
pub mod prompts;
pub mod selector;

use clap::ValueEnum;

/// What the interview advises on. Drives prompt wording and the default
/// question source for each mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AdvisorMode {
    Career,
    Skills,
}

impl AdvisorMode {
    /// Lower-case noun used inside oracle prompts ("career advisor", "suggest a suitable skill").
    pub fn role_noun(&self) -> &'static str {
        match self {
            AdvisorMode::Career => "career",
            AdvisorMode::Skills => "skill",
        }
    }

    /// Capitalized noun for the final display.
    pub fn display_noun(&self) -> &'static str {
        match self {
            AdvisorMode::Career => "Career",
            AdvisorMode::Skills => "Skill",
        }
    }

    pub fn default_start_id(&self) -> &'static str {
        match self {
            AdvisorMode::Career => "Q1",
            AdvisorMode::Skills => "S1",
        }
    }

    pub fn default_questions_path(&self) -> &'static str {
        match self {
            AdvisorMode::Career => "data/career_questions.csv",
            AdvisorMode::Skills => "data/skills_questions.csv",
        }
    }
}
