mod config;
mod console;
mod errors;
mod interview;
mod llm_client;
mod market;
mod questions;
mod recommend;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::console::StdinPrompter;
use crate::interview::engine::InterviewEngine;
use crate::interview::AdvisorMode;
use crate::llm_client::LlmClient;
use crate::questions::QuestionBank;

#[derive(Parser)]
#[command(
    name = "advisor",
    about = "Adaptive yes/no interview for career and skills recommendations",
    version
)]
struct Cli {
    /// What to advise on
    #[arg(value_enum)]
    mode: AdvisorMode,

    /// Question CSV to interview from (defaults to the built-in file for the mode)
    #[arg(short, long)]
    questions: Option<PathBuf>,

    /// Question id to start the interview at (defaults to Q1/S1 for the mode)
    #[arg(short, long)]
    start: Option<String>,

    /// Minimum number of questions to ask before recommending
    #[arg(short, long, default_value_t = 10)]
    min_questions: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (fails fast on a missing API key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Advisor v{}", env!("CARGO_PKG_VERSION"));

    // Load the question source — malformed sources are fatal with a
    // user-facing diagnostic, nothing else is.
    let questions_path = cli
        .questions
        .unwrap_or_else(|| PathBuf::from(cli.mode.default_questions_path()));
    let bank = QuestionBank::load(&questions_path)?;
    info!(
        "Loaded {} questions from {}",
        bank.records().len(),
        questions_path.display()
    );

    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let start_id = cli
        .start
        .unwrap_or_else(|| cli.mode.default_start_id().to_string());

    let engine = InterviewEngine::new(&bank, &llm, cli.mode, cli.min_questions);
    let mut prompter = StdinPrompter;
    let history = engine.run(&start_id, &mut prompter).await?;

    let recommendation = recommend::synthesize(&history, cli.mode, &llm).await;
    let report = market::fetch_market_report(&recommendation, &llm).await;

    console::print_report(cli.mode, &recommendation, &report);

    Ok(())
}
