//! Console collaborators — answer collection and final report display.
//!
//! The engine never talks to stdin/stdout directly; it goes through the
//! `Prompter` trait so interviews can be driven by scripted answers in tests.

use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::interview::AdvisorMode;
use crate::market::MarketReport;

/// A normalized yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    /// Upper-cased form used when replaying history into oracle prompts.
    pub fn as_prompt_str(&self) -> &'static str {
        match self {
            Answer::Yes => "YES",
            Answer::No => "NO",
        }
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, Answer::Yes)
    }

    /// Parses free-form yes/no style input. Trims and lowercases; accepts
    /// the short forms `y`/`n`. Returns `None` for anything unrecognized so
    /// the caller can decide how to degrade.
    pub fn from_input(input: &str) -> Option<Answer> {
        match input.trim().to_lowercase().as_str() {
            "yes" | "y" => Some(Answer::Yes),
            "no" | "n" => Some(Answer::No),
            _ => None,
        }
    }
}

/// Collects one yes/no answer per question.
pub trait Prompter {
    fn ask(&mut self, question: &str) -> io::Result<Answer>;
}

/// Interactive prompter reading from stdin.
///
/// Unrecognized input is coerced to `No` with a warning — never an error.
/// A closed input stream is unrecoverable and propagates.
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn ask(&mut self, question: &str) -> io::Result<Answer> {
        let mut stdout = io::stdout();
        write!(stdout, "{question} (yes/no): ")?;
        stdout.flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before the interview finished",
            ));
        }

        Ok(Answer::from_input(&line).unwrap_or_else(|| {
            warn!(
                "unrecognized answer {:?}, please answer 'yes' or 'no' — using 'no'",
                line.trim()
            );
            Answer::No
        }))
    }
}

/// Renders the final recommendation and market report.
pub fn print_report(mode: AdvisorMode, recommendation: &str, report: &MarketReport) {
    println!("\nRecommended {}: {recommendation}", mode.display_noun());
    println!("\nMarket Insights:");
    println!("  Demand: {}", report.demand);
    println!("  Top Skills: {}", report.top_skills);
    println!("  Salary Range (USD): {}", report.salary_range);
    println!("  Market Alignment: {}", report.market_alignment);
    println!("\nDetails:\n{}", report.raw_output);
}
