//! Market report — fetches a market-trend analysis for a recommendation
//! and scans the free-text response into four labeled fields.
//!
//! The extractor is a positional substring scan: labels are searched in a
//! fixed order, each search starting where the previous extraction ended.
//! That keeps a label name reappearing inside later free text from
//! re-matching, but it is inherently order-sensitive — a label that only
//! occurs before the cursor is reported unavailable. Known sharp edge,
//! kept as-is; see DESIGN.md for the structured-output alternative.

pub mod prompts;

use tracing::warn;

use crate::llm_client::Oracle;

/// Sentinel for any field that could not be determined.
pub const UNAVAILABLE: &str = "N/A";

pub(crate) const DEMAND_LABEL: &str = "Market Demand";
pub(crate) const TOP_SKILLS_LABEL: &str = "Top Skills";
pub(crate) const SALARY_LABEL: &str = "Expected Salary Range";
pub(crate) const ALIGNMENT_LABEL: &str = "Aligns with Market Trends";

/// Extraction order. Also the order the oracle is asked to emit.
const LABELS: [&str; 4] = [
    DEMAND_LABEL,
    TOP_SKILLS_LABEL,
    SALARY_LABEL,
    ALIGNMENT_LABEL,
];

/// Structured market-trend report. Semantic fields hold the `UNAVAILABLE`
/// sentinel unless extraction succeeded for them; `raw_output` always holds
/// the complete untouched oracle response (or a failure description when
/// the call itself failed).
#[derive(Debug, Clone, PartialEq)]
pub struct MarketReport {
    pub demand: String,
    pub top_skills: String,
    pub salary_range: String,
    pub market_alignment: String,
    pub raw_output: String,
}

impl MarketReport {
    /// All four semantic fields at the sentinel.
    pub fn unavailable(raw_output: String) -> Self {
        Self {
            demand: UNAVAILABLE.to_string(),
            top_skills: UNAVAILABLE.to_string(),
            salary_range: UNAVAILABLE.to_string(),
            market_alignment: UNAVAILABLE.to_string(),
            raw_output,
        }
    }
}

/// Asks the oracle for a market-trend analysis of `recommendation` and
/// extracts the labeled fields. A failed call degrades to a fully
/// unavailable report whose raw output describes the failure.
pub async fn fetch_market_report(recommendation: &str, oracle: &dyn Oracle) -> MarketReport {
    let prompt = prompts::market_trend_prompt(recommendation);
    match oracle.complete(&prompt).await {
        Ok(text) => extract(&text),
        Err(e) => {
            warn!("error fetching market trends: {e}");
            MarketReport::unavailable(format!("market trend lookup failed: {e}"))
        }
    }
}

/// Scans `raw` for the four labels, in order.
///
/// For each label found at or after the cursor, the value spans from just
/// after `"<label>:"` to the earliest of: the next blank-line separator,
/// the start of any later label (searched from one byte past the current
/// match, so a label cannot match itself), or the end of text. The cursor
/// then advances to the end of the extracted span; a missing label leaves
/// the cursor where it was. Pure and idempotent.
pub fn extract(raw: &str) -> MarketReport {
    let mut values: [Option<String>; 4] = Default::default();
    let mut cursor = 0usize;

    for (index, label) in LABELS.iter().enumerate() {
        let needle = format!("{label}:");
        let Some(offset) = raw[cursor..].find(&needle) else {
            continue;
        };
        let start = cursor + offset;
        let value_start = start + needle.len();

        let mut end = raw[start..].find("\n\n").map_or(raw.len(), |o| start + o);
        for later in &LABELS[index + 1..] {
            let later_needle = format!("{later}:");
            if let Some(o) = raw[start + 1..].find(&later_needle) {
                end = end.min(start + 1 + o);
            }
        }
        let end = end.max(value_start);

        values[index] = Some(raw[value_start..end].trim().to_string());
        cursor = end;
    }

    let [demand, top_skills, salary_range, market_alignment] = values;
    let sentinel = || UNAVAILABLE.to_string();
    MarketReport {
        demand: demand.unwrap_or_else(sentinel),
        top_skills: top_skills.unwrap_or_else(sentinel),
        salary_range: salary_range.unwrap_or_else(sentinel),
        market_alignment: market_alignment.unwrap_or_else(sentinel),
        raw_output: raw.to_string(),
    }
}
