//! Prompt builder for the market-trend analysis call.

use crate::market::{ALIGNMENT_LABEL, DEMAND_LABEL, SALARY_LABEL, TOP_SKILLS_LABEL};

/// The labels requested here are the same constants the extractor scans
/// for, in the same order.
pub(crate) fn market_trend_prompt(recommendation: &str) -> String {
    format!(
        "Analyze market trends for the {recommendation}. Provide:\n\
         - {DEMAND_LABEL}: high/medium/low with brief explanation\n\
         - {TOP_SKILLS_LABEL}: 3-5 skills\n\
         - {SALARY_LABEL}: entry-level to experienced, in USD\n\
         - {ALIGNMENT_LABEL}: yes/no with brief explanation"
    )
}
