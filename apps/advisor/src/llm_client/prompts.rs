// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt used for every oracle call. Output is consumed by
/// membership checks and a positional field scanner, so the answer has to
/// stay plain text in the requested shape.
pub const ADVISOR_SYSTEM: &str = "You are a pragmatic career and skills advisor. \
    Respond with plain text only — no markdown fences, no preamble, no apologies. \
    When asked to pick from a list, output exactly one entry verbatim. \
    When asked for labeled fields, keep each label on its own line.";
