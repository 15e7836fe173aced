#![allow(dead_code)]

use thiserror::Error;

use crate::llm_client::OracleError;

/// Application-level error type.
///
/// Propagation policy: only `SourceFormat` and `Io` are fatal. Oracle
/// failures are always recovered locally with a deterministic fallback and
/// surface to the user as warnings, never as process exits.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Question source error: {0}")]
    SourceFormat(String),

    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("Question selection requested with an empty pool")]
    EmptyPool,

    #[error("Input error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
