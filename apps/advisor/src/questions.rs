//! Question source — CSV-backed question records with yes/no branch links.
//!
//! Schema: `QuestionID,Question,NextIfYes,NextIfNo` (extra columns are
//! ignored). Identifiers look like `Q1` or `S12`; rows with any other id
//! are filtered out at load time. Branch targets may dangle — the engine
//! treats a dangling target as "no such branch".

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;

/// One row of the question source.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionRecord {
    #[serde(rename = "QuestionID")]
    pub id: String,
    #[serde(rename = "Question")]
    pub text: String,
    #[serde(rename = "NextIfYes", default)]
    pub next_if_yes: String,
    #[serde(rename = "NextIfNo", default)]
    pub next_if_no: String,
}

/// Ordered question records with id and text lookups.
#[derive(Debug)]
pub struct QuestionBank {
    records: Vec<QuestionRecord>,
    by_id: HashMap<String, usize>,
    by_text: HashMap<String, usize>,
}

impl QuestionBank {
    /// Loads and validates a question CSV.
    ///
    /// Fatal (`SourceFormat`) when the file is unreadable, a required column
    /// is missing, a row is malformed, or no row carries a valid id.
    pub fn load(path: &Path) -> Result<QuestionBank, AppError> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            AppError::SourceFormat(format!("cannot read {}: {e}", path.display()))
        })?;

        let headers = reader
            .headers()
            .map_err(|e| AppError::SourceFormat(format!("cannot read CSV header: {e}")))?
            .clone();
        for required in ["QuestionID", "Question"] {
            if !headers.iter().any(|h| h == required) {
                return Err(AppError::SourceFormat(format!(
                    "CSV file must contain a '{required}' column"
                )));
            }
        }

        let mut records = Vec::new();
        for row in reader.deserialize::<QuestionRecord>() {
            let record = row.map_err(|e| {
                AppError::SourceFormat(format!(
                    "malformed CSV row — make sure every row has the correct number \
                     of columns and questions with commas are quoted: {e}"
                ))
            })?;
            if is_valid_id(&record.id) {
                records.push(record);
            } else {
                debug!("skipping row with invalid question id {:?}", record.id);
            }
        }

        Self::from_records(records)
    }

    /// Builds a bank from already-validated records. Empty input is a
    /// `SourceFormat` error; first occurrence wins for duplicate ids/texts.
    pub fn from_records(records: Vec<QuestionRecord>) -> Result<QuestionBank, AppError> {
        if records.is_empty() {
            return Err(AppError::SourceFormat(
                "no valid QuestionIDs found (must be like Q1, S1, etc.)".to_string(),
            ));
        }

        let mut by_id = HashMap::new();
        let mut by_text = HashMap::new();
        for (index, record) in records.iter().enumerate() {
            by_id.entry(record.id.clone()).or_insert(index);
            by_text.entry(record.text.clone()).or_insert(index);
        }

        Ok(QuestionBank {
            records,
            by_id,
            by_text,
        })
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    pub fn find_by_id(&self, id: &str) -> Option<&QuestionRecord> {
        self.by_id.get(id).map(|&index| &self.records[index])
    }

    pub fn find_by_text(&self, text: &str) -> Option<&QuestionRecord> {
        self.by_text.get(text).map(|&index| &self.records[index])
    }

    /// Distinct question texts in source order — the initial interview pool.
    pub fn question_texts(&self) -> Vec<String> {
        let mut seen = HashMap::new();
        let mut texts = Vec::new();
        for record in &self.records {
            if seen.insert(record.text.as_str(), ()).is_none() {
                texts.push(record.text.clone());
            }
        }
        texts
    }
}

/// `Q` or `S` followed by one or more digits.
fn is_valid_id(id: &str) -> bool {
    let mut chars = id.chars();
    if !matches!(chars.next(), Some('Q' | 'S')) {
        return false;
    }
    let rest = chars.as_str();
    !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit())
}
