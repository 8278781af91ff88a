//! CSV batch ingestion.
//!
//! The review column is located by probing [`REVIEW_COLUMNS`] in order against
//! the header row (exact, case-sensitive). Every non-blank cell in that column
//! is analyzed in row order. Ingestion is all-or-nothing: any read or parse
//! error aborts the batch and no records are returned.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;

use crate::record::ReviewRecord;
use crate::sentiment::SentimentPredictor;

/// Accepted review column headers, highest priority first.
pub const REVIEW_COLUMNS: &[&str] = &["Review", "Text", "review", "text"];

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV has no valid review column (expected one of: {})", REVIEW_COLUMNS.join(", "))]
    NoReviewColumn,
}

/// Index of the first accepted review column present in `headers`.
pub fn find_review_column(headers: &StringRecord) -> Option<(usize, &'static str)> {
    REVIEW_COLUMNS.iter().find_map(|&name| {
        headers
            .iter()
            .position(|header| header == name)
            .map(|idx| (idx, name))
    })
}

/// Read a CSV file and analyze every review in it.
pub fn ingest_csv(
    path: &Path,
    predictor: &SentimentPredictor,
) -> Result<Vec<ReviewRecord>, BatchError> {
    let file = File::open(path).map_err(|source| BatchError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let records = ingest_reader(file, predictor)?;
    tracing::info!(
        path = %path.display(),
        records = records.len(),
        "Ingested CSV batch"
    );
    Ok(records)
}

/// Analyze every review in CSV data read from `reader`.
pub fn ingest_reader<R: Read>(
    reader: R,
    predictor: &SentimentPredictor,
) -> Result<Vec<ReviewRecord>, BatchError> {
    read_review_texts(reader).map(|texts| {
        texts
            .iter()
            .map(|text| ReviewRecord::analyze(text, predictor))
            .collect()
    })
}

/// Collect the non-blank review cells without analyzing them.
pub fn read_review_texts<R: Read>(reader: R) -> Result<Vec<String>, BatchError> {
    let mut csv = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let headers = csv.headers()?.clone();
    let (column, name) = find_review_column(&headers).ok_or(BatchError::NoReviewColumn)?;
    tracing::debug!(column, name, "Using review column");

    let mut texts = Vec::new();
    for row in csv.records() {
        let row = row?;
        match row.get(column) {
            Some(cell) if !cell.trim().is_empty() => texts.push(cell.to_string()),
            _ => {}
        }
    }
    Ok(texts)
}
