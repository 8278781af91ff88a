//! Fit a vectorizer + classifier pair from a labeled review CSV.
//!
//! Rows are assigned to the held-out split by hashing their text, so the split
//! is stable across runs and independent of row order.

use std::collections::BTreeSet;
use std::io::Read;

use csv::ReaderBuilder;
use thiserror::Error;

use super::vectorizer::{FitOptions, TextVectorizer, VectorizerError};
use crate::batch::{REVIEW_COLUMNS, find_review_column};
use crate::ml::logreg::{LogRegModel, TrainDataset, TrainOptions, train_logreg};
use crate::ml::metrics::ConfusionMatrix;

/// Accepted label column headers, compared case-insensitively.
pub const LABEL_COLUMNS: &[&str] = &["sentiment", "label"];

#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV has no review column (expected one of: {})", REVIEW_COLUMNS.join(", "))]
    NoTextColumn,
    #[error("CSV has no label column (expected one of: {})", LABEL_COLUMNS.join(", "))]
    NoLabelColumn,
    #[error("Training split is empty")]
    EmptyTrainingSet,
    #[error("At least 2 distinct labels are required, found {0}")]
    TooFewClasses(usize),
    #[error(transparent)]
    Vectorizer(#[from] VectorizerError),
    #[error("Training failed: {0}")]
    Train(String),
}

/// One labeled training example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledReview {
    pub text: String,
    pub label: String,
}

/// Read `(text, label)` pairs, skipping rows where either cell is blank.
pub fn read_labeled_csv<R: Read>(reader: R) -> Result<Vec<LabeledReview>, TrainingError> {
    let mut csv = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let headers = csv.headers()?.clone();
    let (text_col, _) = find_review_column(&headers).ok_or(TrainingError::NoTextColumn)?;
    let label_col = LABEL_COLUMNS
        .iter()
        .find_map(|name| {
            headers
                .iter()
                .position(|header| header.eq_ignore_ascii_case(name))
        })
        .ok_or(TrainingError::NoLabelColumn)?;

    let mut rows = Vec::new();
    for row in csv.records() {
        let row = row?;
        let (Some(text), Some(label)) = (row.get(text_col), row.get(label_col)) else {
            continue;
        };
        let label = label.trim();
        if text.trim().is_empty() || label.is_empty() {
            continue;
        }
        rows.push(LabeledReview {
            text: text.to_string(),
            label: label.to_lowercase(),
        });
    }
    Ok(rows)
}

/// Stable value in `[0, 1]` derived from the review text.
pub fn split_u01(text: &str) -> f64 {
    let hash = blake3::hash(format!("revsense-split-v1|{text}").as_bytes());
    let bytes = hash.as_bytes();
    let mut head = [0u8; 8];
    head.copy_from_slice(&bytes[0..8]);
    u64::from_le_bytes(head) as f64 / u64::MAX as f64
}

/// Partition into `(train, test)`; a row is held out when its hash falls below `test_fraction`.
pub fn split_by_hash(
    rows: Vec<LabeledReview>,
    test_fraction: f64,
) -> (Vec<LabeledReview>, Vec<LabeledReview>) {
    rows.into_iter()
        .partition(|row| split_u01(&row.text) >= test_fraction)
}

/// Fitted artifacts plus the class order used by the classifier.
#[derive(Debug, Clone)]
pub struct TrainedArtifacts {
    pub vectorizer: TextVectorizer,
    pub model: LogRegModel,
}

impl TrainedArtifacts {
    pub fn predict_label(&self, text: &str) -> &str {
        let idx = self
            .model
            .predict_class_index(&self.vectorizer.transform(text));
        self.model.classes.get(idx).map(String::as_str).unwrap_or("")
    }

    /// Confusion matrix over `rows`; rows with labels unknown to the model are skipped.
    pub fn evaluate(&self, rows: &[LabeledReview]) -> ConfusionMatrix {
        let mut cm = ConfusionMatrix::new(self.model.classes.len());
        for row in rows {
            let Some(truth) = self.model.classes.iter().position(|c| *c == row.label) else {
                continue;
            };
            let features = self.vectorizer.transform(&row.text);
            cm.add(truth, self.model.predict_class_index(&features));
        }
        cm
    }
}

/// Fit the vectorizer on `train`, then the classifier on its features.
pub fn train_artifacts(
    train: &[LabeledReview],
    fit: &FitOptions,
    options: &TrainOptions,
) -> Result<TrainedArtifacts, TrainingError> {
    if train.is_empty() {
        return Err(TrainingError::EmptyTrainingSet);
    }
    let classes: Vec<String> = train
        .iter()
        .map(|row| row.label.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    if classes.len() < 2 {
        return Err(TrainingError::TooFewClasses(classes.len()));
    }
    let texts: Vec<&str> = train.iter().map(|row| row.text.as_str()).collect();
    let vectorizer = TextVectorizer::fit(&texts, fit)?;
    tracing::info!(
        rows = train.len(),
        vocabulary = vectorizer.dim(),
        classes = classes.len(),
        "Fitted vectorizer"
    );

    let dataset = TrainDataset {
        x: texts.iter().map(|text| vectorizer.transform(text)).collect(),
        y: train
            .iter()
            .map(|row| classes.iter().position(|c| *c == row.label).unwrap_or(0))
            .collect(),
        classes,
    };
    let mut model = train_logreg(&dataset, options).map_err(TrainingError::Train)?;
    let digest = blake3::hash(texts.join("\n").as_bytes()).to_hex();
    model.model_id = Some(format!("revsense-logreg-{}", &digest.as_str()[..12]));
    Ok(TrainedArtifacts { vectorizer, model })
}
