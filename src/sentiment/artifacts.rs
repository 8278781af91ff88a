//! JSON artifact files for the vectorizer and classifier.

use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use super::{SentimentPredictor, TextVectorizer};
use crate::ml::logreg::LogRegModel;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid vectorizer {path}: {reason}")]
    InvalidVectorizer { path: PathBuf, reason: String },
    #[error("Invalid classifier {path}: {reason}")]
    InvalidClassifier { path: PathBuf, reason: String },
    #[error("Classifier expects {classifier} features but the vectorizer produces {vectorizer}")]
    DimensionMismatch { vectorizer: usize, classifier: usize },
    #[error("Failed to serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = std::fs::read(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and validate a vectorizer artifact.
pub fn load_vectorizer(path: &Path) -> Result<TextVectorizer, ArtifactError> {
    let vectorizer: TextVectorizer = load_json(path)?;
    vectorizer
        .validate()
        .map_err(|err| ArtifactError::InvalidVectorizer {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
    Ok(vectorizer)
}

/// Load and validate a classifier artifact.
pub fn load_classifier(path: &Path) -> Result<LogRegModel, ArtifactError> {
    let model: LogRegModel = load_json(path)?;
    model
        .validate()
        .map_err(|reason| ArtifactError::InvalidClassifier {
            path: path.to_path_buf(),
            reason,
        })?;
    Ok(model)
}

/// Load both artifacts and pair them into a predictor.
pub fn load_predictor(
    vectorizer_path: &Path,
    classifier_path: &Path,
) -> Result<SentimentPredictor, ArtifactError> {
    let vectorizer = load_vectorizer(vectorizer_path)?;
    let classifier = load_classifier(classifier_path)?;
    tracing::info!(
        vocabulary = vectorizer.dim(),
        classes = ?classifier.classes,
        "Loaded sentiment model"
    );
    SentimentPredictor::new(Box::new(vectorizer), Box::new(classifier))
}

/// Write an artifact as pretty JSON, creating parent directories as needed.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ArtifactError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ArtifactError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let bytes = serde_json::to_vec_pretty(value).map_err(|source| ArtifactError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, bytes).map_err(|source| ArtifactError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::{FitOptions, LabelClassifier};
    use tempfile::tempdir;

    fn fitted() -> (TextVectorizer, LogRegModel) {
        let vectorizer = TextVectorizer::fit(
            &["love this", "hate this"],
            &FitOptions {
                ngram_max: 1,
                ..FitOptions::default()
            },
        )
        .unwrap();
        let dim = vectorizer.dim();
        let model = LogRegModel {
            model_id: Some("test".into()),
            model_version: 1,
            feature_dim: dim,
            classes: vec!["negative".into(), "positive".into()],
            weights: vec![0.0; dim * 2],
            bias: vec![0.0, 0.0],
            temperature: 1.0,
        };
        (vectorizer, model)
    }

    #[test]
    fn saved_artifacts_load_into_a_predictor() {
        let dir = tempdir().unwrap();
        let (vectorizer, model) = fitted();
        let vec_path = dir.path().join("models").join("vectorizer.json");
        let model_path = dir.path().join("models").join("sentiment_model.json");
        save_json(&vec_path, &vectorizer).unwrap();
        save_json(&model_path, &model).unwrap();

        assert_eq!(load_vectorizer(&vec_path).unwrap(), vectorizer);
        assert_eq!(load_classifier(&model_path).unwrap().input_dim(), model.feature_dim);
        let predictor = load_predictor(&vec_path, &model_path).unwrap();
        assert_eq!(predictor.predict("love").confidence, 0.5);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempdir().unwrap();
        let err = load_vectorizer(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ArtifactError::Read { .. }));
    }

    #[test]
    fn incompatible_pair_is_rejected() {
        let dir = tempdir().unwrap();
        let (vectorizer, mut model) = fitted();
        model.feature_dim += 1;
        model.weights = vec![0.0; model.feature_dim * 2];
        let vec_path = dir.path().join("vectorizer.json");
        let model_path = dir.path().join("sentiment_model.json");
        save_json(&vec_path, &vectorizer).unwrap();
        save_json(&model_path, &model).unwrap();
        let err = load_predictor(&vec_path, &model_path).unwrap_err();
        assert!(matches!(err, ArtifactError::DimensionMismatch { .. }));
    }

    #[test]
    fn invalid_classifier_reports_reason() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sentiment_model.json");
        std::fs::write(
            &path,
            r#"{"model_version":1,"feature_dim":2,"classes":["a","b"],"weights":[1.0],"bias":[0.0,0.0]}"#,
        )
        .unwrap();
        let err = load_classifier(&path).unwrap_err();
        assert!(err.to_string().contains("weights length mismatch"));
    }
}
