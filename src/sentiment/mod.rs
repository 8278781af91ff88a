//! Sentiment prediction behind two narrow capabilities.
//!
//! A [`TextEmbedder`] turns raw text into a feature vector and a
//! [`LabelClassifier`] maps that vector to a label. [`SentimentPredictor`]
//! pairs them after checking that their dimensions agree, so a concrete
//! statistical backend can be swapped without touching callers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ml::{argmax, logreg::LogRegModel};

mod artifacts;
pub mod training;
pub mod vectorizer;

pub use artifacts::{ArtifactError, load_classifier, load_predictor, load_vectorizer, save_json};
pub use vectorizer::{FitOptions, Norm, TextVectorizer, VectorizerError};

/// Text -> feature vector.
pub trait TextEmbedder {
    /// Length of every vector returned by [`TextEmbedder::embed`].
    fn dim(&self) -> usize;
    fn embed(&self, text: &str) -> Vec<f32>;
}

/// Feature vector -> label.
pub trait LabelClassifier {
    /// Length of the feature vectors this classifier accepts.
    fn input_dim(&self) -> usize;
    fn classify(&self, features: &[f32]) -> Prediction;
}

/// Classifier output for a single input.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    /// Probability of `label`, `0.0` when the classifier cannot score the input.
    pub confidence: f32,
}

impl LabelClassifier for LogRegModel {
    fn input_dim(&self) -> usize {
        self.feature_dim
    }

    fn classify(&self, features: &[f32]) -> Prediction {
        let proba = self.predict_proba(features);
        let idx = argmax(&proba);
        Prediction {
            label: self.classes.get(idx).cloned().unwrap_or_default(),
            confidence: proba.get(idx).copied().unwrap_or(0.0),
        }
    }
}

/// Sentiment label as produced by the model (e.g. `positive`, `negative`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sentiment(String);

impl Sentiment {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Raw model label.
    pub fn label(&self) -> &str {
        &self.0
    }

    /// Only the `positive` label (any ASCII case) counts as positive polarity.
    pub fn is_positive(&self) -> bool {
        self.0.eq_ignore_ascii_case("positive")
    }

    /// Label with its first character uppercased, as shown to the user.
    pub fn display_label(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_label())
    }
}

/// Embedder + classifier pair, loaded once and reused for the process lifetime.
pub struct SentimentPredictor {
    embedder: Box<dyn TextEmbedder>,
    classifier: Box<dyn LabelClassifier>,
}

impl fmt::Debug for SentimentPredictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentimentPredictor")
            .field("dim", &self.embedder.dim())
            .finish()
    }
}

impl SentimentPredictor {
    /// Pair an embedder with a classifier, rejecting incompatible dimensions.
    pub fn new(
        embedder: Box<dyn TextEmbedder>,
        classifier: Box<dyn LabelClassifier>,
    ) -> Result<Self, ArtifactError> {
        let (vectorizer, classifier_dim) = (embedder.dim(), classifier.input_dim());
        if vectorizer != classifier_dim {
            return Err(ArtifactError::DimensionMismatch {
                vectorizer,
                classifier: classifier_dim,
            });
        }
        Ok(Self {
            embedder,
            classifier,
        })
    }

    /// Full prediction including the classifier confidence.
    pub fn predict(&self, text: &str) -> Prediction {
        self.classifier.classify(&self.embedder.embed(text))
    }

    pub fn predict_sentiment(&self, text: &str) -> Sentiment {
        let prediction = self.predict(text);
        tracing::debug!(
            label = %prediction.label,
            confidence = prediction.confidence,
            "Predicted sentiment"
        );
        Sentiment::new(prediction.label)
    }
}


#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Tiny deterministic predictor: "love"/"great" read positive, "hate"/"awful" negative.
    pub(crate) fn keyword_predictor() -> SentimentPredictor {
        let vectorizer = TextVectorizer::fit(
            &["awful great hate love"],
            &FitOptions {
                ngram_max: 1,
                use_idf: false,
                norm: Norm::None,
                ..FitOptions::default()
            },
        )
        .expect("fit keyword vectorizer");
        // Columns are alphabetical: awful, great, hate, love.
        let model = LogRegModel {
            model_id: None,
            model_version: 1,
            feature_dim: 4,
            classes: vec!["negative".into(), "positive".into()],
            weights: vec![1.0, -1.0, 1.0, -1.0, -1.0, 1.0, -1.0, 1.0],
            bias: vec![0.1, 0.0],
            temperature: 1.0,
        };
        SentimentPredictor::new(Box::new(vectorizer), Box::new(model)).expect("compatible pair")
    }
}
