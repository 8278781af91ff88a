//! Logistic regression classifier for text feature vectors.

use serde::{Deserialize, Serialize};

use crate::ml::{argmax, softmax};

mod train;
pub use train::{TrainDataset, TrainOptions, train_logreg};

/// Current on-disk format version.
pub const LOGREG_MODEL_VERSION: i64 = 1;

/// Versioned multinomial logistic regression model.
///
/// `weights` is row-major with one row of `feature_dim` values per class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRegModel {
    #[serde(default)]
    pub model_id: Option<String>,
    pub model_version: i64,
    pub feature_dim: usize,
    pub classes: Vec<String>,
    pub weights: Vec<f32>,
    pub bias: Vec<f32>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_temperature() -> f32 {
    1.0
}

impl LogRegModel {
    /// Validate the model dimensions.
    pub fn validate(&self) -> Result<(), String> {
        if self.model_version != LOGREG_MODEL_VERSION {
            return Err(format!(
                "Unsupported model_version {} (expected {})",
                self.model_version, LOGREG_MODEL_VERSION
            ));
        }
        if self.feature_dim == 0 {
            return Err("feature_dim must be > 0".to_string());
        }
        let classes = self.classes.len();
        if classes < 2 {
            return Err("Model must contain at least 2 classes".to_string());
        }
        if self.weights.len() != classes * self.feature_dim {
            return Err(format!(
                "weights length mismatch: {} (expected {})",
                self.weights.len(),
                classes * self.feature_dim
            ));
        }
        if self.bias.len() != classes {
            return Err("bias length mismatch".to_string());
        }
        if !self.temperature.is_finite() || self.temperature <= 0.0 {
            return Err("temperature must be > 0".to_string());
        }
        Ok(())
    }

    /// Raw per-class scores before softmax.
    pub fn logits(&self, features: &[f32]) -> Vec<f32> {
        if features.len() != self.feature_dim {
            return Vec::new();
        }
        let temp = self.temperature.max(1e-6);
        self.weights
            .chunks_exact(self.feature_dim)
            .zip(&self.bias)
            .map(|(row, bias)| {
                let dot: f32 = row.iter().zip(features).map(|(w, x)| w * x).sum();
                (dot + bias) / temp
            })
            .collect()
    }

    /// Compute class probabilities for a single feature vector.
    ///
    /// Returns an empty vector when the input length does not match `feature_dim`.
    pub fn predict_proba(&self, features: &[f32]) -> Vec<f32> {
        softmax(&self.logits(features))
    }

    /// Return the argmax class index for the given features.
    pub fn predict_class_index(&self, features: &[f32]) -> usize {
        argmax(&self.predict_proba(features))
    }
}
