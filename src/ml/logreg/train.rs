use rand::rngs::StdRng;
use rand::{Rng, SeedableRng, seq::SliceRandom};

use super::{LOGREG_MODEL_VERSION, LogRegModel};
use crate::ml::softmax;

/// Training options for the logistic regression head.
#[derive(Debug, Clone)]
pub struct TrainOptions {
    pub epochs: usize,
    pub learning_rate: f32,
    pub l2: f32,
    pub batch_size: usize,
    pub seed: u64,
    pub balance_classes: bool,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            epochs: 30,
            learning_rate: 0.5,
            l2: 1e-4,
            batch_size: 32,
            seed: 42,
            balance_classes: true,
        }
    }
}

/// In-memory training dataset for logreg models.
#[derive(Debug, Clone)]
pub struct TrainDataset {
    pub classes: Vec<String>,
    pub x: Vec<Vec<f32>>,
    pub y: Vec<usize>,
}

/// Fit a multinomial logistic regression with mini-batch gradient descent.
pub fn train_logreg(dataset: &TrainDataset, options: &TrainOptions) -> Result<LogRegModel, String> {
    if dataset.x.is_empty() || dataset.y.is_empty() {
        return Err("Empty training set".to_string());
    }
    if dataset.x.len() != dataset.y.len() {
        return Err("Mismatched training inputs/labels".to_string());
    }
    let classes = dataset.classes.len();
    if classes < 2 {
        return Err("At least 2 classes are required for training".to_string());
    }
    let dim = dataset.x[0].len();
    if dim == 0 {
        return Err("Feature vectors are empty".to_string());
    }
    if dataset.x.iter().any(|row| row.len() != dim) {
        return Err("Inconsistent feature row length".to_string());
    }

    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut weights: Vec<f32> = (0..classes * dim)
        .map(|_| (rng.random::<f32>() - 0.5) * 0.01)
        .collect();
    let mut bias = vec![0.0f32; classes];
    let class_weights = class_weights(&dataset.y, classes, options.balance_classes);

    let mut indices: Vec<usize> = (0..dataset.x.len()).collect();
    let batch_size = options.batch_size.max(1);
    let lr = options.learning_rate;
    let l2 = options.l2.max(0.0);

    for _epoch in 0..options.epochs {
        indices.shuffle(&mut rng);
        for chunk in indices.chunks(batch_size) {
            let mut grad_w = vec![0.0f32; weights.len()];
            let mut grad_b = vec![0.0f32; classes];
            let mut batch_weight = 0.0f32;
            for &idx in chunk {
                let x = &dataset.x[idx];
                let y = dataset.y[idx];
                let Some(&weight) = class_weights.get(y) else {
                    continue;
                };
                if weight == 0.0 {
                    continue;
                }
                let logits: Vec<f32> = weights
                    .chunks_exact(dim)
                    .zip(&bias)
                    .map(|(row, b)| row.iter().zip(x).map(|(w, v)| w * v).sum::<f32>() + b)
                    .collect();
                let probs = softmax(&logits);
                for c in 0..classes {
                    let diff = (probs[c] - if c == y { 1.0 } else { 0.0 }) * weight;
                    let base = c * dim;
                    for (i, &v) in x.iter().enumerate() {
                        grad_w[base + i] += diff * v;
                    }
                    grad_b[c] += diff;
                }
                batch_weight += weight;
            }
            if batch_weight == 0.0 {
                continue;
            }
            let inv = 1.0 / batch_weight;
            for (w, g) in weights.iter_mut().zip(&grad_w) {
                *w -= lr * (g * inv + l2 * *w);
            }
            for (b, g) in bias.iter_mut().zip(&grad_b) {
                *b -= lr * g * inv;
            }
        }
    }

    let model = LogRegModel {
        model_id: None,
        model_version: LOGREG_MODEL_VERSION,
        feature_dim: dim,
        classes: dataset.classes.clone(),
        weights,
        bias,
        temperature: 1.0,
    };
    model.validate()?;
    Ok(model)
}

fn class_weights(labels: &[usize], classes: usize, balance: bool) -> Vec<f32> {
    if !balance {
        return vec![1.0; classes];
    }
    let mut counts = vec![0f32; classes];
    for &y in labels {
        if let Some(count) = counts.get_mut(y) {
            *count += 1.0;
        }
    }
    let total: f32 = counts.iter().sum();
    counts
        .into_iter()
        .map(|count| {
            if count == 0.0 {
                0.0
            } else {
                total / (classes as f32 * count)
            }
        })
        .collect()
}
