//! Evaluation metrics for classification models.

/// Confusion matrix for a `K`-class classifier.
#[derive(Debug, Clone)]
pub struct ConfusionMatrix {
    /// Number of classes.
    pub n_classes: usize,
    /// Row-major `KxK` counts (`truth * K + predicted`).
    pub counts: Vec<u32>,
}

impl ConfusionMatrix {
    /// Create an empty `KxK` confusion matrix.
    pub fn new(n_classes: usize) -> Self {
        Self {
            n_classes,
            counts: vec![0; n_classes * n_classes],
        }
    }

    pub fn add(&mut self, truth: usize, predicted: usize) {
        if truth >= self.n_classes || predicted >= self.n_classes {
            return;
        }
        let idx = truth * self.n_classes + predicted;
        self.counts[idx] = self.counts[idx].saturating_add(1);
    }

    pub fn get(&self, truth: usize, predicted: usize) -> u32 {
        self.counts[truth * self.n_classes + predicted]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&v| v as u64).sum()
    }
}

/// Precision/recall statistics for a single class.
#[derive(Debug, Clone, PartialEq)]
pub struct PerClassStats {
    /// `TP / (TP + FP)`.
    pub precision: f32,
    /// `TP / (TP + FN)`.
    pub recall: f32,
    /// Total number of true examples for the class.
    pub support: u32,
}

impl PerClassStats {
    /// Harmonic mean of precision and recall.
    pub fn f1(&self) -> f32 {
        if self.precision + self.recall == 0.0 {
            0.0
        } else {
            2.0 * self.precision * self.recall / (self.precision + self.recall)
        }
    }
}

/// Compute per-class precision and recall from a confusion matrix.
pub fn precision_recall_by_class(cm: &ConfusionMatrix) -> Vec<PerClassStats> {
    let k = cm.n_classes;
    (0..k)
        .map(|class_idx| {
            let tp = cm.get(class_idx, class_idx) as f32;
            let support: u32 = (0..k).map(|j| cm.get(class_idx, j)).sum();
            let predicted: u32 = (0..k).map(|i| cm.get(i, class_idx)).sum();
            let precision = if predicted == 0 {
                0.0
            } else {
                tp / predicted as f32
            };
            let recall = if support == 0 {
                0.0
            } else {
                tp / support as f32
            };
            PerClassStats {
                precision,
                recall,
                support,
            }
        })
        .collect()
}

/// Compute overall accuracy from a confusion matrix.
pub fn accuracy(cm: &ConfusionMatrix) -> f32 {
    let total = cm.total();
    if total == 0 {
        return 0.0;
    }
    let correct: u64 = (0..cm.n_classes).map(|i| cm.get(i, i) as u64).sum();
    correct as f32 / total as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_and_per_class_stats() {
        let mut cm = ConfusionMatrix::new(2);
        cm.add(0, 0);
        cm.add(0, 0);
        cm.add(0, 1);
        cm.add(1, 1);
        cm.add(5, 0);
        assert_eq!(cm.total(), 4);
        assert!((accuracy(&cm) - 0.75).abs() < 1e-6);

        let stats = precision_recall_by_class(&cm);
        assert_eq!(stats[0].support, 3);
        assert!((stats[0].precision - 1.0).abs() < 1e-6);
        assert!((stats[0].recall - 2.0 / 3.0).abs() < 1e-6);
        assert!((stats[1].precision - 0.5).abs() < 1e-6);
        assert!((stats[1].f1() - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn empty_matrix_has_zero_accuracy() {
        assert_eq!(accuracy(&ConfusionMatrix::new(3)), 0.0);
    }
}
