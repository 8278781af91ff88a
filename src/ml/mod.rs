//! Machine learning helpers for training and inference.
//!
//! Small, dependency-free building blocks: a multinomial logistic regression
//! head over dense text feature vectors and the metrics used to evaluate it.

pub mod logreg;
pub mod metrics;

/// Compute a numerically-stable softmax for a set of logits.
pub fn softmax(raw: &[f32]) -> Vec<f32> {
    if raw.is_empty() {
        return Vec::new();
    }
    let max = raw
        .iter()
        .copied()
        .fold(f32::NEG_INFINITY, |a, b| a.max(b));
    let mut exps: Vec<f32> = raw.iter().map(|&v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if sum == 0.0 || !sum.is_finite() {
        return vec![1.0 / raw.len() as f32; raw.len()];
    }
    for v in &mut exps {
        *v /= sum;
    }
    exps
}

/// Index of the largest value; the first one wins on ties.
pub fn argmax(values: &[f32]) -> usize {
    let mut best = 0usize;
    let mut best_val = f32::NEG_INFINITY;
    for (idx, &val) in values.iter().enumerate() {
        if val > best_val {
            best_val = val;
            best = idx;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn softmax_sums_to_one_and_keeps_order() {
        let out = softmax(&[1.0, 3.0, 2.0]);
        let sum: f32 = out.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert!(out[1] > out[2] && out[2] > out[0]);
    }

    #[test]
    fn softmax_handles_large_logits() {
        let out = softmax(&[1000.0, 1000.0]);
        assert!((out[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn argmax_prefers_first_on_ties() {
        assert_eq!(argmax(&[0.2, 0.4, 0.4]), 1);
        assert_eq!(argmax(&[]), 0);
    }
}
