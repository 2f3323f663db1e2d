use serde::Serialize;

use hdrisk_model::BinaryLabel;

use crate::threshold::DecisionThreshold;

/// Outcome of one prediction; immutable once produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    pub label: BinaryLabel,
    /// `[negative, positive]`
    pub probabilities: [f64; 2],
    pub threshold: DecisionThreshold,
}

impl PredictionResult {
    pub fn is_positive(&self) -> bool {
        self.label.is_positive()
    }

    pub fn positive_probability(&self) -> f64 {
        self.probabilities[1]
    }

    /// Probability of the class that was predicted.
    pub fn label_probability(&self) -> f64 {
        self.probabilities[self.label.index()]
    }
}
