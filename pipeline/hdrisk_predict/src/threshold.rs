use serde::Serialize;
use std::fmt;

use hdrisk_model::BinaryLabel;

use crate::error::ConfigError;

/// Probability cutoff policy for the positive class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionThreshold {
    /// Defer to the classifier's own label operation (argmax, i.e. 0.5).
    #[default]
    ClassifierDefault,
    /// Positive when `p(positive) >= t`.
    Explicit(f64),
}

impl DecisionThreshold {
    pub fn explicit(t: f64) -> Result<Self, ConfigError> {
        if t.is_finite() && (0.0..=1.0).contains(&t) {
            Ok(DecisionThreshold::Explicit(t))
        } else {
            Err(ConfigError::InvalidThreshold(t))
        }
    }

    pub fn from_option(t: Option<f64>) -> Result<Self, ConfigError> {
        t.map_or(Ok(DecisionThreshold::ClassifierDefault), Self::explicit)
    }

    /// Label for a positive-class probability under an explicit cutoff;
    /// `None` when the classifier decides.
    pub fn label_for(self, positive: f64) -> Option<BinaryLabel> {
        match self {
            DecisionThreshold::ClassifierDefault => None,
            DecisionThreshold::Explicit(t) if positive >= t => Some(BinaryLabel::Positive),
            DecisionThreshold::Explicit(_) => Some(BinaryLabel::Negative),
        }
    }
}

impl fmt::Display for DecisionThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionThreshold::ClassifierDefault => f.write_str("classifier default"),
            DecisionThreshold::Explicit(t) => write!(f, "{t:.2}"),
        }
    }
}
