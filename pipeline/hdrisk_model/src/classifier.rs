//! The classifier contract every model artifact satisfies.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{InvalidLabel, ModelError};

/// Binary class label; serialized as `0` / `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum BinaryLabel {
    Negative,
    Positive,
}

impl BinaryLabel {
    pub fn is_positive(self) -> bool {
        self == BinaryLabel::Positive
    }

    pub fn index(self) -> usize {
        match self {
            BinaryLabel::Negative => 0,
            BinaryLabel::Positive => 1,
        }
    }
}

impl From<BinaryLabel> for u8 {
    fn from(label: BinaryLabel) -> Self {
        label.index() as u8
    }
}

impl TryFrom<u8> for BinaryLabel {
    type Error = InvalidLabel;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(BinaryLabel::Negative),
            1 => Ok(BinaryLabel::Positive),
            other => Err(InvalidLabel(other)),
        }
    }
}

impl fmt::Display for BinaryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// A pre-trained binary classifier.
///
/// `predict_proba` is mandatory. Feature names and importances are optional
/// and reported through [`Capabilities`] when a bundle is assembled.
pub trait Classifier: Send + Sync {
    fn name(&self) -> &str;

    /// Number of columns the model was fit on.
    fn n_features(&self) -> usize;

    /// Probability of each class, `[negative, positive]`.
    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], ModelError>;

    /// Most probable class; ties resolve to the negative class.
    fn predict(&self, features: &[f64]) -> Result<BinaryLabel, ModelError> {
        let [negative, positive] = self.predict_proba(features)?;
        Ok(if positive > negative {
            BinaryLabel::Positive
        } else {
            BinaryLabel::Negative
        })
    }

    /// Ordered input column names, when recorded at fit time.
    fn feature_names(&self) -> Option<&[String]> {
        None
    }

    /// Per-feature importance scores, aligned with the input columns.
    fn feature_importances(&self) -> Option<&[f64]> {
        None
    }
}

/// Optional operations a loaded classifier exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub feature_names: bool,
    pub feature_importances: bool,
}

impl Capabilities {
    pub fn detect(classifier: &dyn Classifier) -> Self {
        Self {
            feature_names: classifier.feature_names().is_some(),
            feature_importances: classifier.feature_importances().is_some(),
        }
    }
}

pub(crate) fn check_width(expected: usize, features: &[f64]) -> Result<(), ModelError> {
    if features.len() == expected {
        Ok(())
    } else {
        Err(ModelError::ShapeMismatch {
            expected,
            found: features.len(),
        })
    }
}

pub(crate) fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64);

    impl Classifier for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn n_features(&self) -> usize {
            1
        }

        fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], ModelError> {
            check_width(1, features)?;
            Ok([1.0 - self.0, self.0])
        }
    }

    #[test]
    fn default_predict_is_argmax_with_negative_ties() {
        assert_eq!(Fixed(0.51).predict(&[0.0]), Ok(BinaryLabel::Positive));
        assert_eq!(Fixed(0.5).predict(&[0.0]), Ok(BinaryLabel::Negative));
        assert_eq!(Fixed(0.4).predict(&[0.0]), Ok(BinaryLabel::Negative));
    }

    #[test]
    fn wrong_width_is_a_shape_mismatch() {
        assert_eq!(
            Fixed(0.4).predict(&[0.0, 1.0]),
            Err(ModelError::ShapeMismatch {
                expected: 1,
                found: 2
            })
        );
    }

    #[test]
    fn capabilities_reflect_optional_operations() {
        assert_eq!(Capabilities::detect(&Fixed(0.2)), Capabilities::default());
    }

    #[test]
    fn label_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&BinaryLabel::Positive).unwrap(), "1");
        assert_eq!(
            serde_json::from_str::<BinaryLabel>("0").unwrap(),
            BinaryLabel::Negative
        );
        assert!(serde_json::from_str::<BinaryLabel>("2").is_err());
        assert_eq!(BinaryLabel::try_from(7), Err(InvalidLabel(7)));
    }
}
