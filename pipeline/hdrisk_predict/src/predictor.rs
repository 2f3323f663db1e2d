use std::borrow::Cow;

use hdrisk_model::{ModelBundle, ModelError};

use crate::align::AlignedFeatureVector;
use crate::error::PredictError;
use crate::result::PredictionResult;
use crate::threshold::DecisionThreshold;

/// Invokes a loaded classifier on aligned vectors.
#[derive(Debug, Clone, Copy)]
pub struct Predictor<'m> {
    bundle: &'m ModelBundle,
    threshold: DecisionThreshold,
}

impl<'m> Predictor<'m> {
    pub fn new(bundle: &'m ModelBundle, threshold: DecisionThreshold) -> Self {
        Self { bundle, threshold }
    }

    pub fn threshold(&self) -> DecisionThreshold {
        self.threshold
    }

    pub fn predict(&self, aligned: &AlignedFeatureVector) -> Result<PredictionResult, PredictError> {
        let classifier = self.bundle.classifier();
        let expected = classifier.n_features();
        if aligned.len() != expected {
            return Err(ModelError::ShapeMismatch {
                expected,
                found: aligned.len(),
            }
            .into());
        }
        if let Some(names) = classifier.feature_names() {
            check_order(names, aligned.names())?;
        }

        let features: Cow<'_, [f64]> = match self.bundle.scaler() {
            Some(scaler) => Cow::Owned(scaler.transform(aligned.values())?),
            None => Cow::Borrowed(aligned.values()),
        };

        let probabilities = classifier.predict_proba(&features)?;
        let label = match self.threshold.label_for(probabilities[1]) {
            Some(label) => label,
            None => classifier.predict(&features)?,
        };
        log::debug!(
            "model '{}' p(positive)={:.4} threshold={} label={label}",
            classifier.name(),
            probabilities[1],
            self.threshold
        );

        Ok(PredictionResult {
            label,
            probabilities,
            threshold: self.threshold,
        })
    }
}

fn check_order(expected: &[String], found: &[String]) -> Result<(), ModelError> {
    match expected.iter().zip(found).position(|(e, f)| e != f) {
        Some(index) => Err(ModelError::FeatureOrder {
            index,
            expected: expected[index].clone(),
            found: found[index].clone(),
        }),
        None => Ok(()),
    }
}
