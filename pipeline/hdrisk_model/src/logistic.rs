use serde::{Deserialize, Serialize};

use crate::classifier::{check_width, sigmoid, Classifier};
use crate::error::{LoadError, ModelError};

/// Binary logistic regression: `p = sigmoid(coef · x + intercept)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    #[serde(default)]
    pub name: String,
    pub coef: Vec<f64>,
    pub intercept: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_importances: Option<Vec<f64>>,
}

impl LogisticRegression {
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.coef.is_empty() {
            return Err(LoadError::invalid(&self.name, "logistic regression has no coefficients"));
        }
        if self.coef.iter().any(|w| !w.is_finite()) || !self.intercept.is_finite() {
            return Err(LoadError::invalid(&self.name, "non-finite coefficient"));
        }
        Ok(())
    }

    pub fn decision_function(&self, features: &[f64]) -> Result<f64, ModelError> {
        check_width(self.coef.len(), features)?;
        let z: f64 = self
            .coef
            .iter()
            .zip(features.iter())
            .map(|(w, x)| w * x)
            .sum();
        Ok(z + self.intercept)
    }
}

impl Classifier for LogisticRegression {
    fn name(&self) -> &str {
        &self.name
    }

    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], ModelError> {
        let p = sigmoid(self.decision_function(features)?);
        Ok([1.0 - p, p])
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn feature_importances(&self) -> Option<&[f64]> {
        self.feature_importances.as_deref()
    }
}
