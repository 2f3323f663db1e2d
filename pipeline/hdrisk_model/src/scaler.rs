use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::artifact::read_json;
use crate::error::{LoadError, ModelError};

/// Per-feature standardization fixed at fit time: `(x - mean) / scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
    /// Column order at fit time; must agree with the model schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
}

impl StandardScaler {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let scaler: StandardScaler = read_json(path.as_ref())?;
        scaler.validate()?;
        log::info!(
            "loaded scaler for {} features from {}",
            scaler.n_features(),
            path.as_ref().display()
        );
        Ok(scaler)
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    pub(crate) fn validate(&self) -> Result<(), LoadError> {
        if self.mean.len() != self.scale.len() {
            return Err(LoadError::invalid(
                "scaler",
                format!(
                    "{} means but {} scales",
                    self.mean.len(),
                    self.scale.len()
                ),
            ));
        }
        if let Some(names) = &self.feature_names {
            if names.len() != self.mean.len() {
                return Err(LoadError::invalid(
                    "scaler",
                    format!("{} feature names for {} features", names.len(), self.mean.len()),
                ));
            }
        }
        if self.mean.iter().chain(&self.scale).any(|v| !v.is_finite()) {
            return Err(LoadError::invalid("scaler", "non-finite parameter"));
        }
        Ok(())
    }

    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        if features.len() != self.n_features() {
            return Err(ModelError::ShapeMismatch {
                expected: self.n_features(),
                found: features.len(),
            });
        }
        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| {
                // constant columns were fit with unit scale
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (x - mean) / scale
            })
            .collect())
    }
}
