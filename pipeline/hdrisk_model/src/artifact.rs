//! On-disk model artifacts.
//!
//! A model artifact is a JSON envelope naming the encoding scheme the model
//! was trained with next to the classifier itself:
//!
//! ```json
//! {
//!   "name": "heart_disease_rf",
//!   "encoding": { "scheme": "ordinal-diabetic" },
//!   "classifier": { "kind": "random_forest", "n_features": 13, "trees": [] }
//! }
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::Path;

use hdrisk_encode::EncodingSpec;

use crate::classifier::Classifier;
use crate::error::LoadError;
use crate::forest::RandomForest;
use crate::logistic::LogisticRegression;
use crate::schema::ExpectedSchema;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierSpec {
    LogisticRegression(LogisticRegression),
    RandomForest(RandomForest),
}

impl ClassifierSpec {
    fn as_classifier(&self) -> &dyn Classifier {
        match self {
            ClassifierSpec::LogisticRegression(m) => m as &dyn Classifier,
            ClassifierSpec::RandomForest(m) => m,
        }
    }

    fn set_name(&mut self, name: &str) {
        let slot = match self {
            ClassifierSpec::LogisticRegression(m) => &mut m.name,
            ClassifierSpec::RandomForest(m) => &mut m.name,
        };
        if slot.is_empty() {
            *slot = name.to_string();
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub encoding: EncodingSpec,
    pub classifier: ClassifierSpec,
}

impl ModelArtifact {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let mut artifact: ModelArtifact = read_json(path)?;
        artifact.classifier.set_name(&artifact.name);
        artifact.validate()?;
        log::info!(
            "loaded model '{}' ({} encoding) from {}",
            artifact.name,
            artifact.encoding.scheme,
            path.display()
        );
        Ok(artifact)
    }

    pub fn validate(&self) -> Result<(), LoadError> {
        match &self.classifier {
            ClassifierSpec::LogisticRegression(m) => m.validate()?,
            ClassifierSpec::RandomForest(m) => m.validate()?,
        }

        let classifier = self.classifier.as_classifier();
        let n = classifier.n_features();
        if let Some(names) = classifier.feature_names() {
            if names.len() != n {
                return Err(LoadError::invalid(
                    &self.name,
                    format!("{} feature names for {n} features", names.len()),
                ));
            }
            if let Some(dup) = ExpectedSchema::new(names.iter().cloned()).first_duplicate() {
                return Err(LoadError::invalid(
                    &self.name,
                    format!("feature '{dup}' declared twice"),
                ));
            }
        }
        if let Some(importances) = classifier.feature_importances() {
            if importances.len() != n {
                return Err(LoadError::invalid(
                    &self.name,
                    format!("{} importances for {n} features", importances.len()),
                ));
            }
            if importances.iter().any(|v| !v.is_finite()) {
                return Err(LoadError::invalid(&self.name, "non-finite feature importance"));
            }
        }
        Ok(())
    }

    pub fn into_classifier(self) -> Box<dyn Classifier> {
        match self.classifier {
            ClassifierSpec::LogisticRegression(m) => Box::new(m) as Box<dyn Classifier>,
            ClassifierSpec::RandomForest(m) => Box::new(m),
        }
    }
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let text = read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| LoadError::Format {
        path: path.to_path_buf(),
        source,
    })
}
