use std::path::PathBuf;
use thiserror::Error;

use hdrisk_encode::SchemeId;
use hdrisk_model::{LoadError, ModelError};

/// Failure of a single prediction request. Never fatal to the process.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("features were encoded with the {encoder} scheme but model '{model}' expects {expected}")]
    SchemeMismatch {
        model: String,
        expected: SchemeId,
        encoder: SchemeId,
    },
}

impl PredictError {
    /// True for length or order disagreements between the vector and the
    /// model.
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(
            self,
            PredictError::Model(ModelError::ShapeMismatch { .. } | ModelError::FeatureOrder { .. })
        )
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("decision threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),
    #[error("unknown fallback schema preset '{0}' (expected heart-2020-metric)")]
    UnknownPreset(String),
    #[error("no model artifact configured")]
    MissingModel,
    #[error(transparent)]
    Load(#[from] LoadError),
}
