use std::path::PathBuf;
use thiserror::Error;

/// Raised while locating, deserializing, or validating an artifact.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read artifact '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot deserialize artifact '{}': {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid artifact '{name}': {reason}")]
    Invalid { name: String, reason: String },
    #[error("model '{0}' does not declare its feature names and no fallback schema was supplied")]
    MissingSchema(String),
    #[error("scaler has {scaler} features but model '{model}' expects {expected}")]
    ScalerMismatch {
        model: String,
        scaler: usize,
        expected: usize,
    },
    #[error("scaler column {index} is '{scaler}' but model '{model}' expects '{expected}'")]
    ScalerColumns {
        model: String,
        index: usize,
        scaler: String,
        expected: String,
    },
}

impl LoadError {
    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        LoadError::Invalid {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Raised by a classifier during a single prediction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("shape mismatch: expected {expected} features, got {found}")]
    ShapeMismatch { expected: usize, found: usize },
    #[error("feature order mismatch at column {index}: expected '{expected}', got '{found}'")]
    FeatureOrder {
        index: usize,
        expected: String,
        found: String,
    },
    #[error("malformed decision tree at node {node}: {reason}")]
    MalformedTree { node: usize, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("binary label must be 0 or 1, got {0}")]
pub struct InvalidLabel(pub u8);
