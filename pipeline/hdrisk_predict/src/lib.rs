//! Schema alignment and prediction for heart-disease risk models.
//!
//! The flow for one request is strictly sequential:
//!
//! 1. [`hdrisk_encode::Encoder`] turns form values into named columns,
//! 2. [`align`] projects them onto the model's [`hdrisk_model::ExpectedSchema`],
//! 3. [`Predictor`] applies the optional scaler, the classifier and the
//!    configured [`DecisionThreshold`].
//!
//! [`Pipeline`] wires the three together for a loaded model bundle.

pub mod align;
pub mod config;
pub mod error;
pub mod importance;
pub mod pipeline;
pub mod predictor;
pub mod report;
pub mod result;
pub mod threshold;

pub use align::{align, AlignedFeatureVector, FeatureSource};
pub use config::{FallbackSchema, PipelineConfig, SchemaPreset, CONFIG_FILE};
pub use error::{ConfigError, PredictError};
pub use importance::{importance_table, FeatureImportance};
pub use pipeline::{Assessment, Pipeline};
pub use predictor::Predictor;
pub use report::{compose_report, Priority, Recommendation, Report};
pub use result::PredictionResult;
pub use threshold::DecisionThreshold;
