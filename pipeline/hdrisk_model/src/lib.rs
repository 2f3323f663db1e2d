//! Pre-trained classifier artifacts for heart-disease risk prediction.
//!
//! Models are treated as opaque: each exposes class probabilities and,
//! optionally, the ordered feature names and importances recorded at fit
//! time. A [`ModelBundle`] is loaded once at startup and pairs the
//! classifier with its scaler, its input schema, and the encoding scheme
//! it was trained on.

pub mod artifact;
pub mod bundle;
pub mod classifier;
pub mod error;
pub mod forest;
pub mod logistic;
pub mod scaler;
pub mod schema;

pub use artifact::{ClassifierSpec, ModelArtifact};
pub use bundle::ModelBundle;
pub use classifier::{BinaryLabel, Capabilities, Classifier};
pub use error::{InvalidLabel, LoadError, ModelError};
pub use forest::{DecisionTree, RandomForest};
pub use logistic::LogisticRegression;
pub use scaler::StandardScaler;
pub use schema::ExpectedSchema;
