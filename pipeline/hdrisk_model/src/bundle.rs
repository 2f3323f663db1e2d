use std::fmt;
use std::path::Path;

use hdrisk_encode::EncodingScheme;

use crate::artifact::ModelArtifact;
use crate::classifier::{Capabilities, Classifier};
use crate::error::LoadError;
use crate::scaler::StandardScaler;
use crate::schema::ExpectedSchema;

/// Everything loaded once at startup and shared read-only afterwards: the
/// classifier, its optional scaler, the resolved input schema and the
/// encoding scheme the classifier was trained with.
pub struct ModelBundle {
    classifier: Box<dyn Classifier>,
    scaler: Option<StandardScaler>,
    schema: ExpectedSchema,
    scheme: EncodingScheme,
    capabilities: Capabilities,
}

impl ModelBundle {
    /// Loads a model artifact and, if given, a scaler artifact.
    pub fn load(
        model: impl AsRef<Path>,
        scaler: Option<&Path>,
        fallback: Option<&ExpectedSchema>,
    ) -> Result<Self, LoadError> {
        let artifact = ModelArtifact::load(model)?;
        let scheme = EncodingScheme::from(&artifact.encoding);
        let scaler = scaler.map(StandardScaler::load).transpose()?;
        Self::from_parts(artifact.into_classifier(), scheme, scaler, fallback)
    }

    /// Assembles a bundle from an in-memory classifier.
    pub fn from_parts(
        classifier: Box<dyn Classifier>,
        scheme: EncodingScheme,
        scaler: Option<StandardScaler>,
        fallback: Option<&ExpectedSchema>,
    ) -> Result<Self, LoadError> {
        let capabilities = Capabilities::detect(classifier.as_ref());
        let schema = ExpectedSchema::resolve(classifier.feature_names(), fallback)
            .ok_or_else(|| LoadError::MissingSchema(classifier.name().to_string()))?;
        if !capabilities.feature_names {
            log::info!(
                "model '{}' does not declare feature names, using fallback schema of {} columns",
                classifier.name(),
                schema.len()
            );
        }
        if let Some(dup) = schema.first_duplicate() {
            return Err(LoadError::invalid(
                classifier.name(),
                format!("schema lists '{dup}' twice"),
            ));
        }

        let n = classifier.n_features();
        if let Some(scaler) = &scaler {
            if scaler.n_features() != n {
                return Err(LoadError::ScalerMismatch {
                    model: classifier.name().to_string(),
                    scaler: scaler.n_features(),
                    expected: n,
                });
            }
            if let Some(names) = scaler.feature_names.as_deref() {
                let mismatch = names
                    .iter()
                    .zip(schema.names())
                    .position(|(fitted, expected)| fitted != expected);
                if let Some(index) = mismatch {
                    return Err(LoadError::ScalerColumns {
                        model: classifier.name().to_string(),
                        index,
                        scaler: names[index].clone(),
                        expected: schema.names()[index].clone(),
                    });
                }
            }
        }
        if schema.len() != n {
            log::warn!(
                "schema has {} columns but model '{}' was fit on {n}; predictions will fail",
                schema.len(),
                classifier.name()
            );
        }

        Ok(Self {
            classifier,
            scaler,
            schema,
            scheme,
            capabilities,
        })
    }

    /// Name of the classifier, taken from the artifact envelope.
    pub fn name(&self) -> &str {
        self.classifier.name()
    }

    /// The loaded classifier.
    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    /// Scaler applied after alignment, when one was supplied.
    pub fn scaler(&self) -> Option<&StandardScaler> {
        self.scaler.as_ref()
    }

    /// Columns the classifier consumes, in order.
    pub fn schema(&self) -> &ExpectedSchema {
        &self.schema
    }

    /// Encoding the classifier was trained on.
    pub fn scheme(&self) -> &EncodingScheme {
        &self.scheme
    }

    /// Optional operations detected at load time.
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Importance scores when the classifier exposes them.
    pub fn feature_importances(&self) -> Option<&[f64]> {
        if self.capabilities.feature_importances {
            self.classifier.feature_importances()
        } else {
            None
        }
    }
}

impl fmt::Debug for ModelBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelBundle")
            .field("name", &self.name())
            .field("scheme", &self.scheme.id())
            .field("schema", &self.schema.len())
            .field("scaled", &self.scaler.is_some())
            .field("capabilities", &self.capabilities)
            .finish()
    }
}
