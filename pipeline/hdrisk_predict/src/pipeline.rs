use serde::Serialize;

use hdrisk_encode::{EncodedFeatureMap, Encoder, Field, RawSelection};
use hdrisk_model::ModelBundle;

use crate::align::align;
use crate::config::PipelineConfig;
use crate::error::{ConfigError, PredictError};
use crate::importance::{importance_table, FeatureImportance};
use crate::predictor::Predictor;
use crate::result::PredictionResult;
use crate::threshold::DecisionThreshold;

/// A prediction plus the diagnostics gathered on the way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub result: PredictionResult,
    /// Expected features the encoder did not produce; each was set to 0.
    pub defaulted: Vec<String>,
    /// Encoded features the model does not use.
    pub dropped: Vec<String>,
    /// Form fields whose values the encoder could not interpret.
    pub unrecognized: Vec<Field>,
}

/// Encoder, aligner and predictor bound to one model bundle.
///
/// The encoder is derived from the bundle's declared scheme, so a selection
/// can only ever be encoded the way its model was trained.
#[derive(Debug)]
pub struct Pipeline {
    bundle: ModelBundle,
    encoder: Encoder,
    threshold: DecisionThreshold,
}

impl Pipeline {
    pub fn new(bundle: ModelBundle, threshold: DecisionThreshold) -> Self {
        let encoder = Encoder::new(bundle.scheme().clone());
        Self {
            bundle,
            encoder,
            threshold,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Result<Self, ConfigError> {
        let threshold = config.decision_threshold()?;
        let model = config.model.as_deref().ok_or(ConfigError::MissingModel)?;
        let fallback = config.fallback();
        let bundle = ModelBundle::load(model, config.scaler.as_deref(), fallback.as_ref())?;
        Ok(Self::new(bundle, threshold))
    }

    pub fn bundle(&self) -> &ModelBundle {
        &self.bundle
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    pub fn threshold(&self) -> DecisionThreshold {
        self.threshold
    }

    /// Encodes, aligns and predicts one selection.
    pub fn run(&self, selection: &RawSelection) -> Result<Assessment, PredictError> {
        let encoded = self.encoder.encode(selection);
        self.run_encoded(&encoded)
    }

    /// Predicts from an already encoded map; the map must come from the
    /// scheme this pipeline's model was trained with.
    pub fn run_encoded(&self, encoded: &EncodedFeatureMap) -> Result<Assessment, PredictError> {
        let expected = self.bundle.scheme().id();
        if encoded.scheme() != expected {
            return Err(PredictError::SchemeMismatch {
                model: self.bundle.name().to_string(),
                expected,
                encoder: encoded.scheme(),
            });
        }

        let aligned = align(encoded, self.bundle.schema());
        let result = Predictor::new(&self.bundle, self.threshold).predict(&aligned)?;
        log::info!(
            "prediction label={} p(positive)={:.4} ({} defaulted features)",
            result.label,
            result.positive_probability(),
            aligned.defaulted().len()
        );

        Ok(Assessment {
            result,
            defaulted: aligned.defaulted().to_vec(),
            dropped: aligned.dropped().to_vec(),
            unrecognized: encoded.unrecognized().to_vec(),
        })
    }

    pub fn feature_importance(&self) -> Option<Vec<FeatureImportance>> {
        importance_table(&self.bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdrisk_encode::SchemeId;
    use hdrisk_model::{
        BinaryLabel, DecisionTree, ExpectedSchema, LogisticRegression, ModelError, RandomForest,
    };

    fn pipeline(threshold: DecisionThreshold) -> Pipeline {
        let lr = LogisticRegression {
            name: "lr-metric".into(),
            coef: vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0],
            intercept: -1.0,
            feature_names: None,
            feature_importances: None,
        };
        let bundle = ModelBundle::from_parts(
            Box::new(lr),
            SchemeId::OrdinalDiabetic.into(),
            None,
            Some(&ExpectedSchema::heart_2020_metric()),
        )
        .unwrap();
        Pipeline::new(bundle, threshold)
    }

    #[test]
    fn encodes_with_the_bundle_scheme() {
        let p = pipeline(DecisionThreshold::ClassifierDefault);
        let selection = RawSelection::new()
            .with(Field::Bmi, 30.0)
            .with(Field::Smoking, "Yes")
            .with(Field::Stroke, "Yes")
            .with(Field::Diabetic, "No, borderline diabetes");
        let assessment = p.run(&selection).unwrap();
        // margin = 1 + 1 + 0.5 - 1 = 1.5
        let expected = 1.0 / (1.0 + (-1.5f64).exp());
        assert!((assessment.result.positive_probability() - expected).abs() < 1e-12);
        assert_eq!(assessment.result.label, BinaryLabel::Positive);
        assert!(assessment.defaulted.contains(&"SleepTime".to_string()));
        assert!(assessment.dropped.is_empty());
    }

    #[test]
    fn map_from_another_scheme_is_rejected() {
        let p = pipeline(DecisionThreshold::ClassifierDefault);
        let encoded = Encoder::new(SchemeId::OneHotSuffix)
            .encode(&RawSelection::new().with(Field::Smoking, "No"));
        let err = p.run_encoded(&encoded).unwrap_err();
        assert!(matches!(
            err,
            PredictError::SchemeMismatch {
                expected: SchemeId::OrdinalDiabetic,
                encoder: SchemeId::OneHotSuffix,
                ..
            }
        ));
    }

    #[test]
    fn unrecognized_fields_are_reported() {
        let p = pipeline(DecisionThreshold::ClassifierDefault);
        let assessment = p
            .run(&RawSelection::new().with(Field::Asthma, "Maybe"))
            .unwrap();
        assert_eq!(assessment.unrecognized, vec![Field::Asthma]);
        assert_eq!(assessment.defaulted.len(), 13);
    }

    #[test]
    fn malformed_in_memory_forest_fails_the_request() {
        let forest = RandomForest {
            name: "rf-bad-split".into(),
            n_features: 13,
            trees: vec![DecisionTree {
                children_left: vec![1, -1, -1],
                children_right: vec![2, -1, -1],
                feature: vec![40, -2, -2],
                threshold: vec![0.5, -2.0, -2.0],
                value: vec![[5.0, 5.0], [4.0, 1.0], [1.0, 4.0]],
            }],
            feature_names: None,
            feature_importances: None,
        };
        let bundle = ModelBundle::from_parts(
            Box::new(forest),
            SchemeId::OrdinalDiabetic.into(),
            None,
            Some(&ExpectedSchema::heart_2020_metric()),
        )
        .unwrap();
        let p = Pipeline::new(bundle, DecisionThreshold::ClassifierDefault);
        let err = p
            .run(&RawSelection::new().with(Field::Bmi, 30.0))
            .unwrap_err();
        assert!(matches!(
            err,
            PredictError::Model(ModelError::MalformedTree { node: 0, .. })
        ));
    }
}
