use serde_json::json;

use hdrisk_model::LoadError;
use hdrisk_predict::{ConfigError, Pipeline, PipelineConfig};

use crate::fixtures::{constant_logistic, smoker_selection, write_config, write_json};

fn pipeline_for(config: &PipelineConfig) -> Result<Pipeline, ConfigError> {
    Pipeline::from_config(config)
}

#[test]
fn missing_model_file_fails_before_any_request() {
    let tmp = tempfile::tempdir().unwrap();
    let config = write_config(tmp.path(), "model = \"absent.json\"\n");
    let err = pipeline_for(&PipelineConfig::load(&config).unwrap()).unwrap_err();
    assert!(matches!(err, ConfigError::Load(LoadError::Io { .. })), "{err}");
}

#[test]
fn no_model_configured() {
    let err = pipeline_for(&PipelineConfig::default()).unwrap_err();
    assert!(matches!(err, ConfigError::MissingModel));
}

#[test]
fn model_without_names_needs_a_fallback_schema() {
    let tmp = tempfile::tempdir().unwrap();
    let mut model = constant_logistic(0.0);
    model["classifier"]
        .as_object_mut()
        .unwrap()
        .remove("feature_names");
    write_json(tmp.path(), "lr.json", &model);

    let config = write_config(tmp.path(), "model = \"lr.json\"\n");
    let err = pipeline_for(&PipelineConfig::load(&config).unwrap()).unwrap_err();
    assert!(matches!(err, ConfigError::Load(LoadError::MissingSchema(_))), "{err}");

    let config = write_config(
        tmp.path(),
        "model = \"lr.json\"\nfallback_schema = \"heart-2020-metric\"\n",
    );
    let pipeline = pipeline_for(&PipelineConfig::load(&config).unwrap()).unwrap();
    assert_eq!(pipeline.bundle().schema().len(), 13);
}

#[test]
fn scaler_of_the_wrong_width_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    write_json(tmp.path(), "lr.json", &constant_logistic(0.0));
    write_json(
        tmp.path(),
        "scaler.json",
        &json!({"mean": [25.0, 3.0], "scale": [5.0, 7.0]}),
    );
    let config = write_config(tmp.path(), "model = \"lr.json\"\nscaler = \"scaler.json\"\n");
    let err = pipeline_for(&PipelineConfig::load(&config).unwrap()).unwrap_err();
    assert!(
        matches!(
            err,
            ConfigError::Load(LoadError::ScalerMismatch {
                scaler: 2,
                expected: 13,
                ..
            })
        ),
        "{err}"
    );
}

#[test]
fn schema_wider_than_the_classifier_fails_per_request() {
    let tmp = tempfile::tempdir().unwrap();
    let model = json!({
        "name": "lr-short",
        "encoding": {"scheme": "ordinal-diabetic"},
        "classifier": {
            "kind": "logistic_regression",
            "coef": vec![0.1; 12],
            "intercept": 0.0,
        }
    });
    write_json(tmp.path(), "lr.json", &model);
    let config = write_config(
        tmp.path(),
        "model = \"lr.json\"\nfallback_schema = \"heart-2020-metric\"\n",
    );
    let pipeline = pipeline_for(&PipelineConfig::load(&config).unwrap()).unwrap();

    let err = pipeline.run(&smoker_selection()).unwrap_err();
    assert!(err.is_shape_mismatch(), "{err}");
    // The pipeline stays usable after a failed request.
    assert!(pipeline.run(&smoker_selection()).is_err());
}

#[test]
fn threshold_outside_unit_interval_is_a_config_error() {
    let tmp = tempfile::tempdir().unwrap();
    write_json(tmp.path(), "lr.json", &constant_logistic(0.0));
    let config = PipelineConfig {
        model: Some(tmp.path().join("lr.json")),
        threshold: Some(1.5),
        ..PipelineConfig::default()
    };
    assert!(matches!(
        pipeline_for(&config).unwrap_err(),
        ConfigError::InvalidThreshold(_)
    ));
}
