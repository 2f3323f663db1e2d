use pretty_assertions::assert_eq;

use hdrisk_model::BinaryLabel;
use hdrisk_predict::{compose_report, DecisionThreshold, Pipeline, PipelineConfig};

use crate::fixtures::{constant_logistic, init_logging, smoker_selection, write_config, write_json};

/// ln(0.4 / 0.6): the model answers p(positive) = 0.40 for every input.
const LOGIT_040: f64 = -0.405_465_108_108_164_4;

#[test]
fn tuned_threshold_from_config_flips_a_040_prediction() {
    init_logging();
    let tmp = tempfile::tempdir().unwrap();
    write_json(tmp.path(), "lr.json", &constant_logistic(LOGIT_040));
    let config = write_config(tmp.path(), "model = \"lr.json\"\nthreshold = 0.35\n");

    let config = PipelineConfig::load(&config).unwrap();
    let pipeline = Pipeline::from_config(&config).unwrap();
    assert_eq!(pipeline.threshold(), DecisionThreshold::Explicit(0.35));

    let assessment = pipeline.run(&smoker_selection()).unwrap();
    assert!((assessment.result.positive_probability() - 0.40).abs() < 1e-9);
    assert_eq!(assessment.result.label, BinaryLabel::Positive);
    assert!(assessment.defaulted.is_empty());
    assert!(compose_report(&assessment.result).headline.starts_with("High risk"));
}

#[test]
fn classifier_default_keeps_a_040_prediction_negative() {
    let tmp = tempfile::tempdir().unwrap();
    write_json(tmp.path(), "lr.json", &constant_logistic(LOGIT_040));
    let config = write_config(tmp.path(), "model = \"lr.json\"\n");

    let pipeline = Pipeline::from_config(&PipelineConfig::load(&config).unwrap()).unwrap();
    let assessment = pipeline.run(&smoker_selection()).unwrap();
    assert_eq!(assessment.result.label, BinaryLabel::Negative);
    assert!(compose_report(&assessment.result).headline.starts_with("Low risk"));
}

#[test]
fn raising_the_threshold_never_adds_positives() {
    let tmp = tempfile::tempdir().unwrap();
    write_json(tmp.path(), "lr.json", &constant_logistic(LOGIT_040));
    let mut previous_positive = true;
    for t in [0.0, 0.2, 0.35, 0.4, 0.5, 0.9, 1.0] {
        let config = PipelineConfig {
            model: Some(tmp.path().join("lr.json")),
            threshold: Some(t),
            ..PipelineConfig::default()
        };
        let pipeline = Pipeline::from_config(&config).unwrap();
        let positive = pipeline.run(&smoker_selection()).unwrap().result.is_positive();
        assert!(previous_positive || !positive, "threshold {t} turned a negative positive");
        previous_positive = positive;
    }
    assert!(!previous_positive);
}
