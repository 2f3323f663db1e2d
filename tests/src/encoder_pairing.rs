use hdrisk_encode::{Encoder, Field, SchemeId};
use hdrisk_predict::{Pipeline, PipelineConfig};

use crate::fixtures::{init_logging, smoker_selection, stump_forest, write_config, write_json, METRIC_COLUMNS};

#[test]
fn suffix_encoded_model_over_single_column_names_defaults_binaries_to_zero() {
    init_logging();
    let tmp = tempfile::tempdir().unwrap();
    // Artifact claims the suffix scheme but lists single-column names.
    let model = stump_forest("rf-mispaired", "one-hot-suffix", &METRIC_COLUMNS);
    write_json(tmp.path(), "rf.json", &model);
    let config = write_config(tmp.path(), "model = \"rf.json\"\n");
    let pipeline = Pipeline::from_config(&PipelineConfig::load(&config).unwrap()).unwrap();

    let assessment = pipeline.run(&smoker_selection()).unwrap();
    for name in ["Smoking", "AlcoholDrinking", "Stroke", "Diabetic", "SkinCancer"] {
        assert!(
            assessment.defaulted.iter().any(|d| d == name),
            "{name} should be reported as defaulted"
        );
    }
    assert!(assessment.dropped.iter().any(|d| d == "Smoking_Yes"));
    assert!(assessment.dropped.iter().any(|d| d == "Diabetic_No, borderline diabetes"));
}

#[test]
fn matching_scheme_fills_every_column() {
    let tmp = tempfile::tempdir().unwrap();
    let model = stump_forest("rf-ordinal", "ordinal-diabetic", &METRIC_COLUMNS);
    write_json(tmp.path(), "rf.json", &model);
    let config = PipelineConfig {
        model: Some(tmp.path().join("rf.json")),
        ..PipelineConfig::default()
    };
    let pipeline = Pipeline::from_config(&config).unwrap();

    let encoded = pipeline.encoder().encode(&smoker_selection());
    assert_eq!(encoded.get(Field::Diabetic.column_name()), Some(0.5));

    let assessment = pipeline.run_encoded(&encoded).unwrap();
    assert!(assessment.defaulted.is_empty());
    assert!(assessment.dropped.is_empty());
    // BMI, PhysicalHealth, SleepTime, Smoking and PhysicalActivity exceed 0.5.
    let expected = (5.0 * 0.9 + 8.0 * 0.1) / 13.0;
    assert!((assessment.result.positive_probability() - expected).abs() < 1e-12);
}

#[test]
fn map_from_a_foreign_encoder_is_refused() {
    let tmp = tempfile::tempdir().unwrap();
    let model = stump_forest("rf-ordinal", "ordinal-diabetic", &METRIC_COLUMNS);
    write_json(tmp.path(), "rf.json", &model);
    let config = PipelineConfig {
        model: Some(tmp.path().join("rf.json")),
        ..PipelineConfig::default()
    };
    let pipeline = Pipeline::from_config(&config).unwrap();

    let foreign = Encoder::new(SchemeId::SingleColumn).encode(&smoker_selection());
    let err = pipeline.run_encoded(&foreign).unwrap_err();
    assert!(err.to_string().contains("single-column"), "{err}");
    assert!(!err.is_shape_mismatch());
}
