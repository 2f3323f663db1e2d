use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

use hdrisk_encode::{Field, RawSelection};

pub const METRIC_COLUMNS: [&str; 13] = [
    "BMI",
    "PhysicalHealth",
    "MentalHealth",
    "SleepTime",
    "Smoking",
    "AlcoholDrinking",
    "Stroke",
    "DiffWalking",
    "Diabetic",
    "PhysicalActivity",
    "Asthma",
    "KidneyDisease",
    "SkinCancer",
];

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Logistic regression over the metric columns with every weight at zero,
/// so the positive probability is `sigmoid(intercept)` for any input.
pub fn constant_logistic(intercept: f64) -> Value {
    json!({
        "name": "lr-constant",
        "encoding": {"scheme": "ordinal-diabetic"},
        "classifier": {
            "kind": "logistic_regression",
            "coef": vec![0.0; METRIC_COLUMNS.len()],
            "intercept": intercept,
            "feature_names": METRIC_COLUMNS,
        }
    })
}

/// One stump per listed column, each splitting at 0.5 and leaning positive
/// on the right.
pub fn stump_forest(name: &str, scheme: &str, columns: &[&str]) -> Value {
    let trees: Vec<Value> = (0..columns.len())
        .map(|i| {
            json!({
                "children_left": [1, -1, -1],
                "children_right": [2, -1, -1],
                "feature": [i, -2, -2],
                "threshold": [0.5, -2.0, -2.0],
                "value": [[10.0, 10.0], [9.0, 1.0], [1.0, 9.0]],
            })
        })
        .collect();
    json!({
        "name": name,
        "encoding": {"scheme": scheme},
        "classifier": {
            "kind": "random_forest",
            "n_features": columns.len(),
            "feature_names": columns,
            "trees": trees,
        }
    })
}

pub fn write_json(dir: &Path, file: &str, value: &Value) -> PathBuf {
    let path = dir.join(file);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

pub fn write_config(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("hdrisk.toml");
    fs::write(&path, body).unwrap();
    path
}

pub fn smoker_selection() -> RawSelection {
    RawSelection::new()
        .with(Field::Bmi, 31.0)
        .with(Field::PhysicalHealth, 2.0)
        .with(Field::MentalHealth, 0.0)
        .with(Field::SleepTime, 6.0)
        .with(Field::Smoking, "Yes")
        .with(Field::AlcoholDrinking, "No")
        .with(Field::Stroke, "No")
        .with(Field::DiffWalking, "No")
        .with(Field::Diabetic, "No, borderline diabetes")
        .with(Field::PhysicalActivity, "Yes")
        .with(Field::Asthma, "No")
        .with(Field::KidneyDisease, "No")
        .with(Field::SkinCancer, "No")
}
