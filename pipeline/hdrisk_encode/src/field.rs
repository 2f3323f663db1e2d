//! Form fields collected for a heart-disease risk assessment.
//!
//! Each [`Field`] knows the column stem the models were trained with and
//! what kind of value it accepts. Label sets are kept in the exact
//! spelling used by the 2020 survey dataset, since encoded column names
//! are derived from them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const SEX_LABELS: &[&str] = &["Female", "Male"];

pub const AGE_CATEGORY_LABELS: &[&str] = &[
    "18-24",
    "25-29",
    "30-34",
    "35-39",
    "40-44",
    "45-49",
    "50-54",
    "55-59",
    "60-64",
    "65-69",
    "70-74",
    "75-79",
    "80 or older",
];

pub const RACE_LABELS: &[&str] = &[
    "White",
    "Black",
    "Asian",
    "Hispanic",
    "American Indian/Alaskan Native",
    "Other",
];

pub const GEN_HEALTH_LABELS: &[&str] = &["Excellent", "Very good", "Good", "Fair", "Poor"];

pub const DIABETIC_LABELS: &[&str] = &[
    "No",
    "No, borderline diabetes",
    "Yes",
    "Yes (during pregnancy)",
];

/// Inclusive range a numeric field is collected in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// How a field's value is turned into columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Copied through unchanged.
    Numeric(NumericRange),
    /// Yes/No answer; column layout depends on the encoding scheme.
    YesNo,
    /// Diabetes status; one-hot or ordinal depending on the scheme.
    Diabetic,
    /// Always one-hot expanded over the given labels.
    Categorical(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "BMI")]
    Bmi,
    PhysicalHealth,
    MentalHealth,
    SleepTime,
    Smoking,
    AlcoholDrinking,
    Stroke,
    DiffWalking,
    PhysicalActivity,
    Asthma,
    KidneyDisease,
    SkinCancer,
    Diabetic,
    Sex,
    AgeCategory,
    Race,
    #[serde(alias = "GeneralHealth")]
    GenHealth,
}

impl Field {
    pub const ALL: [Field; 17] = [
        Field::Bmi,
        Field::PhysicalHealth,
        Field::MentalHealth,
        Field::SleepTime,
        Field::Smoking,
        Field::AlcoholDrinking,
        Field::Stroke,
        Field::DiffWalking,
        Field::PhysicalActivity,
        Field::Asthma,
        Field::KidneyDisease,
        Field::SkinCancer,
        Field::Diabetic,
        Field::Sex,
        Field::AgeCategory,
        Field::Race,
        Field::GenHealth,
    ];

    /// Column stem used in encoded feature names.
    pub fn column_name(self) -> &'static str {
        match self {
            Field::Bmi => "BMI",
            Field::PhysicalHealth => "PhysicalHealth",
            Field::MentalHealth => "MentalHealth",
            Field::SleepTime => "SleepTime",
            Field::Smoking => "Smoking",
            Field::AlcoholDrinking => "AlcoholDrinking",
            Field::Stroke => "Stroke",
            Field::DiffWalking => "DiffWalking",
            Field::PhysicalActivity => "PhysicalActivity",
            Field::Asthma => "Asthma",
            Field::KidneyDisease => "KidneyDisease",
            Field::SkinCancer => "SkinCancer",
            Field::Diabetic => "Diabetic",
            Field::Sex => "Sex",
            Field::AgeCategory => "AgeCategory",
            Field::Race => "Race",
            Field::GenHealth => "GenHealth",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::Bmi => FieldKind::Numeric(NumericRange::new(10.0, 60.0)),
            Field::PhysicalHealth | Field::MentalHealth => {
                FieldKind::Numeric(NumericRange::new(0.0, 30.0))
            }
            Field::SleepTime => FieldKind::Numeric(NumericRange::new(1.0, 24.0)),
            Field::Smoking
            | Field::AlcoholDrinking
            | Field::Stroke
            | Field::DiffWalking
            | Field::PhysicalActivity
            | Field::Asthma
            | Field::KidneyDisease
            | Field::SkinCancer => FieldKind::YesNo,
            Field::Diabetic => FieldKind::Diabetic,
            Field::Sex => FieldKind::Categorical(SEX_LABELS),
            Field::AgeCategory => FieldKind::Categorical(AGE_CATEGORY_LABELS),
            Field::Race => FieldKind::Categorical(RACE_LABELS),
            Field::GenHealth => FieldKind::Categorical(GEN_HEALTH_LABELS),
        }
    }

    /// Labels a categorical field accepts; empty for numeric fields.
    pub fn labels(self) -> &'static [&'static str] {
        match self.kind() {
            FieldKind::Numeric(_) => &[],
            FieldKind::YesNo => &["No", "Yes"],
            FieldKind::Diabetic => DIABETIC_LABELS,
            FieldKind::Categorical(labels) => labels,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("GeneralHealth") {
            return Ok(Field::GenHealth);
        }
        Field::ALL
            .into_iter()
            .find(|f| f.column_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Finds the canonical spelling of `label` among `labels`, ignoring ASCII
/// case and surrounding whitespace.
pub fn canonical_label(labels: &'static [&'static str], label: &str) -> Option<&'static str> {
    let label = label.trim();
    labels
        .iter()
        .copied()
        .find(|candidate| candidate.eq_ignore_ascii_case(label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_sets_have_expected_sizes() {
        assert_eq!(Field::AgeCategory.labels().len(), 13);
        assert_eq!(Field::Race.labels().len(), 6);
        assert_eq!(Field::GenHealth.labels().len(), 5);
        assert_eq!(Field::Diabetic.labels().len(), 4);
        assert!(Field::Bmi.labels().is_empty());
    }

    #[test]
    fn canonical_label_ignores_case() {
        assert_eq!(
            canonical_label(DIABETIC_LABELS, "No, Borderline Diabetes"),
            Some("No, borderline diabetes")
        );
        assert_eq!(canonical_label(GEN_HEALTH_LABELS, " very GOOD "), Some("Very good"));
        assert_eq!(canonical_label(RACE_LABELS, "Martian"), None);
    }

    #[test]
    fn field_parses_from_column_stem() {
        assert_eq!("bmi".parse::<Field>(), Ok(Field::Bmi));
        assert_eq!("GeneralHealth".parse::<Field>(), Ok(Field::GenHealth));
        assert!("Cholesterol".parse::<Field>().is_err());
    }

    #[test]
    fn numeric_ranges_follow_form_limits() {
        match Field::SleepTime.kind() {
            FieldKind::Numeric(range) => {
                assert_eq!(range.clamp(0.0), 1.0);
                assert_eq!(range.clamp(30.0), 24.0);
                assert!(range.contains(7.0));
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }
}
