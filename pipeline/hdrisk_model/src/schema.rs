use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered feature names a model consumes. Fixed for the lifetime of a
/// model artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpectedSchema {
    names: Vec<String>,
}

/// Column order of the 13-feature models trained on the 2020 survey's
/// metric subset.
const HEART_2020_METRIC: [&str; 13] = [
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

impl ExpectedSchema {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Fallback for models that do not record their feature names.
    pub fn heart_2020_metric() -> Self {
        Self::new(HEART_2020_METRIC)
    }

    /// Prefers the names the model declares; otherwise the caller's fallback.
    pub fn resolve(declared: Option<&[String]>, fallback: Option<&ExpectedSchema>) -> Option<Self> {
        match (declared, fallback) {
            (Some(names), _) => Some(Self::new(names.iter().cloned())),
            (None, Some(fallback)) => Some(fallback.clone()),
            (None, None) => None,
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub(crate) fn first_duplicate(&self) -> Option<&str> {
        self.names
            .iter()
            .enumerate()
            .find(|(i, name)| self.names[..*i].contains(*name))
            .map(|(_, name)| name.as_str())
    }
}

impl fmt::Display for ExpectedSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names.join(", "))
    }
}
