use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::field::{Field, FieldKind};

/// A single value entered on the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Label(String),
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Label(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Label(value)
    }
}

/// The values a user submitted for one prediction request.
///
/// Deserializes from a flat JSON object keyed by field stem, e.g.
/// `{"BMI": 25.0, "Smoking": "No"}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawSelection {
    values: BTreeMap<Field, RawValue>,
}

impl RawSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`RawSelection::insert`].
    pub fn with(mut self, field: Field, value: impl Into<RawValue>) -> Self {
        self.values.insert(field, value.into());
        self
    }

    /// Sets a field, returning the value it replaced.
    pub fn insert(&mut self, field: Field, value: impl Into<RawValue>) -> Option<RawValue> {
        self.values.insert(field, value.into())
    }

    /// Submitted value for `field`, if any.
    pub fn get(&self, field: Field) -> Option<&RawValue> {
        self.values.get(&field)
    }

    /// Fields in declaration order with their values.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &RawValue)> {
        self.values.iter().map(|(f, v)| (*f, v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns a copy with every numeric value clamped into its field's
    /// collection range. The encoder itself never clamps.
    pub fn clamped(&self) -> RawSelection {
        let values = self
            .values
            .iter()
            .map(|(field, value)| {
                let value = match (field.kind(), value) {
                    (FieldKind::Numeric(range), RawValue::Number(x)) if !range.contains(*x) => {
                        let clamped = range.clamp(*x);
                        log::warn!("{field} value {x} outside [{}, {}], using {clamped}", range.min, range.max);
                        RawValue::Number(clamped)
                    }
                    _ => value.clone(),
                };
                (*field, value)
            })
            .collect();
        RawSelection { values }
    }
}

impl FromIterator<(Field, RawValue)> for RawSelection {
    fn from_iter<T: IntoIterator<Item = (Field, RawValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
