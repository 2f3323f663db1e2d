use serde::Serialize;
use std::collections::BTreeMap;

use crate::field::{canonical_label, Field, FieldKind, DIABETIC_LABELS};
use crate::scheme::{BinaryEncoding, DiabeticEncoding, EncodingScheme, SchemeId};
use crate::selection::{RawSelection, RawValue};

/// Feature name to value, produced once per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodedFeatureMap {
    scheme: SchemeId,
    values: BTreeMap<String, f64>,
    unrecognized: Vec<Field>,
}

impl EncodedFeatureMap {
    /// Empty map tagged with the scheme that will fill it.
    pub fn new(scheme: SchemeId) -> Self {
        Self {
            scheme,
            values: BTreeMap::new(),
            unrecognized: Vec::new(),
        }
    }

    /// Builds a map from already named columns.
    pub fn from_values<I, K>(scheme: SchemeId, values: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self {
            scheme,
            values: values.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            unrecognized: Vec::new(),
        }
    }

    /// Scheme the columns were produced under.
    pub fn scheme(&self) -> SchemeId {
        self.scheme
    }

    /// Value of one column, `None` when the encoder did not produce it.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Column names in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fields whose submitted value matched nothing the scheme knows; they
    /// contributed no columns.
    pub fn unrecognized(&self) -> &[Field] {
        &self.unrecognized
    }

    /// Sum of every `<stem>_*` column, i.e. how many one-hot columns of a
    /// field are hot.
    pub fn hot_count(&self, stem: &str) -> f64 {
        let prefix = format!("{stem}_");
        self.values
            .iter()
            .filter(|(name, _)| name.starts_with(&prefix))
            .map(|(_, v)| *v)
            .sum()
    }

    fn set(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    fn one_hot(&mut self, stem: &str, labels: &[&str], hot: &str) {
        for label in labels {
            let value = if *label == hot { 1.0 } else { 0.0 };
            self.set(format!("{stem}_{label}"), value);
        }
    }
}

/// Turns a [`RawSelection`] into named columns for one scheme.
#[derive(Debug, Clone)]
pub struct Encoder {
    scheme: EncodingScheme,
}

impl Encoder {
    /// Encoder for a scheme id or a fully resolved [`EncodingScheme`].
    pub fn new(scheme: impl Into<EncodingScheme>) -> Self {
        Self {
            scheme: scheme.into(),
        }
    }

    pub fn scheme(&self) -> &EncodingScheme {
        &self.scheme
    }

    /// Encodes every field of `selection`.
    ///
    /// Never fails: a value the scheme cannot interpret sets no columns and
    /// is listed in [`EncodedFeatureMap::unrecognized`].
    pub fn encode(&self, selection: &RawSelection) -> EncodedFeatureMap {
        let mut map = EncodedFeatureMap::new(self.scheme.id());
        for (field, value) in selection.iter() {
            if !self.encode_field(&mut map, field, value) {
                log::warn!(
                    "{field}: value {value:?} not recognized under {} encoding, no column set",
                    self.scheme.id()
                );
                map.unrecognized.push(field);
            }
        }
        log::debug!(
            "encoded {} fields into {} columns ({} scheme)",
            selection.len(),
            map.len(),
            self.scheme.id()
        );
        map
    }

    fn encode_field(&self, map: &mut EncodedFeatureMap, field: Field, value: &RawValue) -> bool {
        let stem = field.column_name();
        match (field.kind(), value) {
            (FieldKind::Numeric(_), RawValue::Number(x)) => {
                map.set(stem, *x);
                true
            }
            (FieldKind::YesNo, RawValue::Label(label)) => {
                let Some(yes) = parse_yes_no(label) else {
                    return false;
                };
                match self.scheme.binary() {
                    BinaryEncoding::SingleColumn => map.set(stem, indicator(yes)),
                    BinaryEncoding::Suffix => {
                        let (no_suffix, yes_suffix) = self.scheme.casing_for(field).suffixes();
                        map.set(format!("{stem}_{no_suffix}"), indicator(!yes));
                        map.set(format!("{stem}_{yes_suffix}"), indicator(yes));
                    }
                }
                true
            }
            (FieldKind::Diabetic, RawValue::Label(label)) => {
                let Some(canonical) = canonical_label(DIABETIC_LABELS, label) else {
                    return false;
                };
                match self.scheme.diabetic() {
                    DiabeticEncoding::OneHot => map.one_hot(stem, DIABETIC_LABELS, canonical),
                    DiabeticEncoding::Ordinal => map.set(stem, diabetic_ordinal(canonical)),
                }
                true
            }
            (FieldKind::Categorical(labels), RawValue::Label(label)) => {
                match canonical_label(labels, label) {
                    Some(canonical) => {
                        map.one_hot(stem, labels, canonical);
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }
}

fn parse_yes_no(label: &str) -> Option<bool> {
    match label.trim() {
        l if l.eq_ignore_ascii_case("yes") => Some(true),
        l if l.eq_ignore_ascii_case("no") => Some(false),
        _ => None,
    }
}

fn indicator(on: bool) -> f64 {
    if on {
        1.0
    } else {
        0.0
    }
}

/// Both borderline and pregnancy-only diabetes sit halfway.
fn diabetic_ordinal(canonical: &str) -> f64 {
    match canonical {
        "Yes" => 1.0,
        "No" => 0.0,
        _ => 0.5,
    }
}
