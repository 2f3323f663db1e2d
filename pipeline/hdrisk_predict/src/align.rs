//! Projection of named feature values onto a model's expected schema.
//!
//! Alignment is total: expected names missing from the source become `0.0`
//! and names the schema does not list are dropped. Both are recorded on the
//! result so callers can surface schema drift.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use hdrisk_encode::EncodedFeatureMap;
use hdrisk_model::ExpectedSchema;

/// Anything features can be looked up in by name.
pub trait FeatureSource {
    /// Value of the named feature, if present.
    fn feature(&self, name: &str) -> Option<f64>;

    /// Every name the source holds.
    fn feature_names(&self) -> Vec<&str>;
}

impl FeatureSource for EncodedFeatureMap {
    fn feature(&self, name: &str) -> Option<f64> {
        self.get(name)
    }

    fn feature_names(&self) -> Vec<&str> {
        self.names().collect()
    }
}

impl FeatureSource for BTreeMap<String, f64> {
    fn feature(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }

    fn feature_names(&self) -> Vec<&str> {
        self.keys().map(String::as_str).collect()
    }
}

impl FeatureSource for HashMap<String, f64> {
    fn feature(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }

    fn feature_names(&self) -> Vec<&str> {
        self.keys().map(String::as_str).collect()
    }
}

/// One value per expected feature, in schema order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedFeatureVector {
    names: Vec<String>,
    values: Vec<f64>,
    defaulted: Vec<String>,
    dropped: Vec<String>,
}

impl AlignedFeatureVector {
    /// Schema names the values line up with.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Values in schema order, ready for the classifier.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Expected features the source lacked; each was filled with `0.0`.
    pub fn defaulted(&self) -> &[String] {
        &self.defaulted
    }

    /// Source features the schema does not list.
    pub fn dropped(&self) -> &[String] {
        &self.dropped
    }
}

impl FeatureSource for AlignedFeatureVector {
    fn feature(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.values[i])
    }

    fn feature_names(&self) -> Vec<&str> {
        self.names.iter().map(String::as_str).collect()
    }
}

/// Projects `source` onto `schema`, one value per expected name in schema
/// order. Never fails.
pub fn align<S>(source: &S, schema: &ExpectedSchema) -> AlignedFeatureVector
where
    S: FeatureSource + ?Sized,
{
    let mut values = Vec::with_capacity(schema.len());
    let mut defaulted = Vec::new();
    for name in schema.iter() {
        match source.feature(name) {
            Some(value) => values.push(value),
            None => {
                values.push(0.0);
                defaulted.push(name.to_string());
            }
        }
    }

    let dropped: Vec<String> = source
        .feature_names()
        .into_iter()
        .filter(|name| !schema.contains(name))
        .map(str::to_string)
        .collect();

    if !defaulted.is_empty() {
        log::warn!(
            "{} of {} expected features missing, defaulted to 0: {}",
            defaulted.len(),
            schema.len(),
            defaulted.join(", ")
        );
    }
    if !dropped.is_empty() {
        log::debug!("ignoring features not in schema: {}", dropped.join(", "));
    }

    AlignedFeatureVector {
        names: schema.names().to_vec(),
        values,
        defaulted,
        dropped,
    }
}
