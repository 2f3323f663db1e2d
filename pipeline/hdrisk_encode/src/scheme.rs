//! Encoding schemes.
//!
//! A trained model only understands the column layout it was fit on, so a
//! scheme is a property of the model artifact, not of the form.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::field::Field;

/// Named scheme a model artifact declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemeId {
    /// Yes/No as `<Field>_No`/`<Field>_Yes`, Diabetic one-hot.
    OneHotSuffix,
    /// Yes/No as one 0/1 column, Diabetic one-hot.
    SingleColumn,
    /// Yes/No as one 0/1 column, Diabetic as a 0/0.5/1 scale point.
    OrdinalDiabetic,
}

impl SchemeId {
    pub const ALL: [SchemeId; 3] = [
        SchemeId::OneHotSuffix,
        SchemeId::SingleColumn,
        SchemeId::OrdinalDiabetic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SchemeId::OneHotSuffix => "one-hot-suffix",
            SchemeId::SingleColumn => "single-column",
            SchemeId::OrdinalDiabetic => "ordinal-diabetic",
        }
    }
}

impl fmt::Display for SchemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown encoding scheme '{0}' (expected one-hot-suffix, single-column or ordinal-diabetic)")]
pub struct UnknownScheme(pub String);

impl FromStr for SchemeId {
    type Err = UnknownScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchemeId::ALL
            .into_iter()
            .find(|id| id.as_str() == s.trim())
            .ok_or_else(|| UnknownScheme(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryEncoding {
    Suffix,
    SingleColumn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiabeticEncoding {
    OneHot,
    Ordinal,
}

/// Spelling of the `_No`/`_Yes` suffix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuffixCasing {
    #[default]
    Title,
    Lower,
}

impl SuffixCasing {
    pub fn suffixes(self) -> (&'static str, &'static str) {
        match self {
            SuffixCasing::Title => ("No", "Yes"),
            SuffixCasing::Lower => ("no", "yes"),
        }
    }
}

/// Fully resolved column layout for one model version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingScheme {
    id: SchemeId,
    binary: BinaryEncoding,
    diabetic: DiabeticEncoding,
    default_casing: SuffixCasing,
    casing_overrides: BTreeMap<Field, SuffixCasing>,
}

impl EncodingScheme {
    pub fn from_id(id: SchemeId) -> Self {
        let (binary, diabetic) = match id {
            SchemeId::OneHotSuffix => (BinaryEncoding::Suffix, DiabeticEncoding::OneHot),
            SchemeId::SingleColumn => (BinaryEncoding::SingleColumn, DiabeticEncoding::OneHot),
            SchemeId::OrdinalDiabetic => (BinaryEncoding::SingleColumn, DiabeticEncoding::Ordinal),
        };
        Self {
            id,
            binary,
            diabetic,
            default_casing: SuffixCasing::default(),
            casing_overrides: BTreeMap::new(),
        }
    }

    pub fn with_default_casing(mut self, casing: SuffixCasing) -> Self {
        self.default_casing = casing;
        self
    }

    /// Overrides the suffix spelling for one field. Some models were fit on
    /// `Smoking_no` next to `Stroke_No`.
    pub fn with_casing(mut self, field: Field, casing: SuffixCasing) -> Self {
        self.casing_overrides.insert(field, casing);
        self
    }

    pub fn id(&self) -> SchemeId {
        self.id
    }

    pub fn binary(&self) -> BinaryEncoding {
        self.binary
    }

    pub fn diabetic(&self) -> DiabeticEncoding {
        self.diabetic
    }

    pub fn casing_for(&self, field: Field) -> SuffixCasing {
        self.casing_overrides
            .get(&field)
            .copied()
            .unwrap_or(self.default_casing)
    }
}

impl From<SchemeId> for EncodingScheme {
    fn from(id: SchemeId) -> Self {
        EncodingScheme::from_id(id)
    }
}

/// Serialized form of an [`EncodingScheme`], as stored in model artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingSpec {
    pub scheme: SchemeId,
    #[serde(default)]
    pub default_casing: SuffixCasing,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub suffix_casing: BTreeMap<Field, SuffixCasing>,
}

impl EncodingSpec {
    pub fn new(scheme: SchemeId) -> Self {
        Self {
            scheme,
            default_casing: SuffixCasing::default(),
            suffix_casing: BTreeMap::new(),
        }
    }
}

impl From<&EncodingSpec> for EncodingScheme {
    fn from(spec: &EncodingSpec) -> Self {
        spec.suffix_casing.iter().fold(
            EncodingScheme::from_id(spec.scheme).with_default_casing(spec.default_casing),
            |scheme, (field, casing)| scheme.with_casing(*field, *casing),
        )
    }
}
