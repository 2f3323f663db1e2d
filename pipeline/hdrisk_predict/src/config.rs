//! `hdrisk.toml` configuration.
//!
//! ```toml
//! model = "models/heart_disease_rf.json"
//! scaler = "models/heart_disease_scaler.json"
//! threshold = 0.35
//! fallback_schema = "heart-2020-metric"
//! ```
//!
//! Relative paths resolve against the directory holding the config file.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fs::read_to_string;
use std::str::FromStr;
use std::path::{Path, PathBuf};

use hdrisk_model::ExpectedSchema;

use crate::error::ConfigError;
use crate::threshold::DecisionThreshold;

pub const CONFIG_FILE: &str = "hdrisk.toml";

/// Schema used when the model does not declare feature names.
///
/// Written either as a preset name (`"heart-2020-metric"`) or as a list of
/// column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FallbackSchema {
    Preset(SchemaPreset),
    Names(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaPreset {
    Heart2020Metric,
}

impl SchemaPreset {
    pub const ALL: [SchemaPreset; 1] = [SchemaPreset::Heart2020Metric];

    pub fn as_str(self) -> &'static str {
        match self {
            SchemaPreset::Heart2020Metric => "heart-2020-metric",
        }
    }
}

impl FromStr for SchemaPreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchemaPreset::ALL
            .into_iter()
            .find(|preset| preset.as_str() == s.trim())
            .ok_or_else(|| ConfigError::UnknownPreset(s.to_string()))
    }
}

/// Shape of `fallback_schema` as written in the file.
#[derive(Deserialize)]
#[serde(untagged)]
enum FallbackSchemaRepr {
    Preset(String),
    Names(Vec<String>),
}

impl<'de> Deserialize<'de> for FallbackSchema {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match FallbackSchemaRepr::deserialize(deserializer)? {
            FallbackSchemaRepr::Preset(name) => name
                .parse()
                .map(FallbackSchema::Preset)
                .map_err(de::Error::custom),
            FallbackSchemaRepr::Names(names) => Ok(FallbackSchema::Names(names)),
        }
    }
}

impl FallbackSchema {
    pub fn to_schema(&self) -> ExpectedSchema {
        match self {
            FallbackSchema::Preset(SchemaPreset::Heart2020Metric) => {
                ExpectedSchema::heart_2020_metric()
            }
            FallbackSchema::Names(names) => ExpectedSchema::new(names.iter().cloned()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaler: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_schema: Option<FallbackSchema>,
}

impl PipelineConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = parse_config(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        config.decision_threshold()?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        for slot in [&mut self.model, &mut self.scaler].into_iter().flatten() {
            if slot.is_relative() {
                *slot = base.join(&*slot);
            }
        }
    }

    pub fn decision_threshold(&self) -> Result<DecisionThreshold, ConfigError> {
        DecisionThreshold::from_option(self.threshold)
    }

    pub fn fallback(&self) -> Option<ExpectedSchema> {
        self.fallback_schema.as_ref().map(FallbackSchema::to_schema)
    }

    /// Values set in `overrides` replace those in `self`.
    pub fn merge(self, overrides: PipelineConfig) -> PipelineConfig {
        PipelineConfig {
            model: overrides.model.or(self.model),
            scaler: overrides.scaler.or(self.scaler),
            threshold: overrides.threshold.or(self.threshold),
            fallback_schema: overrides.fallback_schema.or(self.fallback_schema),
        }
    }
}

pub fn parse_config(text: &str) -> Result<PipelineConfig, toml::de::Error> {
    toml::from_str::<PipelineConfig>(text)
}
