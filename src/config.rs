use crate::classifiers::LogisticRegressionParams;
use crate::error::ConfigError;
use crate::serving::ModelSettings;
use crate::tasks::{DEFAULT_SEED, HoldoutEvaluation};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumString, VariantNames};

fn default_bind_address() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_holdout_fraction() -> f64 {
    0.2
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

/// Service configuration. Every field has a default, so an empty JSON
/// object is a valid configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// ARFF file to fit on; the bundled Iris data when absent.
    #[serde(default)]
    pub dataset: Option<PathBuf>,

    /// Zero-based class attribute position; the last attribute when absent.
    #[serde(default)]
    pub class_index: Option<usize>,

    /// Class whose probability `/score` returns.
    #[serde(default)]
    pub score_class: Option<String>,

    #[serde(default = "default_holdout_fraction")]
    pub holdout_fraction: f64,

    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default)]
    pub log_format: LogFormat,

    #[serde(default)]
    pub model: LogisticRegressionParams,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            dataset: None,
            class_index: None,
            score_class: None,
            holdout_fraction: default_holdout_fraction(),
            seed: default_seed(),
            log_format: LogFormat::default(),
            model: LogisticRegressionParams::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: ServerConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));
        if !(0.0..1.0).contains(&self.holdout_fraction) {
            return invalid(format!(
                "holdout_fraction must be in [0, 1), got {}",
                self.holdout_fraction
            ));
        }
        let positive = [
            ("model.learning_rate", self.model.learning_rate),
            ("model.c", self.model.c),
            ("model.tolerance", self.model.tolerance),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return invalid(format!("{name} must be positive, got {value}"));
            }
        }
        if self.model.max_iterations == 0 {
            return invalid("model.max_iterations must be at least 1".into());
        }
        if self.bind_address.trim().is_empty() {
            return invalid("bind_address must not be empty".into());
        }
        Ok(())
    }

    pub fn model_settings(&self) -> Result<ModelSettings, ConfigError> {
        Ok(ModelSettings {
            params: self.model.clone(),
            holdout: HoldoutEvaluation::new(self.holdout_fraction, self.seed)?,
            score_class: self.score_class.clone(),
        })
    }
}
