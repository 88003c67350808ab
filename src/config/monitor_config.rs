//! Monitor Configuration - batch limits and the model registry as TOML values
//!
//! Each struct implements `Default` so that running with no config file
//! reproduces the production model set and feature wiring.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults::{
    CONFIG_ENV_VAR, LOCAL_CONFIG_FILE, MAX_BATCH_RECORDS, MIN_BATCH_RECORDS, OVERALL_HEALTH_KEY,
};
use crate::types::fields;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a monitor deployment.
///
/// Load with `MonitorConfig::load()` which searches:
/// 1. `$CONDITION_MONITOR_CONFIG` env var
/// 2. `./monitor_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonitorConfig {
    /// Batch intake limits
    #[serde(default)]
    pub batch: BatchConfig,

    /// Predictive models, evaluated in this order
    #[serde(default = "default_models")]
    pub models: Vec<ModelConfig>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            batch: BatchConfig::default(),
            models: default_models(),
        }
    }
}

impl MonitorConfig {
    /// Load configuration using the standard search order:
    /// 1. `$CONDITION_MONITOR_CONFIG` environment variable
    /// 2. `./monitor_config.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(
                            path = %p.display(),
                            models = config.models.len(),
                            "Loaded monitor config from {CONFIG_ENV_VAR}"
                        );
                        return config;
                    }
                    Err(e) => {
                        warn!(
                            path = %p.display(),
                            error = %e,
                            "Failed to load config from {CONFIG_ENV_VAR}, falling back"
                        );
                    }
                }
            } else {
                warn!(path = %path, "{CONFIG_ENV_VAR} points to non-existent file, falling back");
            }
        }

        // 2. Check ./monitor_config.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(
                        models = config.models.len(),
                        "Loaded monitor config from ./{LOCAL_CONFIG_FILE}"
                    );
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{LOCAL_CONFIG_FILE}, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No {LOCAL_CONFIG_FILE} found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    ///
    /// This is the single validation point for file-backed configs: unknown
    /// keys and suspicious ranges are logged here once, and any hard error
    /// rejects the file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        // Unknown keys are warnings only
        for w in &super::validation::validate_unknown_keys(&contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        let (_, range_warnings) = super::validation::validate_ranges(&config);
        for w in &range_warnings {
            warn!("{}", w);
        }
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate limits and model definitions for internal consistency.
    ///
    /// Rules:
    /// - `batch.max_records` within `1..=1800`
    /// - at least one model, names unique and non-empty, none named `overall_health`
    /// - every model has features, without duplicates
    /// - predictor weights match the feature count, all numbers finite
    /// - banded predictors have strictly ascending bands with non-empty labels
    ///
    /// Pure: collects every hard error and logs nothing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        let max = self.batch.max_records;
        if !(MIN_BATCH_RECORDS..=MAX_BATCH_RECORDS).contains(&max) {
            errors.push(format!(
                "batch.max_records = {max} is outside the allowed range ({MIN_BATCH_RECORDS}-{MAX_BATCH_RECORDS})"
            ));
        }

        if self.models.is_empty() {
            errors.push("at least one [[models]] entry is required".to_string());
        }

        let mut seen_names = HashSet::new();
        for model in &self.models {
            let name = model.name.trim();
            if name.is_empty() {
                errors.push("models.name must not be empty".to_string());
                continue;
            }
            if name == OVERALL_HEALTH_KEY {
                errors.push(format!(
                    "model name '{OVERALL_HEALTH_KEY}' is reserved for the batch verdict"
                ));
            }
            if !seen_names.insert(name) {
                errors.push(format!("duplicate model name '{name}'"));
            }

            if model.features.is_empty() {
                errors.push(format!("model '{name}': features must not be empty"));
            }
            let mut seen_features = HashSet::new();
            for feature in &model.features {
                if feature.trim().is_empty() {
                    errors.push(format!("model '{name}': feature names must not be empty"));
                } else if !seen_features.insert(feature.as_str()) {
                    errors.push(format!("model '{name}': duplicate feature '{feature}'"));
                }
            }

            model.predictor.check(name, model.features.len(), &mut errors);
        }

        let (range_errors, _) = super::validation::validate_ranges(self);
        errors.extend(range_errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Batch
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchConfig {
    /// Largest batch accepted (records)
    #[serde(default = "default_max_records")]
    pub max_records: usize,
}

fn default_max_records() -> usize {
    MAX_BATCH_RECORDS
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_records: default_max_records(),
        }
    }
}

// ============================================================================
// Models
// ============================================================================

/// One predictive model and the ordered record fields it consumes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelConfig {
    /// Output key in the consensus map
    pub name: String,

    /// Record fields, in the order the model expects them
    pub features: Vec<String>,

    pub predictor: PredictorConfig,
}

/// Reference model kinds that can be described entirely in TOML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PredictorConfig {
    /// `intercept + Σ weights[i]·x[i]`, emitted as a number
    Linear {
        weights: Vec<f64>,
        #[serde(default)]
        intercept: f64,
    },
    /// Linear score mapped onto labelled bands
    Banded {
        weights: Vec<f64>,
        #[serde(default)]
        intercept: f64,
        /// Ascending upper bounds; the first band with `score < below` wins
        bands: Vec<BandConfig>,
        /// Label for scores at or above the last band
        above_label: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BandConfig {
    pub below: f64,
    pub label: String,
}

impl PredictorConfig {
    pub fn weights(&self) -> &[f64] {
        match self {
            Self::Linear { weights, .. } | Self::Banded { weights, .. } => weights,
        }
    }

    fn check(&self, model: &str, feature_count: usize, errors: &mut Vec<String>) {
        let weights = self.weights();
        if weights.len() != feature_count {
            errors.push(format!(
                "model '{model}': {} weights for {feature_count} features",
                weights.len()
            ));
        }
        if weights.iter().any(|w| !w.is_finite()) {
            errors.push(format!("model '{model}': weights must be finite numbers"));
        }

        match self {
            Self::Linear { intercept, .. } => {
                Self::check_finite(*intercept, model, "intercept", errors);
            }
            Self::Banded {
                intercept,
                bands,
                above_label,
                ..
            } => {
                Self::check_finite(*intercept, model, "intercept", errors);
                if bands.is_empty() {
                    errors.push(format!("model '{model}': banded predictor needs at least one band"));
                }
                for band in bands {
                    Self::check_finite(band.below, model, "bands.below", errors);
                    if band.label.trim().is_empty() {
                        errors.push(format!("model '{model}': band labels must not be empty"));
                    }
                }
                if bands.windows(2).any(|pair| pair[1].below <= pair[0].below) {
                    errors.push(format!(
                        "model '{model}': bands must be strictly ascending by 'below'"
                    ));
                }
                if above_label.trim().is_empty() {
                    errors.push(format!("model '{model}': above_label must not be empty"));
                }
            }
        }
    }

    fn check_finite(value: f64, model: &str, field: &str, errors: &mut Vec<String>) {
        if !value.is_finite() {
            errors.push(format!("model '{model}': {field} must be finite (got {value})"));
        }
    }
}

fn band(below: f64, label: &str) -> BandConfig {
    BandConfig {
        below,
        label: label.to_string(),
    }
}

fn model(name: &str, features: &[&str], predictor: PredictorConfig) -> ModelConfig {
    ModelConfig {
        name: name.to_string(),
        features: features.iter().map(|f| (*f).to_string()).collect(),
        predictor,
    }
}

/// Production model set: one model per sensor family.
pub fn default_models() -> Vec<ModelConfig> {
    let third = 1.0 / 3.0;
    vec![
        model(
            "temperature",
            &fields::TEMPERATURE,
            PredictorConfig::Linear {
                weights: vec![0.5, 0.5],
                intercept: 0.0,
            },
        ),
        model(
            "vibration",
            &fields::VIBRATION,
            PredictorConfig::Banded {
                weights: vec![third, third, third],
                intercept: 0.0,
                bands: vec![band(1.8, "normal"), band(2.8, "warning"), band(7.1, "alert")],
                above_label: "critical".to_string(),
            },
        ),
        model(
            "magnetic_flux",
            &[fields::MAGNETIC_FLUX_X, fields::MAGNETIC_FLUX_Y, fields::MAGNETIC_FLUX_Z],
            PredictorConfig::Linear {
                weights: vec![third, third, third],
                intercept: 0.0,
            },
        ),
        model(
            "audible_sound",
            &[fields::VIBRATION_X, fields::VIBRATION_Y, fields::VIBRATION_Z, fields::AUDIBLE_SOUND],
            PredictorConfig::Banded {
                weights: vec![1.0, 1.0, 1.0, 1.0],
                intercept: 0.0,
                bands: vec![band(85.0, "normal"), band(100.0, "elevated")],
                above_label: "excessive".to_string(),
            },
        ),
        model(
            "ultra_sound",
            &[fields::VIBRATION_X, fields::VIBRATION_Y, fields::VIBRATION_Z, fields::ULTRA_SOUND],
            PredictorConfig::Banded {
                weights: vec![1.0, 1.0, 1.0, 1.0],
                intercept: 0.0,
                bands: vec![band(40.0, "normal"), band(60.0, "elevated")],
                above_label: "excessive".to_string(),
            },
        ),
    ]
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
}
