//! Config validation: unknown-key detection with Levenshtein suggestions
//! and range checks on model definitions.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree (including every `[[models]]` entry), compare against
//! known field names, and emit warnings with "did you mean?" suggestions.
//! Then proceed with normal serde deserialization. Warnings never break
//! existing configs.

use std::collections::HashSet;

use crate::types::fields;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, ", did you mean '{s}'?")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for MonitorConfig.
///
/// Entries of an array of tables share their parent's path, so every
/// `[[models]]` key is checked against `models.<field>`.
/// Any new field added to MonitorConfig must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [batch]
        "batch",
        "batch.max_records",
        // [[models]]
        "models",
        "models.name",
        "models.features",
        // [models.predictor]
        "models.predictor",
        "models.predictor.kind",
        "models.predictor.weights",
        "models.predictor.intercept",
        "models.predictor.bands",
        "models.predictor.bands.below",
        "models.predictor.bands.label",
        "models.predictor.above_label",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1 }, m = [{ n = 1 }, { o = 2 }] }` yields:
/// `["a", "a.b", "m", "m.n", "m.o"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            match v {
                toml::Value::Table(_) => keys.extend(walk_toml_keys(v, &path)),
                toml::Value::Array(items) => {
                    for item in items.iter().filter(|item| item.is_table()) {
                        for nested in walk_toml_keys(item, &path) {
                            if !keys.contains(&nested) {
                                keys.push(nested);
                            }
                        }
                    }
                }
                _ => {}
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties go to the alphabetically first key so suggestions are stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (k, levenshtein(unknown, k)))
        .filter(|(_, dist)| *dist <= 3)
        .min_by(|(ka, da), (kb, db)| da.cmp(db).then_with(|| ka.cmp(kb)))
        .map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys, it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Range Validation
// ============================================================================

/// Validate value ranges on a parsed MonitorConfig.
///
/// Returns (errors, warnings). Errors are values that must prevent startup;
/// warnings are suspicious but not fatal.
pub fn validate_ranges(config: &super::MonitorConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let known_fields: HashSet<&str> = [
        fields::TEMPERATURE_ONE,
        fields::TEMPERATURE_TWO,
        fields::VIBRATION_X,
        fields::VIBRATION_Y,
        fields::VIBRATION_Z,
        fields::MAGNETIC_FLUX_X,
        fields::MAGNETIC_FLUX_Y,
        fields::MAGNETIC_FLUX_Z,
        fields::AUDIBLE_SOUND,
        fields::ULTRA_SOUND,
    ]
    .into_iter()
    .collect();

    for (index, model) in config.models.iter().enumerate() {
        // Records are free-form maps, so an unfamiliar feature is only suspicious
        for feature in &model.features {
            if !known_fields.contains(feature.as_str()) {
                warnings.push(ValidationWarning {
                    field: format!("models[{index}].features"),
                    message: format!(
                        "model '{}' reads unrecognised sensor field '{feature}'",
                        model.name
                    ),
                    suggestion: suggest_correction(feature, &known_fields),
                });
            }
        }

        let weights = model.predictor.weights();
        if !weights.is_empty() && weights.iter().all(|w| *w == 0.0) {
            warnings.push(ValidationWarning {
                field: format!("models[{index}].predictor.weights"),
                message: format!(
                    "model '{}' has all-zero weights and ignores its inputs",
                    model.name
                ),
                suggestion: None,
            });
        }

        if model.features.len() > 64 {
            errors.push(format!(
                "model '{}' declares {} features (limit 64)",
                model.name,
                model.features.len()
            ));
        }
    }

    (errors, warnings)
}
