//! Signal processing: validity checks, null-tolerant statistics and the
//! deterministic health rules evaluated on averaged sensor signals.

mod condition_rules;
mod health_analyzer;
mod validity;

pub use condition_rules::{machine_condition, temperature_anomaly, vibration_anomaly};
pub use health_analyzer::HealthAnalyzer;
pub use validity::{is_valid, mean_of, numeric_value, safe_mean};
