//! Machine-condition thresholds and the literal diagnosis messages
//!
//! Breakpoints are half-open intervals `[lo, hi)`: a value sitting exactly on
//! a breakpoint belongs to the higher bucket. Both the numbers and the message
//! text are consumed verbatim by downstream systems.

/// Numeric breakpoints for the rule engine.
pub mod condition_thresholds {
    // === Machine condition (combined temperature + vibration) ===
    /// Average temperature below this (with safe vibration) is a safe condition (°C)
    pub const SAFE_TEMPERATURE_MAX: f64 = 80.0;
    /// Average vibration below this (with safe temperature) is a safe condition (mm/s)
    pub const SAFE_VIBRATION_MAX: f64 = 1.8;
    /// Average temperature below this still allows a maintain condition (°C)
    pub const MAINTAIN_TEMPERATURE_MAX: f64 = 100.0;
    /// Average vibration below this still allows a maintain condition (mm/s)
    pub const MAINTAIN_VIBRATION_MAX: f64 = 2.8;

    // === Temperature anomaly buckets (°C) ===
    /// Start of the moderate bucket
    pub const TEMPERATURE_MODERATE: f64 = 80.0;
    /// Start of the significant bucket
    pub const TEMPERATURE_SIGNIFICANT: f64 = 100.0;
    /// Start of the critical bucket
    pub const TEMPERATURE_CRITICAL: f64 = 120.0;

    // === Vibration fault buckets (mm/s RMS, ISO 10816 style zones) ===
    /// Start of the unbalance bucket
    pub const VIBRATION_UNBALANCE: f64 = 1.8;
    /// Start of the misalignment bucket
    pub const VIBRATION_MISALIGNMENT: f64 = 2.8;
    /// Start of the looseness bucket
    pub const VIBRATION_LOOSENESS: f64 = 4.5;
    /// Start of the bearing / gear mesh bucket
    pub const VIBRATION_BEARING_OR_GEAR: f64 = 7.1;
}

/// Literal anomaly descriptions emitted by the rule engine.
pub mod diagnosis_messages {
    pub const TEMPERATURE_MISSING: &str = "Temperature data missing or invalid";
    pub const TEMPERATURE_NORMAL: &str = "No temperature anomaly detected";
    pub const TEMPERATURE_MODERATE: &str =
        "Moderate temperature anomaly: elevated operating temperature";
    pub const TEMPERATURE_SIGNIFICANT: &str = "Significant temperature anomaly: overheating risk";
    pub const TEMPERATURE_CRITICAL: &str =
        "Critical temperature anomaly: immediate shutdown recommended";

    pub const VIBRATION_MISSING: &str = "Vibration data missing or invalid";
    pub const VIBRATION_NORMAL: &str = "No vibration anomaly detected";
    pub const VIBRATION_UNBALANCE: &str = "Unbalance detected: check rotor balance";
    pub const VIBRATION_MISALIGNMENT: &str = "Misalignment detected: check shaft alignment";
    pub const VIBRATION_LOOSENESS: &str = "Looseness detected: check mounting and fasteners";
    pub const VIBRATION_BEARING_OR_GEAR: &str =
        "Bearing or gear mesh fault detected: inspect bearings and gearbox";
}
