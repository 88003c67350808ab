//! Condition Rules
//!
//! Deterministic threshold rules for machine condition, temperature anomaly
//! and vibration fault classification. Every input is optional: `None` means
//! the average could not be computed from the record.

use crate::types::{condition_thresholds::*, diagnosis_messages as msg, MachineCondition};

/// Classify the machine from averaged temperature (°C) and vibration (mm/s).
///
/// Either input missing yields [`MachineCondition::Unknown`].
pub fn machine_condition(temperature: Option<f64>, vibration: Option<f64>) -> MachineCondition {
    let (Some(temp), Some(vib)) = (temperature, vibration) else {
        return MachineCondition::Unknown;
    };

    if temp < SAFE_TEMPERATURE_MAX && vib < SAFE_VIBRATION_MAX {
        MachineCondition::Safe
    } else if temp < MAINTAIN_TEMPERATURE_MAX && vib < MAINTAIN_VIBRATION_MAX {
        MachineCondition::Maintain
    } else {
        MachineCondition::Repair
    }
}

/// Describe the temperature anomaly severity.
pub fn temperature_anomaly(temperature: Option<f64>) -> &'static str {
    let Some(temp) = temperature else {
        return msg::TEMPERATURE_MISSING;
    };

    if temp < TEMPERATURE_MODERATE {
        msg::TEMPERATURE_NORMAL
    } else if temp < TEMPERATURE_SIGNIFICANT {
        msg::TEMPERATURE_MODERATE
    } else if temp < TEMPERATURE_CRITICAL {
        msg::TEMPERATURE_SIGNIFICANT
    } else {
        msg::TEMPERATURE_CRITICAL
    }
}

/// Describe the most likely vibration fault.
pub fn vibration_anomaly(vibration: Option<f64>) -> &'static str {
    let Some(vib) = vibration else {
        return msg::VIBRATION_MISSING;
    };

    if vib < VIBRATION_UNBALANCE {
        msg::VIBRATION_NORMAL
    } else if vib < VIBRATION_MISALIGNMENT {
        msg::VIBRATION_UNBALANCE
    } else if vib < VIBRATION_LOOSENESS {
        msg::VIBRATION_MISALIGNMENT
    } else if vib < VIBRATION_BEARING_OR_GEAR {
        msg::VIBRATION_LOOSENESS
    } else {
        msg::VIBRATION_BEARING_OR_GEAR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::diagnosis_messages;

    #[test]
    fn test_safe_condition() {
        assert_eq!(machine_condition(Some(79.9), Some(1.7)), MachineCondition::Safe);
        assert_eq!(machine_condition(Some(-10.0), Some(0.0)), MachineCondition::Safe);
    }

    #[test]
    fn test_boundaries_belong_to_higher_bucket() {
        assert_eq!(machine_condition(Some(80.0), Some(1.7)), MachineCondition::Maintain);
        assert_eq!(machine_condition(Some(70.0), Some(1.8)), MachineCondition::Maintain);
        assert_eq!(machine_condition(Some(100.0), Some(1.0)), MachineCondition::Repair);
        assert_eq!(machine_condition(Some(70.0), Some(2.8)), MachineCondition::Repair);
    }

    #[test]
    fn test_maintain_condition() {
        assert_eq!(machine_condition(Some(95.0), Some(2.5)), MachineCondition::Maintain);
    }

    #[test]
    fn test_missing_input_is_unknown() {
        assert_eq!(machine_condition(None, Some(1.0)), MachineCondition::Unknown);
        assert_eq!(machine_condition(Some(60.0), None), MachineCondition::Unknown);
        assert_eq!(machine_condition(None, None), MachineCondition::Unknown);
    }

    #[test]
    fn test_temperature_buckets() {
        assert_eq!(temperature_anomaly(None), diagnosis_messages::TEMPERATURE_MISSING);
        assert_eq!(temperature_anomaly(Some(79.99)), diagnosis_messages::TEMPERATURE_NORMAL);
        assert_eq!(temperature_anomaly(Some(80.0)), diagnosis_messages::TEMPERATURE_MODERATE);
        assert_eq!(temperature_anomaly(Some(100.0)), diagnosis_messages::TEMPERATURE_SIGNIFICANT);
        assert_eq!(temperature_anomaly(Some(119.9)), diagnosis_messages::TEMPERATURE_SIGNIFICANT);
        assert_eq!(temperature_anomaly(Some(120.0)), diagnosis_messages::TEMPERATURE_CRITICAL);
    }

    #[test]
    fn test_vibration_buckets() {
        assert_eq!(vibration_anomaly(None), diagnosis_messages::VIBRATION_MISSING);
        assert_eq!(vibration_anomaly(Some(1.79)), diagnosis_messages::VIBRATION_NORMAL);
        assert_eq!(vibration_anomaly(Some(1.8)), diagnosis_messages::VIBRATION_UNBALANCE);
        assert_eq!(vibration_anomaly(Some(2.8)), diagnosis_messages::VIBRATION_MISALIGNMENT);
        assert_eq!(vibration_anomaly(Some(4.5)), diagnosis_messages::VIBRATION_LOOSENESS);
        assert_eq!(vibration_anomaly(Some(7.0)), diagnosis_messages::VIBRATION_LOOSENESS);
        assert_eq!(vibration_anomaly(Some(7.1)), diagnosis_messages::VIBRATION_BEARING_OR_GEAR);
        assert_eq!(vibration_anomaly(Some(40.0)), diagnosis_messages::VIBRATION_BEARING_OR_GEAR);
    }
}
