//! Per-record health analysis
//!
//! Averages the record's temperature and vibration channels, runs the
//! condition rules over those averages and derives the record verdict.

use chrono::{DateTime, SecondsFormat, Utc};

use super::condition_rules::{machine_condition, temperature_anomaly, vibration_anomaly};
use super::validity::safe_mean;
use crate::types::{
    fields, Completeness, DataCompleteness, HealthDiagnosis, SensorAverages, SensorRecord,
};

/// Rule-based analyzer for single records.
pub struct HealthAnalyzer;

impl HealthAnalyzer {
    /// Diagnose one record, stamping the result with `analyzed_at`.
    pub fn analyze(record: &SensorRecord, analyzed_at: DateTime<Utc>) -> HealthDiagnosis {
        let avg_temp = safe_mean(record.fields(&fields::TEMPERATURE));
        let avg_vibration = safe_mean(record.fields(&fields::VIBRATION));

        let condition = machine_condition(avg_temp, avg_vibration);

        HealthDiagnosis {
            machine_condition: condition,
            temperature_analysis: temperature_anomaly(avg_temp).to_string(),
            vibration_analysis: vibration_anomaly(avg_vibration).to_string(),
            data_completeness: DataCompleteness {
                temperature: Completeness::of(avg_temp),
                vibration: Completeness::of(avg_vibration),
            },
            sensor_averages: SensorAverages {
                temperature: avg_temp,
                vibration: avg_vibration,
            },
            timestamp: analyzed_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            overall_health: condition.health(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{diagnosis_messages, HealthStatus, MachineCondition};
    use chrono::TimeZone;
    use serde_json::{json, Value};

    fn record(value: Value) -> SensorRecord {
        match value {
            Value::Object(map) => SensorRecord::new(map),
            other => panic!("expected object, got {other}"),
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_healthy_record() {
        let r = record(json!({
            "temperature_one": 68.0, "temperature_two": 72.0,
            "vibration_x": 0.9, "vibration_y": 1.0, "vibration_z": 1.1
        }));
        let d = HealthAnalyzer::analyze(&r, fixed_time());
        assert_eq!(d.machine_condition, MachineCondition::Safe);
        assert_eq!(d.overall_health, HealthStatus::Healthy);
        assert_eq!(d.temperature_analysis, diagnosis_messages::TEMPERATURE_NORMAL);
        assert_eq!(d.vibration_analysis, diagnosis_messages::VIBRATION_NORMAL);
        assert_eq!(d.data_completeness.temperature, Completeness::Complete);
        assert_eq!(d.data_completeness.vibration, Completeness::Complete);
        assert_eq!(d.sensor_averages.temperature, Some(70.0));
        assert_eq!(d.timestamp, "2024-03-01T12:00:00.000Z");
    }

    #[test]
    fn test_partial_vibration_still_averages() {
        let r = record(json!({
            "temperature_one": 90.0, "temperature_two": "90",
            "vibration_x": 2.0, "vibration_y": null
        }));
        let d = HealthAnalyzer::analyze(&r, fixed_time());
        assert_eq!(d.sensor_averages.vibration, Some(2.0));
        assert_eq!(d.machine_condition, MachineCondition::Maintain);
        assert_eq!(d.overall_health, HealthStatus::Unhealthy);
        assert_eq!(d.vibration_analysis, diagnosis_messages::VIBRATION_UNBALANCE);
    }

    #[test]
    fn test_missing_temperature_is_unknown() {
        let r = record(json!({
            "temperature_one": "n/a",
            "vibration_x": 1.0, "vibration_y": 1.0, "vibration_z": 1.0
        }));
        let d = HealthAnalyzer::analyze(&r, fixed_time());
        assert_eq!(d.machine_condition, MachineCondition::Unknown);
        assert_eq!(d.overall_health, HealthStatus::Unknown);
        assert_eq!(d.temperature_analysis, diagnosis_messages::TEMPERATURE_MISSING);
        assert_eq!(d.data_completeness.temperature, Completeness::Incomplete);
        assert_eq!(d.data_completeness.vibration, Completeness::Complete);
    }

    #[test]
    fn test_serialized_shape() {
        let d = HealthAnalyzer::analyze(&SensorRecord::default(), fixed_time());
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["machine_condition"], json!("Unknown Condition - Insufficient Data"));
        assert_eq!(v["overall_health"], json!("Unknown"));
        assert_eq!(v["data_completeness"]["vibration"], json!("Incomplete"));
        assert_eq!(v["sensor_averages"]["temperature"], Value::Null);
    }
}
