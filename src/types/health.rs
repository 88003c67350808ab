//! Health verdicts and the per-record diagnosis

use serde::{Deserialize, Serialize};

/// Machine condition derived from averaged temperature and vibration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MachineCondition {
    #[serde(rename = "Safe Condition")]
    Safe,
    #[serde(rename = "Maintain Condition")]
    Maintain,
    #[serde(rename = "Repair Condition")]
    Repair,
    #[serde(rename = "Unknown Condition - Insufficient Data")]
    Unknown,
}

impl MachineCondition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "Safe Condition",
            Self::Maintain => "Maintain Condition",
            Self::Repair => "Repair Condition",
            Self::Unknown => "Unknown Condition - Insufficient Data",
        }
    }

    pub fn is_insufficient_data(self) -> bool {
        self == Self::Unknown
    }

    /// Record-level verdict for this condition.
    pub fn health(self) -> HealthStatus {
        match self {
            Self::Unknown => HealthStatus::Unknown,
            Self::Safe => HealthStatus::Healthy,
            Self::Maintain | Self::Repair => HealthStatus::Unhealthy,
        }
    }
}

impl std::fmt::Display for MachineCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Health verdict for a single record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
    Unknown,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Healthy => write!(f, "Healthy"),
            Self::Unhealthy => write!(f, "Unhealthy"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Health verdict for the whole batch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BatchHealth {
    Healthy,
    Unhealthy,
    #[serde(rename = "Unknown - Insufficient Data")]
    UnknownInsufficientData,
}

impl std::fmt::Display for BatchHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Healthy => write!(f, "Healthy"),
            Self::Unhealthy => write!(f, "Unhealthy"),
            Self::UnknownInsufficientData => write!(f, "Unknown - Insufficient Data"),
        }
    }
}

/// Whether a signal average could be computed from the record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Completeness {
    Complete,
    Incomplete,
}

impl Completeness {
    pub fn of<T>(value: Option<T>) -> Self {
        if value.is_some() {
            Self::Complete
        } else {
            Self::Incomplete
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataCompleteness {
    pub temperature: Completeness,
    pub vibration: Completeness,
}

/// Averages the rules were evaluated on. `None` serialises as `null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SensorAverages {
    pub temperature: Option<f64>,
    pub vibration: Option<f64>,
}

/// Rule-based diagnosis of one record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthDiagnosis {
    pub machine_condition: MachineCondition,
    pub temperature_analysis: String,
    pub vibration_analysis: String,
    pub data_completeness: DataCompleteness,
    pub sensor_averages: SensorAverages,
    /// RFC 3339 UTC timestamp of the analysis
    pub timestamp: String,
    pub overall_health: HealthStatus,
}
