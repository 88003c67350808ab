//! Final response shapes written to the output channel

use serde::Serialize;

use super::{ConsensusMap, HealthDiagnosis};

/// Batch completeness counters.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DataQuality {
    pub total_records: usize,
    pub complete_records: usize,
    pub incomplete_records: usize,
}

/// Diagnoses for the batch. A single-record batch is collapsed to one object.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum HealthAnalysis {
    Single(HealthDiagnosis),
    Batch(Vec<HealthDiagnosis>),
}

impl HealthAnalysis {
    pub fn from_diagnoses(mut diagnoses: Vec<HealthDiagnosis>) -> Self {
        if diagnoses.len() == 1 {
            if let Some(only) = diagnoses.pop() {
                return Self::Single(only);
            }
        }
        Self::Batch(diagnoses)
    }

    pub fn diagnoses(&self) -> &[HealthDiagnosis] {
        match self {
            Self::Single(d) => std::slice::from_ref(d),
            Self::Batch(ds) => ds,
        }
    }
}

/// Successful pipeline output.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BatchResult {
    pub predictions: ConsensusMap,
    pub complete_health_analysis: HealthAnalysis,
    pub data_quality: DataQuality,
}

/// Failure output: `{"error": "<message>"}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
