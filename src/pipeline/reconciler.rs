//! Result reconciliation
//!
//! Combines the batch consensus, the per-record diagnoses and completeness
//! counters into the final response. The batch verdict is derived from the
//! diagnoses alone, never from model consensus values.

use crate::types::{
    BatchHealth, BatchResult, ConsensusMap, DataQuality, HealthAnalysis, HealthDiagnosis,
    HealthStatus, RecordPredictions,
};

pub struct ResultReconciler;

impl ResultReconciler {
    /// Batch verdict from per-record diagnoses.
    ///
    /// - every record lacks data → `Unknown - Insufficient Data`
    /// - any record unhealthy → `Unhealthy`
    /// - otherwise → `Healthy`
    pub fn batch_health(diagnoses: &[HealthDiagnosis]) -> BatchHealth {
        if diagnoses
            .iter()
            .all(|d| d.machine_condition.is_insufficient_data())
        {
            BatchHealth::UnknownInsufficientData
        } else if diagnoses
            .iter()
            .any(|d| d.overall_health == HealthStatus::Unhealthy)
        {
            BatchHealth::Unhealthy
        } else {
            BatchHealth::Healthy
        }
    }

    /// Completeness counters. A record is complete when none of its models
    /// reported insufficient data.
    pub fn data_quality(total_records: usize, predictions: &[RecordPredictions]) -> DataQuality {
        let complete_records = predictions
            .iter()
            .filter(|p| !p.has_insufficient_data())
            .count();
        DataQuality {
            total_records,
            complete_records,
            incomplete_records: total_records.saturating_sub(complete_records),
        }
    }

    /// Assemble the final response.
    pub fn reconcile(
        consensus: ConsensusMap,
        diagnoses: Vec<HealthDiagnosis>,
        total_records: usize,
        predictions: &[RecordPredictions],
    ) -> BatchResult {
        BatchResult {
            predictions: consensus,
            complete_health_analysis: HealthAnalysis::from_diagnoses(diagnoses),
            data_quality: Self::data_quality(total_records, predictions),
        }
    }
}
