//! Pipeline Coordinator - one invocation, one batch
//!
//! ```text
//! PHASE 1: Intake        (parse, shape and size checks)
//! PHASE 2: Invocation    (every model against every record)
//! PHASE 3: Diagnosis     (rule engine per record, independent of models)
//! PHASE 4: Consensus     (mean / majority vote per model)
//! PHASE 5: Reconciliation
//! ```
//!
//! Phases 2-5 only run once intake has accepted the whole batch.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info};

use super::intake::{parse_batch, validate_batch, PipelineError};
use super::reconciler::ResultReconciler;
use crate::config::MonitorConfig;
use crate::ml_engine::{BatchAggregator, ModelInvoker, ModelRegistry};
use crate::processing::HealthAnalyzer;
use crate::types::{BatchResult, HealthDiagnosis, RecordPredictions, SensorRecord};

/// Batch pipeline over a read-only model registry.
#[derive(Debug)]
pub struct Pipeline {
    registry: ModelRegistry,
    max_records: usize,
}

impl Pipeline {
    pub fn new(registry: ModelRegistry, max_records: usize) -> Self {
        Self {
            registry,
            max_records,
        }
    }

    /// Build the registry and limits from an already validated config.
    pub fn from_config(config: &MonitorConfig) -> Self {
        Self::new(ModelRegistry::from_config(config), config.batch.max_records)
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn max_records(&self) -> usize {
        self.max_records
    }

    /// Process a raw JSON payload.
    pub fn process_json(&self, raw: &str) -> Result<BatchResult, PipelineError> {
        let records = parse_batch(raw, self.max_records)?;
        Ok(self.run(&records))
    }

    /// Process an already-parsed JSON payload.
    pub fn process_value(&self, value: Value) -> Result<BatchResult, PipelineError> {
        let records = validate_batch(value, self.max_records)?;
        Ok(self.run(&records))
    }

    /// Run the pipeline over an accepted batch, stamping diagnoses with now.
    pub fn run(&self, records: &[SensorRecord]) -> BatchResult {
        self.run_at(records, Utc::now())
    }

    /// Run the pipeline with a fixed analysis time.
    ///
    /// Output is a pure function of `records` and `analyzed_at`.
    pub fn run_at(&self, records: &[SensorRecord], analyzed_at: DateTime<Utc>) -> BatchResult {
        let started = Instant::now();

        info!(records = records.len(), models = self.registry.len(), "Batch accepted");

        let mut predictions: Vec<RecordPredictions> = Vec::with_capacity(records.len());
        let mut diagnoses: Vec<HealthDiagnosis> = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let _span = tracing::debug_span!("record", index).entered();
            predictions.push(ModelInvoker::invoke_all(record, &self.registry));

            let diagnosis = HealthAnalyzer::analyze(record, analyzed_at);
            debug!(
                condition = %diagnosis.machine_condition,
                health = %diagnosis.overall_health,
                "Record diagnosed"
            );
            diagnoses.push(diagnosis);
        }

        let overall_health = ResultReconciler::batch_health(&diagnoses);
        let consensus =
            BatchAggregator::aggregate(self.registry.names(), &predictions, overall_health);
        debug!(models = consensus.len(), overall_health = %overall_health, "Consensus built");

        let result = ResultReconciler::reconcile(consensus, diagnoses, records.len(), &predictions);

        let stats = BatchStats::from_result(&result, started.elapsed().as_secs_f64() * 1000.0);
        info!(
            complete = stats.complete_records,
            incomplete = stats.incomplete_records,
            batch_health = %result.predictions.overall_health,
            "{}",
            stats
        );
        result
    }
}

/// Summary of one processed batch, for logs.
#[derive(Debug, Clone)]
pub struct BatchStats {
    pub total_records: usize,
    pub complete_records: usize,
    pub incomplete_records: usize,
    pub unhealthy_records: usize,
    pub elapsed_ms: f64,
}

impl BatchStats {
    pub fn from_result(result: &BatchResult, elapsed_ms: f64) -> Self {
        let unhealthy_records = result
            .complete_health_analysis
            .diagnoses()
            .iter()
            .filter(|d| d.overall_health == crate::types::HealthStatus::Unhealthy)
            .count();
        Self {
            total_records: result.data_quality.total_records,
            complete_records: result.data_quality.complete_records,
            incomplete_records: result.data_quality.incomplete_records,
            unhealthy_records,
            elapsed_ms,
        }
    }
}

impl std::fmt::Display for BatchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Batch: {} records ({} complete, {} incomplete), {} unhealthy, {:.1}ms",
            self.total_records,
            self.complete_records,
            self.incomplete_records,
            self.unhealthy_records,
            self.elapsed_ms
        )
    }
}
