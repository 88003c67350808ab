//! Condition Monitor: batch inference and rule-based health diagnosis
//!
//! Ensemble pipeline for industrial machine-condition monitoring.
//!
//! ## Architecture
//!
//! - **ML Engine**: per-record model invocation and batch consensus
//! - **Processing**: null-tolerant signal averaging and threshold rules
//! - **Pipeline**: intake, coordination and result reconciliation
//! - **Config**: batch limits and the model registry as TOML

pub mod config;
pub mod ml_engine;
pub mod pipeline;
pub mod processing;
pub mod types;

// Re-export configuration
pub use config::{ConfigError, MonitorConfig};

// Re-export commonly used types
pub use types::{
    BatchHealth, BatchResult, ConsensusMap, ConsensusValue, DataQuality, ErrorResponse,
    HealthAnalysis, HealthDiagnosis, HealthStatus, MachineCondition, ModelOutput,
    RecordPredictions, SensorRecord,
};

// Re-export ML Engine types
pub use ml_engine::{
    BatchAggregator, FeatureVector, ModelDescriptor, ModelError, ModelInvoker, ModelRegistry,
    Prediction, Predictor,
};

// Re-export pipeline
pub use pipeline::{Pipeline, PipelineError};
