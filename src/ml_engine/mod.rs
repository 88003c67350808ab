//! ML Engine: model capability, registry, per-record invocation and batch
//! consensus.
//!
//! ## Architecture
//! - `predictor`: the `Predictor` capability and its input/output types
//! - `models`: reference models describable in TOML (linear, banded)
//! - `registry`: the read-only model set built once at startup
//! - `invoker`: per-record feature assembly and failure isolation
//! - `aggregator`: mean / majority-vote consensus across the batch

pub mod aggregator;
pub mod invoker;
pub mod models;
pub mod predictor;
pub mod registry;

// Re-export public types
pub use aggregator::BatchAggregator;
pub use invoker::{InvocationFailure, ModelInvoker};
pub use models::{build_predictor, BandedClassifier, LinearModel};
pub use predictor::{FeatureVector, ModelError, Prediction, Predictor};
pub use registry::{ModelDescriptor, ModelRegistry};
