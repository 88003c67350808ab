//! Shared data structures for the condition-monitoring pipeline
//!
//! - `record`: raw sensor records from the input batch
//! - `prediction`: per-record model outputs and the batch consensus
//! - `health`: machine condition, health verdicts, per-record diagnosis
//! - `response`: the reconciled batch result and error payload
//! - `thresholds`: fixed rule breakpoints and message literals

mod record;
mod prediction;
mod health;
mod response;
pub mod thresholds;

pub use record::*;
pub use prediction::*;
pub use health::*;
pub use response::*;
pub use thresholds::*;
