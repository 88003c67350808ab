//! Processing Pipeline Module
//!
//! ## Batch Pipeline Architecture
//!
//! ```text
//! PHASE 1: Intake        (parse, shape and size checks)
//! PHASE 2: Invocation    (every model against every record)
//! PHASE 3: Diagnosis     (rule engine per record)
//! PHASE 4: Consensus     (mean / majority vote per model)
//! PHASE 5: Reconciliation
//! PHASE 6: Outcome       (one JSON body and an exit status)
//! ```
//!
//! A rejected batch never reaches phase 2.

mod coordinator;
pub mod intake;
pub mod outcome;
pub mod reconciler;

pub use coordinator::{BatchStats, Pipeline};
pub use intake::{parse_batch, validate_batch, PipelineError};
pub use outcome::{render_outcome, respond, Outcome};
pub use reconciler::ResultReconciler;
