//! Process boundary: turns one batch run into the stdout body and exit status.
//!
//! Every run prints exactly one JSON object. Success prints the
//! `BatchResult`; a rejected batch or an escaped panic prints
//! `{"error": "<message>"}` and exits with [`EXIT_FAILURE`].

use std::fmt::Display;
use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::Serialize;
use tracing::{error, warn};

use super::coordinator::Pipeline;
use crate::ml_engine::invoker::panic_message;
use crate::types::{BatchResult, ErrorResponse};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

/// What the binary writes to stdout and the status it exits with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub body: String,
    pub exit_code: u8,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        self.exit_code == EXIT_SUCCESS
    }

    fn failure(message: &str, pretty: bool) -> Self {
        let body = to_json(&ErrorResponse::new(message), pretty)
            .unwrap_or_else(|_| "{\"error\":\"Internal error\"}".to_string());
        Self {
            body,
            exit_code: EXIT_FAILURE,
        }
    }
}

/// Run a raw JSON batch through the pipeline and render the outcome.
pub fn respond(pipeline: &Pipeline, raw: &str, pretty: bool) -> Outcome {
    render_outcome(pretty, || pipeline.process_json(raw))
}

/// Render the outcome of `run`, containing any panic it raises.
pub fn render_outcome<F, E>(pretty: bool, run: F) -> Outcome
where
    F: FnOnce() -> Result<BatchResult, E>,
    E: Display,
{
    match catch_unwind(AssertUnwindSafe(run)) {
        Ok(Ok(result)) => match to_json(&result, pretty) {
            Ok(body) => Outcome {
                body,
                exit_code: EXIT_SUCCESS,
            },
            Err(e) => {
                error!(error = %e, "Failed to serialize batch result");
                Outcome::failure(&format!("Internal error: {e}"), pretty)
            }
        },
        Ok(Err(e)) => {
            warn!(error = %e, "Batch rejected");
            Outcome::failure(&e.to_string(), pretty)
        }
        Err(panic) => {
            let detail = panic_message(panic.as_ref());
            error!(panic = %detail, "Batch aborted by panic");
            Outcome::failure(&format!("Internal error: {detail}"), pretty)
        }
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MonitorConfig;

    fn pipeline() -> Pipeline {
        Pipeline::from_config(&MonitorConfig::default())
    }

    #[test]
    fn test_oversized_batch_body_and_status() {
        let raw = format!("[{}]", vec!["{}"; 1_801].join(","));
        let out = respond(&pipeline(), &raw, false);
        assert_eq!(
            out.body,
            r#"{"error":"Input array exceeds maximum length of 1800"}"#
        );
        assert_eq!(out.exit_code, EXIT_FAILURE);
    }

    #[test]
    fn test_empty_and_malformed_bodies() {
        let empty = respond(&pipeline(), "[]", false);
        assert_eq!(empty.body, r#"{"error":"Input array cannot be empty"}"#);
        assert_eq!(empty.exit_code, EXIT_FAILURE);

        let malformed = respond(&pipeline(), "[{", false);
        assert!(malformed.body.starts_with(r#"{"error":"Invalid JSON input: "#));
        assert_eq!(malformed.exit_code, EXIT_FAILURE);
    }

    #[test]
    fn test_escaped_panic_becomes_internal_error() {
        let out = render_outcome(false, || -> Result<BatchResult, String> {
            panic!("registry poisoned")
        });
        assert_eq!(out.body, r#"{"error":"Internal error: registry poisoned"}"#);
        assert!(!out.is_success());
    }

    #[test]
    fn test_success_prints_the_result() {
        let out = respond(&pipeline(), r#"[{"temperature_one": 70}]"#, false);
        assert!(out.is_success());
        let body: serde_json::Value = serde_json::from_str(&out.body).unwrap();
        assert!(body.get("error").is_none());
        assert_eq!(body["data_quality"]["total_records"], 1);
    }
}
