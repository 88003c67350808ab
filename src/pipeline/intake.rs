//! Batch intake: parse the raw payload and enforce the request contract
//!
//! Every check here runs before any model is touched.

use serde_json::Value;
use thiserror::Error;

use crate::types::SensorRecord;

/// Terminal errors for a whole invocation.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid JSON input: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Input must be an array")]
    NotAnArray,

    #[error("Input array cannot be empty")]
    EmptyBatch,

    #[error("Input array exceeds maximum length of {max}")]
    BatchTooLarge { len: usize, max: usize },

    #[error("Record at index {index} must be a JSON object")]
    RecordNotObject { index: usize },
}

/// Parse a raw JSON payload into a validated batch.
pub fn parse_batch(raw: &str, max_records: usize) -> Result<Vec<SensorRecord>, PipelineError> {
    let value: Value = serde_json::from_str(raw)?;
    validate_batch(value, max_records)
}

/// Check shape and size of an already-parsed payload.
///
/// Order matters: shape first, then the upper bound, then emptiness, then
/// each element.
pub fn validate_batch(value: Value, max_records: usize) -> Result<Vec<SensorRecord>, PipelineError> {
    let Value::Array(items) = value else {
        return Err(PipelineError::NotAnArray);
    };

    if items.len() > max_records {
        return Err(PipelineError::BatchTooLarge {
            len: items.len(),
            max: max_records,
        });
    }
    if items.is_empty() {
        return Err(PipelineError::EmptyBatch);
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(SensorRecord::new(map)),
            _ => Err(PipelineError::RecordNotObject { index }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_array_of_objects() {
        let batch = parse_batch(r#"[{"temperature_one": 70}, {}]"#, 1800).unwrap();
        assert_eq!(batch.len(), 2);
        assert!(batch[1].is_empty());
    }

    #[test]
    fn test_rejects_non_array() {
        let err = validate_batch(json!({"temperature_one": 70}), 1800).unwrap_err();
        assert!(matches!(err, PipelineError::NotAnArray));
        assert_eq!(err.to_string(), "Input must be an array");
    }

    #[test]
    fn test_rejects_empty() {
        let err = validate_batch(json!([]), 1800).unwrap_err();
        assert_eq!(err.to_string(), "Input array cannot be empty");
    }

    #[test]
    fn test_rejects_oversized() {
        let items = vec![json!({}); 1801];
        let err = validate_batch(Value::Array(items), 1800).unwrap_err();
        assert!(matches!(err, PipelineError::BatchTooLarge { len: 1801, max: 1800 }));
        assert_eq!(err.to_string(), "Input array exceeds maximum length of 1800");
    }

    #[test]
    fn test_accepts_exactly_max() {
        let items = vec![json!({}); 1800];
        assert_eq!(validate_batch(Value::Array(items), 1800).unwrap().len(), 1800);
    }

    #[test]
    fn test_rejects_non_object_record() {
        let err = validate_batch(json!([{}, 42]), 1800).unwrap_err();
        assert_eq!(err.to_string(), "Record at index 1 must be a JSON object");
    }

    #[test]
    fn test_malformed_json_names_parse_failure() {
        let err = parse_batch("[{\"temperature_one\": ", 1800).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidJson(_)));
        assert!(err.to_string().starts_with("Invalid JSON input: "));
    }
}
