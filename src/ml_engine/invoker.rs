//! Per-record model invocation
//!
//! Assembles each model's feature vector from a record and runs the model,
//! turning every failure into a per-model outcome so one bad input or one
//! failing model never aborts the batch.

use std::panic::{catch_unwind, AssertUnwindSafe};

use thiserror::Error;

use super::predictor::{FeatureVector, Prediction};
use super::registry::{ModelDescriptor, ModelRegistry};
use crate::processing::numeric_value;
use crate::types::{ModelOutput, RecordPredictions, SensorRecord};

/// Why a model could not produce a prediction for a record.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvocationFailure {
    /// A required feature was absent or invalid; the model was never called.
    #[error("feature '{feature}' is missing or invalid")]
    InsufficientData { feature: String },

    /// The model was called and failed.
    #[error("{0}")]
    ModelFailed(String),
}

impl From<InvocationFailure> for ModelOutput {
    fn from(failure: InvocationFailure) -> Self {
        match failure {
            InvocationFailure::InsufficientData { .. } => Self::InsufficientData,
            InvocationFailure::ModelFailed(detail) => Self::Error(detail),
        }
    }
}

impl From<Prediction> for ModelOutput {
    fn from(prediction: Prediction) -> Self {
        match prediction {
            Prediction::Number(v) => Self::Number(v),
            Prediction::Label(label) => Self::Label(label),
        }
    }
}

/// Runs registry models against single records.
pub struct ModelInvoker;

impl ModelInvoker {
    /// Build the model's feature vector from the record.
    ///
    /// Short-circuits on the first required feature that fails validity.
    pub fn feature_vector(
        record: &SensorRecord,
        model: &ModelDescriptor,
    ) -> Result<FeatureVector, InvocationFailure> {
        let values = model
            .features()
            .iter()
            .map(|feature| {
                numeric_value(record.field(feature)).ok_or_else(|| {
                    InvocationFailure::InsufficientData {
                        feature: feature.clone(),
                    }
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;
        Ok(FeatureVector::new(model.features().to_vec(), values))
    }

    /// Predict for one record with one model.
    pub fn try_invoke(
        record: &SensorRecord,
        model: &ModelDescriptor,
    ) -> Result<Prediction, InvocationFailure> {
        let features = Self::feature_vector(record, model)?;

        let outcome = catch_unwind(AssertUnwindSafe(|| model.predictor().predict(&features)));
        match outcome {
            Ok(Ok(prediction)) => Ok(prediction),
            Ok(Err(e)) => Err(InvocationFailure::ModelFailed(e.to_string())),
            Err(panic) => Err(InvocationFailure::ModelFailed(format!(
                "model panicked: {}",
                panic_message(panic.as_ref())
            ))),
        }
    }

    /// Predict for one record with one model, folding failures into sentinels.
    pub fn invoke(record: &SensorRecord, model: &ModelDescriptor) -> ModelOutput {
        match Self::try_invoke(record, model) {
            Ok(prediction) => prediction.into(),
            Err(failure) => {
                match &failure {
                    InvocationFailure::InsufficientData { feature } => {
                        tracing::debug!(
                            model = model.name(),
                            feature = %feature,
                            "Skipping model: insufficient data"
                        );
                    }
                    InvocationFailure::ModelFailed(detail) => {
                        tracing::warn!(
                            model = model.name(),
                            error = %detail,
                            "Model prediction failed"
                        );
                    }
                }
                failure.into()
            }
        }
    }

    /// Run every registry model against one record, in registry order.
    pub fn invoke_all(record: &SensorRecord, registry: &ModelRegistry) -> RecordPredictions {
        registry
            .iter()
            .map(|model| (model.name().to_string(), Self::invoke(record, model)))
            .collect()
    }
}

pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml_engine::predictor::ModelError;
    use crate::ml_engine::LinearModel;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn record(value: Value) -> SensorRecord {
        match value {
            Value::Object(map) => SensorRecord::new(map),
            other => panic!("expected object, got {other}"),
        }
    }

    fn mean_model(name: &str, features: &[&str]) -> ModelDescriptor {
        let n = features.len() as f64;
        ModelDescriptor::new(
            name,
            features.iter().copied(),
            Box::new(LinearModel::new(vec![1.0 / n; features.len()], 0.0)),
        )
    }

    #[test]
    fn test_valid_features_produce_number() {
        let model = mean_model("temperature", &["temperature_one", "temperature_two"]);
        let r = record(json!({ "temperature_one": 60, "temperature_two": "80" }));
        assert_eq!(ModelInvoker::invoke(&r, &model), ModelOutput::Number(70.0));
    }

    #[test]
    fn test_feature_vector_keeps_declared_order() {
        let model = mean_model("m", &["b", "a"]);
        let r = record(json!({ "a": 1.0, "b": 2.0 }));
        let fv = ModelInvoker::feature_vector(&r, &model).unwrap();
        assert_eq!(fv.names(), ["b", "a"]);
        assert_eq!(fv.values(), [2.0, 1.0]);
        assert_eq!(fv.get("a"), Some(1.0));
    }

    #[test]
    fn test_invalid_feature_short_circuits_without_calling_model() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let model = ModelDescriptor::new(
            "counted",
            ["x", "y"],
            Box::new(move |_: &FeatureVector| -> Result<Prediction, ModelError> {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Prediction::Number(1.0))
            }),
        );

        let r = record(json!({ "x": 1.0, "y": "broken" }));
        assert_eq!(
            ModelInvoker::try_invoke(&r, &model),
            Err(InvocationFailure::InsufficientData { feature: "y".into() })
        );
        assert_eq!(ModelInvoker::invoke(&r, &model), ModelOutput::InsufficientData);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_model_error_becomes_prediction_error() {
        let model = ModelDescriptor::new(
            "failing",
            ["x"],
            Box::new(|_: &FeatureVector| -> Result<Prediction, ModelError> {
                Err(ModelError::Failed("weights not loaded".into()))
            }),
        );
        let out = ModelInvoker::invoke(&record(json!({ "x": 1 })), &model);
        assert_eq!(out, ModelOutput::Error("weights not loaded".into()));
        assert_eq!(out.to_string(), "Prediction Error: weights not loaded");
    }

    #[test]
    fn test_model_panic_is_contained() {
        let model = ModelDescriptor::new(
            "panicky",
            ["x"],
            Box::new(|_: &FeatureVector| -> Result<Prediction, ModelError> {
                panic!("index out of range")
            }),
        );
        let out = ModelInvoker::invoke(&record(json!({ "x": 1 })), &model);
        assert_eq!(out, ModelOutput::Error("model panicked: index out of range".into()));
    }

    #[test]
    fn test_labels_pass_through() {
        let model = ModelDescriptor::new(
            "labeller",
            ["x"],
            Box::new(|_: &FeatureVector| -> Result<Prediction, ModelError> {
                Ok(Prediction::Label("normal".into()))
            }),
        );
        assert_eq!(
            ModelInvoker::invoke(&record(json!({ "x": 0.2 })), &model),
            ModelOutput::Label("normal".into())
        );
    }

    #[test]
    fn test_invoke_all_covers_every_model() {
        let registry = ModelRegistry::new(vec![
            mean_model("temperature", &["temperature_one"]),
            mean_model("vibration", &["vibration_x", "vibration_y"]),
        ]);
        let preds = ModelInvoker::invoke_all(&record(json!({ "temperature_one": 50 })), &registry);
        assert_eq!(preds.get("temperature"), Some(&ModelOutput::Number(50.0)));
        assert_eq!(preds.get("vibration"), Some(&ModelOutput::InsufficientData));
        assert!(preds.has_insufficient_data());
    }
}
