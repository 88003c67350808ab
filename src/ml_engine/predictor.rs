//! The prediction capability every model exposes

use thiserror::Error;

/// Ordered, named inputs for one prediction.
///
/// Names and values are index-aligned and follow the order the model declared.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    names: Vec<String>,
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn new(names: Vec<String>, values: Vec<f64>) -> Self {
        debug_assert_eq!(names.len(), values.len(), "feature names and values must align");
        Self { names, values }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of a named feature, if present.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .and_then(|i| self.values.get(i).copied())
    }
}

/// Raw model output before it is normalised into a `ModelOutput`.
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    Number(f64),
    Label(String),
}

/// Failure raised by a model while predicting.
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("expected {expected} features, got {actual}")]
    FeatureCountMismatch { expected: usize, actual: usize },

    #[error("model produced a non-finite score ({0})")]
    NonFiniteScore(f64),

    #[error("{0}")]
    Failed(String),
}

/// A trained model: turns one feature vector into one prediction.
///
/// Implementations must be reentrant; the registry shares them read-only.
pub trait Predictor: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, ModelError>;
}

impl<F> Predictor for F
where
    F: Fn(&FeatureVector) -> Result<Prediction, ModelError> + Send + Sync,
{
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, ModelError> {
        self(features)
    }
}
