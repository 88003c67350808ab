//! Reference models that can be described entirely in configuration
//!
//! - `LinearModel`: weighted sum of inputs plus intercept, numeric output
//! - `BandedClassifier`: the same linear score mapped onto labelled bands

use super::predictor::{FeatureVector, ModelError, Prediction, Predictor};
use crate::config::{BandConfig, PredictorConfig};

/// `intercept + Σ weights[i]·x[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    weights: Vec<f64>,
    intercept: f64,
}

impl LinearModel {
    pub fn new(weights: Vec<f64>, intercept: f64) -> Self {
        Self { weights, intercept }
    }

    fn score(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        if features.len() != self.weights.len() {
            return Err(ModelError::FeatureCountMismatch {
                expected: self.weights.len(),
                actual: features.len(),
            });
        }
        let score = self
            .weights
            .iter()
            .zip(features.values())
            .fold(self.intercept, |acc, (w, x)| w.mul_add(*x, acc));
        if score.is_finite() {
            Ok(score)
        } else {
            Err(ModelError::NonFiniteScore(score))
        }
    }
}

impl Predictor for LinearModel {
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, ModelError> {
        self.score(features).map(Prediction::Number)
    }
}

/// Linear score classified by ascending half-open bands.
#[derive(Debug, Clone, PartialEq)]
pub struct BandedClassifier {
    scorer: LinearModel,
    bands: Vec<BandConfig>,
    above_label: String,
}

impl BandedClassifier {
    pub fn new(scorer: LinearModel, bands: Vec<BandConfig>, above_label: String) -> Self {
        Self {
            scorer,
            bands,
            above_label,
        }
    }

    fn classify(&self, score: f64) -> &str {
        self.bands
            .iter()
            .find(|band| score < band.below)
            .map_or(self.above_label.as_str(), |band| band.label.as_str())
    }
}

impl Predictor for BandedClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, ModelError> {
        let score = self.scorer.score(features)?;
        Ok(Prediction::Label(self.classify(score).to_string()))
    }
}

/// Build the predictor a config entry describes.
pub fn build_predictor(config: &PredictorConfig) -> Box<dyn Predictor> {
    match config {
        PredictorConfig::Linear { weights, intercept } => {
            Box::new(LinearModel::new(weights.clone(), *intercept))
        }
        PredictorConfig::Banded {
            weights,
            intercept,
            bands,
            above_label,
        } => Box::new(BandedClassifier::new(
            LinearModel::new(weights.clone(), *intercept),
            bands.clone(),
            above_label.clone(),
        )),
    }
}
