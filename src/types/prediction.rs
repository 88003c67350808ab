//! Per-record model outputs and the batch consensus built from them

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::BatchHealth;
use crate::config::defaults::OVERALL_HEALTH_KEY;

/// Sentinel text for a model that could not be fed valid inputs.
pub const INSUFFICIENT_DATA: &str = "Insufficient Data";

/// Prefix of the sentinel for a model that failed while predicting.
pub const PREDICTION_ERROR_PREFIX: &str = "Prediction Error: ";

/// What one model produced for one record.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput {
    Number(f64),
    Label(String),
    /// A required feature was missing or invalid; the model was not invoked.
    InsufficientData,
    /// The model was invoked and failed.
    Error(String),
}

impl ModelOutput {
    pub fn is_insufficient(&self) -> bool {
        matches!(self, Self::InsufficientData)
    }

    /// Whether this output may take part in aggregation.
    ///
    /// Sentinels never do, and neither does a non-finite number.
    pub fn is_usable(&self) -> bool {
        match self {
            Self::Number(v) => v.is_finite(),
            Self::Label(_) => true,
            Self::InsufficientData | Self::Error(_) => false,
        }
    }
}

impl std::fmt::Display for ModelOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Label(label) => write!(f, "{label}"),
            Self::InsufficientData => write!(f, "{INSUFFICIENT_DATA}"),
            Self::Error(detail) => write!(f, "{PREDICTION_ERROR_PREFIX}{detail}"),
        }
    }
}

impl Serialize for ModelOutput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(v) => serializer.serialize_f64(*v),
            other => serializer.collect_str(other),
        }
    }
}

/// Model outputs for a single record, in registry order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPredictions {
    entries: Vec<(String, ModelOutput)>,
}

impl RecordPredictions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, model: impl Into<String>, output: ModelOutput) {
        let model = model.into();
        if let Some(slot) = self.entries.iter_mut().find(|(name, _)| *name == model) {
            slot.1 = output;
        } else {
            self.entries.push((model, output));
        }
    }

    pub fn get(&self, model: &str) -> Option<&ModelOutput> {
        self.entries
            .iter()
            .find(|(name, _)| name == model)
            .map(|(_, output)| output)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModelOutput)> {
        self.entries.iter().map(|(name, output)| (name.as_str(), output))
    }

    /// True when at least one model reported insufficient data.
    pub fn has_insufficient_data(&self) -> bool {
        self.entries.iter().any(|(_, output)| output.is_insufficient())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, ModelOutput)> for RecordPredictions {
    fn from_iter<I: IntoIterator<Item = (String, ModelOutput)>>(iter: I) -> Self {
        let mut predictions = Self::new();
        for (model, output) in iter {
            predictions.insert(model, output);
        }
        predictions
    }
}

impl Serialize for RecordPredictions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, output) in &self.entries {
            map.serialize_entry(name, output)?;
        }
        map.end()
    }
}

/// Aggregated value of one model across the batch.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsensusValue {
    Number(f64),
    Label(String),
    InsufficientData,
}

impl Serialize for ConsensusValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(v) => serializer.serialize_f64(*v),
            Self::Label(label) => serializer.serialize_str(label),
            Self::InsufficientData => serializer.serialize_str(INSUFFICIENT_DATA),
        }
    }
}

/// One consensus value per configured model, plus the batch health verdict.
///
/// Serialises as a flat JSON object in registry order with `overall_health`
/// as the final key.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsensusMap {
    values: Vec<(String, ConsensusValue)>,
    pub overall_health: BatchHealth,
}

impl ConsensusMap {
    pub fn new(values: Vec<(String, ConsensusValue)>, overall_health: BatchHealth) -> Self {
        Self {
            values,
            overall_health,
        }
    }

    pub fn get(&self, model: &str) -> Option<&ConsensusValue> {
        self.values
            .iter()
            .find(|(name, _)| name == model)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConsensusValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for ConsensusMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.serialize_entry(OVERALL_HEALTH_KEY, &self.overall_health)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_model_output_sentinels_serialize_as_text() {
        assert_eq!(
            serde_json::to_value(ModelOutput::InsufficientData).unwrap(),
            json!("Insufficient Data")
        );
        assert_eq!(
            serde_json::to_value(ModelOutput::Error("bad shape".into())).unwrap(),
            json!("Prediction Error: bad shape")
        );
        assert_eq!(serde_json::to_value(ModelOutput::Number(2.5)).unwrap(), json!(2.5));
    }

    #[test]
    fn test_non_finite_numbers_are_not_usable() {
        assert!(ModelOutput::Number(1.0).is_usable());
        assert!(!ModelOutput::Number(f64::NAN).is_usable());
        assert!(!ModelOutput::Number(f64::INFINITY).is_usable());
        assert!(ModelOutput::Label("ok".into()).is_usable());
        assert!(!ModelOutput::Error("x".into()).is_usable());
    }

    #[test]
    fn test_record_predictions_detect_insufficient_data() {
        let mut preds = RecordPredictions::new();
        preds.insert("temperature", ModelOutput::Number(70.0));
        assert!(!preds.has_insufficient_data());
        preds.insert("vibration", ModelOutput::Error("boom".into()));
        assert!(!preds.has_insufficient_data());
        preds.insert("vibration", ModelOutput::InsufficientData);
        assert!(preds.has_insufficient_data());
        assert_eq!(preds.len(), 2);
    }

    #[test]
    fn test_consensus_map_serializes_flat_with_health_last() {
        let map = ConsensusMap::new(
            vec![
                ("temperature".into(), ConsensusValue::Number(71.5)),
                ("vibration".into(), ConsensusValue::Label("normal".into())),
                ("magnetic_flux".into(), ConsensusValue::InsufficientData),
            ],
            BatchHealth::Healthy,
        );
        let text = serde_json::to_string(&map).unwrap();
        assert_eq!(
            text,
            r#"{"temperature":71.5,"vibration":"normal","magnetic_flux":"Insufficient Data","overall_health":"Healthy"}"#
        );
    }
}
