//! Model registry: the fixed set of models evaluated for every record

use std::fmt;

use super::models::build_predictor;
use super::predictor::Predictor;
use crate::config::MonitorConfig;

/// A model together with the ordered record fields it consumes.
pub struct ModelDescriptor {
    name: String,
    features: Vec<String>,
    predictor: Box<dyn Predictor>,
}

impl ModelDescriptor {
    pub fn new(
        name: impl Into<String>,
        features: impl IntoIterator<Item = impl Into<String>>,
        predictor: Box<dyn Predictor>,
    ) -> Self {
        Self {
            name: name.into(),
            features: features.into_iter().map(Into::into).collect(),
            predictor,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn predictor(&self) -> &dyn Predictor {
        self.predictor.as_ref()
    }
}

impl fmt::Debug for ModelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelDescriptor")
            .field("name", &self.name)
            .field("features", &self.features)
            .finish_non_exhaustive()
    }
}

/// Read-only set of models, built once at startup and shared by reference.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: Vec<ModelDescriptor>,
}

impl ModelRegistry {
    pub fn new(models: Vec<ModelDescriptor>) -> Self {
        Self { models }
    }

    /// Build the registry a config describes.
    ///
    /// The config is expected to have passed `MonitorConfig::validate`, which
    /// `MonitorConfig::load_from_file` already runs. A predictor whose weights
    /// do not match its features fails per record as a prediction error.
    pub fn from_config(config: &MonitorConfig) -> Self {
        let models = config
            .models
            .iter()
            .map(|m| {
                ModelDescriptor::new(
                    m.name.trim(),
                    m.features.iter().cloned(),
                    build_predictor(&m.predictor),
                )
            })
            .collect();
        Self::new(models)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelDescriptor> {
        self.models.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(ModelDescriptor::name)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_matches_production_models() {
        let registry = ModelRegistry::from_config(&MonitorConfig::default());
        let names: Vec<_> = registry.names().collect();
        assert_eq!(
            names,
            vec!["temperature", "vibration", "magnetic_flux", "audible_sound", "ultra_sound"]
        );
        let ultra = registry.iter().last().unwrap();
        assert_eq!(
            ultra.features(),
            ["vibration_x", "vibration_y", "vibration_z", "ultra_sound"]
        );
    }

    #[test]
    fn test_mismatched_weights_fail_per_prediction() {
        use crate::ml_engine::{FeatureVector, ModelError};

        let mut config = MonitorConfig::default();
        config.models[0].features.push("ultra_sound".to_string());
        let registry = ModelRegistry::from_config(&config);
        let temperature = registry.iter().next().unwrap();
        let features = FeatureVector::new(
            temperature.features().to_vec(),
            vec![70.0, 70.0, 10.0],
        );
        assert_eq!(
            temperature.predictor().predict(&features),
            Err(ModelError::FeatureCountMismatch { expected: 2, actual: 3 })
        );
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ModelRegistry>();
    }
}
