//! Raw sensor records as received from the input batch

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sensor field names understood by the health analyzer and default models.
pub mod fields {
    pub const TEMPERATURE_ONE: &str = "temperature_one";
    pub const TEMPERATURE_TWO: &str = "temperature_two";
    pub const VIBRATION_X: &str = "vibration_x";
    pub const VIBRATION_Y: &str = "vibration_y";
    pub const VIBRATION_Z: &str = "vibration_z";
    pub const MAGNETIC_FLUX_X: &str = "magnetic_flux_x";
    pub const MAGNETIC_FLUX_Y: &str = "magnetic_flux_y";
    pub const MAGNETIC_FLUX_Z: &str = "magnetic_flux_z";
    pub const AUDIBLE_SOUND: &str = "audible_sound";
    pub const ULTRA_SOUND: &str = "ultra_sound";

    /// Fields averaged into the record temperature
    pub const TEMPERATURE: [&str; 2] = [TEMPERATURE_ONE, TEMPERATURE_TWO];
    /// Fields averaged into the record vibration
    pub const VIBRATION: [&str; 3] = [VIBRATION_X, VIBRATION_Y, VIBRATION_Z];
}

/// One sensor reading from the batch.
///
/// Values are kept as raw JSON: any field may be absent, `null`, a string or
/// a number, and validity is decided later by the processing layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorRecord {
    values: Map<String, Value>,
}

impl SensorRecord {
    pub fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Raw value for a field. Absent and explicit `null` both read as missing.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.values.get(name).filter(|v| !v.is_null())
    }

    /// Raw values for several fields, in the order given.
    pub fn fields<'a>(&'a self, names: &'a [&'a str]) -> impl Iterator<Item = Option<&'a Value>> + 'a {
        names.iter().map(move |name| self.field(name))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Map<String, Value>> for SensorRecord {
    fn from(values: Map<String, Value>) -> Self {
        Self::new(values)
    }
}
