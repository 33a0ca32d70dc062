use serde::{Deserialize, Serialize};

use crate::error::MaterialError;

/// Resistivity of a conductor as a function of temperature.
///
/// Implementations must be monotonically non-decreasing in temperature.
pub trait Resistivity {
    /// Resistivity in Ω·m at `temperature` °C.
    fn resistivity(&self, temperature: f64) -> Result<f64, MaterialError>;
}

/// Conductor with a linear temperature coefficient around a reference point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Conductor {
    /// Ω·m at `reference_temperature`.
    pub resistivity: f64,
    /// Per kelvin.
    pub temperature_coefficient: f64,
    pub reference_temperature: f64,
    pub min_temperature: f64,
    pub max_temperature: f64,
}

pub const COPPER: Conductor = Conductor {
    resistivity: 1.68e-8,
    temperature_coefficient: 0.0038,
    reference_temperature: 25.0,
    min_temperature: -55.0,
    max_temperature: 200.0,
};

impl Resistivity for Conductor {
    fn resistivity(&self, temperature: f64) -> Result<f64, MaterialError> {
        if !(self.min_temperature..=self.max_temperature).contains(&temperature) {
            return Err(MaterialError::OutOfRange {
                temperature,
                min: self.min_temperature,
                max: self.max_temperature,
            });
        }
        Ok(self.resistivity
            * (1.0 + self.temperature_coefficient * (temperature - self.reference_temperature)))
    }
}

impl<T: Resistivity + ?Sized> Resistivity for &T {
    fn resistivity(&self, temperature: f64) -> Result<f64, MaterialError> {
        (**self).resistivity(temperature)
    }
}
