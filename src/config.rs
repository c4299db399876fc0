//! Tunable constants of the force model.

use serde::Deserialize;
use serde::Serialize;

use crate::error::DynamicsError;
use crate::forces::DRAG_COEFFICIENT;
use crate::forces::DRAG_SMOOTHING;
use crate::forces::GRAVITATION_CONSTANT;

/// Scale applied to `m * v^2` to turn an impact into a damage magnitude.
pub const KINETIC_ENERGY_MULTIPLIER: f64 = 0.00001;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicsConfig {
    pub gravitational_constant: f64,
    pub drag_coefficient: f64,
    /// Per-recompute smoothing factor of the atmospheric force filter, in (0, 1].
    /// Independent of the timestep.
    pub drag_smoothing: f64,
    pub kinetic_energy_multiplier: f64,
}

impl Default for DynamicsConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: GRAVITATION_CONSTANT,
            drag_coefficient: DRAG_COEFFICIENT,
            drag_smoothing: DRAG_SMOOTHING,
            kinetic_energy_multiplier: KINETIC_ENERGY_MULTIPLIER,
        }
    }
}

impl DynamicsConfig {
    #[must_use]
    pub fn with_gravitational_constant(mut self, g: f64) -> Self {
        self.gravitational_constant = g;
        self
    }

    #[must_use]
    pub fn with_drag_coefficient(mut self, coefficient: f64) -> Self {
        self.drag_coefficient = coefficient;
        self
    }

    #[must_use]
    pub fn with_drag_smoothing(mut self, smoothing: f64) -> Self {
        self.drag_smoothing = smoothing;
        self
    }

    #[must_use]
    pub fn with_kinetic_energy_multiplier(mut self, multiplier: f64) -> Self {
        self.kinetic_energy_multiplier = multiplier;
        self
    }

    pub fn validate(&self) -> Result<(), DynamicsError> {
        let non_negative = [
            ("gravitational_constant", self.gravitational_constant),
            ("drag_coefficient", self.drag_coefficient),
            ("kinetic_energy_multiplier", self.kinetic_energy_multiplier),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(DynamicsError::invalid_config(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if !(self.drag_smoothing > 0.0 && self.drag_smoothing <= 1.0) {
            return Err(DynamicsError::invalid_config(format!(
                "drag_smoothing must be in (0, 1], got {}",
                self.drag_smoothing
            )));
        }
        Ok(())
    }
}
