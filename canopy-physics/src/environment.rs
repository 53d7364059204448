#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};
use uom::si::{f64::Pressure, pressure::pascal};

use crate::PhysicsError;

/// Atmospheric drivers around a leaf layer.
///
/// Read-only to the leaf model; the surrounding driver owns and updates it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub struct Environment {
    /// Total air pressure.
    pub p_atm: Pressure,

    /// Partial pressure of water vapor in the air.
    pub p_h2o: Pressure,

    /// Partial pressure of CO2 in the air.
    pub p_co2: Pressure,

    /// Partial pressure of O2 in the air.
    pub p_o2: Pressure,
}

impl Default for Environment {
    /// Sea-level air at roughly 50% relative humidity and 405 ppm CO2.
    fn default() -> Self {
        Self {
            p_atm: Pressure::new::<pascal>(101_325.0),
            p_h2o: Pressure::new::<pascal>(1500.0),
            p_co2: Pressure::new::<pascal>(41.0),
            p_o2: Pressure::new::<pascal>(21_278.25),
        }
    }
}

impl Environment {
    /// Returns the vapor pressure deficit relative to a saturated surface.
    ///
    /// Negative when the air is supersaturated relative to `p_sat`.
    #[must_use]
    pub fn vapor_pressure_deficit(&self, p_sat: Pressure) -> Pressure {
        p_sat - self.p_h2o
    }

    /// Validates that all pressures are finite and physically consistent.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidInput`] if a pressure is non-finite,
    /// the total pressure is not positive, or a partial pressure is negative
    /// or exceeds the total pressure.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        let p_atm = self.p_atm.get::<pascal>();
        if !p_atm.is_finite() || p_atm <= 0.0 {
            return Err(PhysicsError::InvalidInput(format!(
                "p_atm must be finite and positive, got {p_atm} Pa"
            )));
        }

        for (name, value) in [
            ("p_h2o", self.p_h2o),
            ("p_co2", self.p_co2),
            ("p_o2", self.p_o2),
        ] {
            let p = value.get::<pascal>();
            if !p.is_finite() || p < 0.0 || p > p_atm {
                return Err(PhysicsError::InvalidInput(format!(
                    "{name} must be finite and within [0, p_atm], got {p} Pa"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn default_environment_is_valid() {
        assert!(Environment::default().validate().is_ok());
    }

    #[test]
    fn deficit_is_saturation_minus_ambient() {
        let env = Environment::default();
        let vpd = env.vapor_pressure_deficit(Pressure::new::<pascal>(3500.0));
        assert_relative_eq!(vpd.get::<pascal>(), 2000.0);
    }

    #[test]
    fn rejects_partial_pressure_above_total() {
        let env = Environment {
            p_h2o: Pressure::new::<pascal>(200_000.0),
            ..Environment::default()
        };
        assert!(matches!(env.validate(), Err(PhysicsError::InvalidInput(_))));
    }

    #[test]
    fn rejects_non_finite_total_pressure() {
        let env = Environment {
            p_atm: Pressure::new::<pascal>(f64::NAN),
            ..Environment::default()
        };
        assert!(env.validate().is_err());
    }
}
