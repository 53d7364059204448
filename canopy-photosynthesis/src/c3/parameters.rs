#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

use crate::{Arrhenius, PeakedArrhenius, PhotosynthesisError};

/// Parameters of the C3 model.
///
/// Rates are given at 25 °C in μmol m⁻² s⁻¹, Michaelis constants and the
/// CO2 compensation point in Pa.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-derive", serde(default))]
pub struct C3Parameters {
    pub vcmax25: f64,
    pub jmax25: f64,
    pub rd25: f64,
    pub kc25: f64,
    pub ko25: f64,
    pub gamma_star25: f64,

    pub vcmax_temperature: PeakedArrhenius,
    pub jmax_temperature: PeakedArrhenius,
    pub rd_temperature: PeakedArrhenius,
    pub kc_temperature: Arrhenius,
    pub ko_temperature: Arrhenius,
    pub gamma_star_temperature: Arrhenius,

    /// Curvature of the electron transport light response.
    pub theta_j: f64,

    /// Fraction of absorbed quanta that drive electron transport.
    pub quantum_yield: f64,

    /// Fraction of absorbed light that reaches photosystem II.
    pub psii_fraction: f64,
}

impl Default for C3Parameters {
    fn default() -> Self {
        let vcmax25 = 80.0;
        Self {
            vcmax25,
            jmax25: 1.67 * vcmax25,
            rd25: 0.015 * vcmax25,
            kc25: 40.49,
            ko25: 27_840.0,
            gamma_star25: 4.332,
            vcmax_temperature: PeakedArrhenius {
                ha: 65_330.0,
                hd: 149_250.0,
                sv: 485.0,
            },
            jmax_temperature: PeakedArrhenius {
                ha: 43_540.0,
                hd: 152_040.0,
                sv: 495.0,
            },
            rd_temperature: PeakedArrhenius {
                ha: 46_390.0,
                hd: 150_650.0,
                sv: 490.0,
            },
            kc_temperature: Arrhenius { ha: 79_430.0 },
            ko_temperature: Arrhenius { ha: 36_380.0 },
            gamma_star_temperature: Arrhenius { ha: 37_830.0 },
            theta_j: 0.7,
            quantum_yield: 0.85,
            psii_fraction: 0.5,
        }
    }
}

impl C3Parameters {
    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`PhotosynthesisError::InvalidInput`] naming the first value
    /// that is non-finite or out of range.
    pub fn validate(&self) -> Result<(), PhotosynthesisError> {
        for (name, value) in [
            ("vcmax25", self.vcmax25),
            ("jmax25", self.jmax25),
            ("kc25", self.kc25),
            ("ko25", self.ko25),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PhotosynthesisError::InvalidInput(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }

        for (name, value) in [("rd25", self.rd25), ("gamma_star25", self.gamma_star25)] {
            if !value.is_finite() || value < 0.0 {
                return Err(PhotosynthesisError::InvalidInput(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }

        if !(self.theta_j > 0.0 && self.theta_j <= 1.0) {
            return Err(PhotosynthesisError::InvalidInput(format!(
                "theta_j must lie in (0, 1], got {}",
                self.theta_j
            )));
        }

        for (name, value) in [
            ("quantum_yield", self.quantum_yield),
            ("psii_fraction", self.psii_fraction),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(PhotosynthesisError::InvalidInput(format!(
                    "{name} must lie in (0, 1], got {value}"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(C3Parameters::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_vcmax() {
        let params = C3Parameters {
            vcmax25: 0.0,
            ..C3Parameters::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn rejects_theta_above_one() {
        let params = C3Parameters {
            theta_j: 1.2,
            ..C3Parameters::default()
        };
        assert!(params.validate().is_err());
    }
}
