#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

use canopy_physics::constants::{GAS_CONSTANT, T_REFERENCE};

/// Arrhenius temperature dependence relative to 25 °C.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub struct Arrhenius {
    /// Activation energy (J mol⁻¹).
    pub ha: f64,
}

impl Arrhenius {
    /// Returns the rate at `t` (K) relative to the rate at 25 °C.
    #[must_use]
    pub fn factor(&self, t: f64) -> f64 {
        (self.ha / GAS_CONSTANT * (1.0 / T_REFERENCE - 1.0 / t)).exp()
    }
}

/// Arrhenius temperature dependence with high-temperature deactivation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub struct PeakedArrhenius {
    /// Activation energy (J mol⁻¹).
    pub ha: f64,

    /// Deactivation energy (J mol⁻¹).
    pub hd: f64,

    /// Entropy term (J mol⁻¹ K⁻¹).
    pub sv: f64,
}

impl PeakedArrhenius {
    /// Returns the rate at `t` (K) relative to the rate at 25 °C.
    #[must_use]
    pub fn factor(&self, t: f64) -> f64 {
        let deactivation =
            |t: f64| 1.0 + ((self.sv * t - self.hd) / (GAS_CONSTANT * t)).exp();
        Arrhenius { ha: self.ha }.factor(t) * deactivation(T_REFERENCE) / deactivation(t)
    }
}
