#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

use crate::HydraulicsError;

/// A Weibull xylem vulnerability curve.
///
/// Relative conductance at xylem pressure `p` (MPa, at 25 °C) is
/// `exp(−(−p/b)^c)` for negative pressures and `1` otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub struct WeibullCurve {
    /// Scale parameter (MPa), the pressure at which conductance falls to `1/e`.
    pub b: f64,
    /// Shape parameter, larger values give a steeper curve.
    pub c: f64,
}

impl Default for WeibullCurve {
    fn default() -> Self {
        Self { b: 1.879, c: 2.396 }
    }
}

impl WeibullCurve {
    /// Validates that both parameters are finite and positive.
    ///
    /// # Errors
    ///
    /// Returns [`HydraulicsError::InvalidInput`] naming the first bad parameter.
    pub fn validate(&self) -> Result<(), HydraulicsError> {
        if !self.b.is_finite() || self.b <= 0.0 {
            return Err(HydraulicsError::not_positive("weibull b", self.b));
        }
        if !self.c.is_finite() || self.c <= 0.0 {
            return Err(HydraulicsError::not_positive("weibull c", self.c));
        }
        Ok(())
    }

    /// Returns the relative conductance at the given pressure (MPa).
    #[must_use]
    pub fn relative_conductance(&self, p: f64) -> f64 {
        if p >= 0.0 {
            1.0
        } else {
            (-(-p / self.b).powf(self.c)).exp()
        }
    }

    /// Returns the pressure (MPa) at which relative conductance equals `k_threshold`.
    ///
    /// `k_threshold` must lie in `(0, 1)`.
    #[must_use]
    pub fn critical_pressure(&self, k_threshold: f64) -> f64 {
        -self.b * (-k_threshold.ln()).powf(1.0 / self.c)
    }
}
