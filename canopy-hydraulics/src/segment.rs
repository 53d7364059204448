#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

use canopy_physics::constants::hydrostatic_gradient;

use crate::{HydraulicsError, WeibullCurve};

/// Configuration of a xylem segment.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-derive", serde(default))]
pub struct SegmentConfig {
    /// Maximum conductance of the whole segment at 25 °C.
    ///
    /// Units follow the fluxes the segment carries:
    /// mol s⁻¹ MPa⁻¹ m⁻² for a leaf, mol s⁻¹ MPa⁻¹ for a plant organ.
    pub k_max: f64,

    /// Number of slices the segment is discretized into.
    pub slices: usize,

    /// Vertical rise of the flow path (m), zero for a leaf.
    pub height: f64,

    /// Vulnerability curve of the segment.
    pub curve: WeibullCurve,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            k_max: 0.04,
            slices: 10,
            height: 0.0,
            curve: WeibullCurve::default(),
        }
    }
}

/// A xylem segment made of slices in series.
///
/// Each slice remembers the most negative pressure it has experienced.
/// Conductance is evaluated at `min(p, p_history)`, so drainage is
/// irreversible until [`Segment::reset_history`] is called.
///
/// Pressures are in MPa.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    k_max: f64,
    curve: WeibullCurve,
    gravity_drop: f64,
    p_history: Vec<f64>,
    f_st: f64,
    f_vis: f64,
}

impl Segment {
    /// Creates a segment with no drainage history at 25 °C.
    ///
    /// # Errors
    ///
    /// Returns [`HydraulicsError::InvalidInput`] if the conductance is not
    /// finite and positive, there are no slices, the height is negative or
    /// non-finite, or the curve is invalid.
    pub fn new(config: &SegmentConfig) -> Result<Self, HydraulicsError> {
        if !config.k_max.is_finite() || config.k_max <= 0.0 {
            return Err(HydraulicsError::not_positive("k_max", config.k_max));
        }
        if config.slices == 0 {
            return Err(HydraulicsError::InvalidInput(
                "segment must have at least one slice".into(),
            ));
        }
        if !config.height.is_finite() || config.height < 0.0 {
            return Err(HydraulicsError::InvalidInput(format!(
                "height must be finite and non-negative, got {}",
                config.height
            )));
        }
        config.curve.validate()?;

        #[allow(clippy::cast_precision_loss)]
        let gravity_drop = hydrostatic_gradient() * config.height / config.slices as f64;

        Ok(Self {
            k_max: config.k_max,
            curve: config.curve,
            gravity_drop,
            p_history: vec![0.0; config.slices],
            f_st: 1.0,
            f_vis: 1.0,
        })
    }

    /// Applies relative surface tension and viscosity factors.
    ///
    /// Both factors are relative to 25 °C.
    pub fn set_temperature_factors(&mut self, f_st: f64, f_vis: f64) {
        self.f_st = f_st;
        self.f_vis = f_vis;
    }

    /// Returns the pressure at which conductance falls to `k_threshold`,
    /// corrected for surface tension.
    #[must_use]
    pub fn critical_pressure(&self, k_threshold: f64) -> f64 {
        self.curve.critical_pressure(k_threshold) * self.f_st
    }

    /// Returns the pressure at the downstream end for a given flow.
    ///
    /// Integration stops early once the pressure falls below `floor`, since
    /// pressure only decreases downstream. Returns negative infinity if a
    /// slice has lost all conductance while carrying flow.
    #[must_use]
    pub fn end_pressure(&self, p_start: f64, flow: f64, floor: f64) -> f64 {
        let mut p = p_start;
        for slice in 0..self.p_history.len() {
            p = match self.slice_drop(slice, p, flow) {
                Some(drop) => p - drop,
                None => return f64::NEG_INFINITY,
            };
            if p < floor {
                return p;
            }
        }
        p
    }

    /// Returns the pressure at the downstream end of every slice.
    #[must_use]
    pub fn pressure_profile(&self, p_start: f64, flow: f64) -> Vec<f64> {
        let mut p = p_start;
        let mut profile = Vec::with_capacity(self.p_history.len());
        for slice in 0..self.p_history.len() {
            p = self
                .slice_drop(slice, p, flow)
                .map_or(f64::NEG_INFINITY, |drop| p - drop);
            profile.push(p);
        }
        profile
    }

    /// Commits drainage history for a realized flow.
    ///
    /// Each slice keeps the lower of its recorded pressure and the pressure
    /// at its upstream face under `flow`.
    pub fn update_history(&mut self, p_start: f64, flow: f64) {
        let profile = self.pressure_profile(p_start, flow);
        let upstream = std::iter::once(p_start).chain(profile);
        for (recorded, p) in self.p_history.iter_mut().zip(upstream) {
            *recorded = recorded.min(p);
        }
    }

    /// Returns the segment conductance at zero flow.
    ///
    /// Includes drainage history and the temperature factors.
    #[must_use]
    pub fn conductance(&self, p_start: f64) -> f64 {
        let k_slice = self.slice_k_max();
        let mut p = p_start;
        let mut resistance = 0.0;
        for slice in 0..self.p_history.len() {
            resistance += 1.0 / (k_slice * self.relative_conductance(slice, p));
            p -= self.gravity_drop;
        }
        1.0 / resistance
    }

    /// Clears the drainage history.
    pub fn reset_history(&mut self) {
        self.p_history.fill(0.0);
    }

    /// Returns the recorded minimum pressure of each slice.
    #[must_use]
    pub fn pressure_history(&self) -> &[f64] {
        &self.p_history
    }

    /// Pressure drop across one slice, `None` if the slice carries flow
    /// with no conductance left.
    fn slice_drop(&self, slice: usize, p: f64, flow: f64) -> Option<f64> {
        if flow <= 0.0 {
            return Some(self.gravity_drop);
        }
        let k = self.slice_k_max() * self.relative_conductance(slice, p);
        (k > 0.0).then(|| flow / k + self.gravity_drop)
    }

    fn relative_conductance(&self, slice: usize, p: f64) -> f64 {
        let p_effective = p.min(self.p_history[slice]);
        self.curve.relative_conductance(p_effective / self.f_st)
    }

    /// Conductance of one slice without cavitation.
    fn slice_k_max(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let slices = self.p_history.len() as f64;
        self.k_max * slices / self.f_vis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn leaf_segment() -> Segment {
        Segment::new(&SegmentConfig::default()).unwrap()
    }

    #[test]
    fn zero_flow_keeps_pressure_without_height() {
        let segment = leaf_segment();
        assert_relative_eq!(segment.end_pressure(-0.5, 0.0, f64::NEG_INFINITY), -0.5);
    }

    #[test]
    fn height_adds_hydrostatic_drop() {
        let segment = Segment::new(&SegmentConfig {
            height: 10.0,
            ..SegmentConfig::default()
        })
        .unwrap();
        assert_relative_eq!(
            segment.end_pressure(0.0, 0.0, f64::NEG_INFINITY),
            -0.0981,
            epsilon = 1e-12
        );
    }

    #[test]
    fn small_flow_follows_ohms_law() {
        let segment = leaf_segment();
        let flow = 1e-6;
        let p_end = segment.end_pressure(0.0, flow, f64::NEG_INFINITY);
        assert_relative_eq!(p_end, -flow / 0.04, epsilon = 1e-9);
    }

    #[test]
    fn conductance_is_k_max_when_hydrated() {
        let segment = leaf_segment();
        assert_relative_eq!(segment.conductance(0.0), 0.04, epsilon = 1e-12);
        assert!(segment.conductance(-2.0) < 0.04);
    }

    #[test]
    fn warm_water_raises_conductance() {
        let mut segment = leaf_segment();
        segment.set_temperature_factors(1.0, 0.8);
        assert_relative_eq!(segment.conductance(0.0), 0.05, epsilon = 1e-12);
    }

    #[test]
    fn drainage_history_is_irreversible() {
        let mut segment = leaf_segment();
        let before = segment.conductance(-0.2);

        segment.update_history(-2.0, 0.0);
        let after = segment.conductance(-0.2);
        assert!(after < before);
        assert!(segment.pressure_history().iter().all(|&p| p <= -2.0));

        segment.reset_history();
        assert_relative_eq!(segment.conductance(-0.2), before);
    }

    #[test]
    fn end_pressure_stops_below_floor() {
        let segment = leaf_segment();
        let p_end = segment.end_pressure(0.0, 1.0, -1.0);
        assert!(p_end < -1.0);
    }

    #[test]
    fn rejects_invalid_config() {
        let config = SegmentConfig {
            slices: 0,
            ..SegmentConfig::default()
        };
        assert!(matches!(
            Segment::new(&config),
            Err(HydraulicsError::InvalidInput(_))
        ));

        let config = SegmentConfig {
            k_max: -1.0,
            ..SegmentConfig::default()
        };
        assert!(Segment::new(&config).is_err());
    }
}
