#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

use canopy_physics::water::{relative_surface_tension, relative_viscosity};
use uom::si::{
    f64::{Pressure, ThermodynamicTemperature},
    pressure::megapascal,
};

use crate::{
    ConductanceHistory, CriticalFlowConfig, HydraulicsError, Segment, SegmentConfig,
    WeibullCurve, critical::solve_critical_flow,
};

/// Configuration of a single-leaf hydraulic system.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-derive", serde(default))]
pub struct LeafHydraulicsConfig {
    /// Maximum leaf conductance per unit leaf area at 25 °C (mol s⁻¹ MPa⁻¹ m⁻²).
    pub k_sla: f64,

    /// Number of slices along the leaf flow path.
    pub slices: usize,

    /// Leaf vulnerability curve.
    pub curve: WeibullCurve,

    /// Critical-flow search settings.
    pub solver: CriticalFlowConfig,

    /// Maximum number of conductance history entries kept.
    pub history_capacity: usize,
}

impl Default for LeafHydraulicsConfig {
    fn default() -> Self {
        Self {
            k_sla: 0.04,
            slices: 10,
            curve: WeibullCurve::default(),
            solver: CriticalFlowConfig::default(),
            history_capacity: 256,
        }
    }
}

/// Hydraulics of a single leaf.
///
/// Fluxes are per unit leaf area (mol m⁻² s⁻¹). The upstream pressure is
/// written by the leaf model before every critical-flow solve.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafHydraulics {
    /// Water potential at the leaf base.
    pub p_ups: Pressure,

    segment: Segment,
    solver: CriticalFlowConfig,
    k_history: ConductanceHistory,
}

impl LeafHydraulics {
    /// Creates a fully hydrated leaf at 25 °C with zero upstream pressure.
    ///
    /// # Errors
    ///
    /// Returns [`HydraulicsError::InvalidInput`] if the configuration is invalid.
    pub fn new(config: &LeafHydraulicsConfig) -> Result<Self, HydraulicsError> {
        config.solver.validate()?;
        let segment = Segment::new(&SegmentConfig {
            k_max: config.k_sla,
            slices: config.slices,
            height: 0.0,
            curve: config.curve,
        })?;

        Ok(Self {
            p_ups: Pressure::new::<megapascal>(0.0),
            segment,
            solver: config.solver,
            k_history: ConductanceHistory::with_capacity(config.history_capacity),
        })
    }

    /// Returns the maximum sustainable transpiration flux (mol m⁻² s⁻¹).
    ///
    /// Searches from `seed`, usually the previous solution. Records the
    /// zero-flow leaf conductance at the current upstream pressure in the
    /// conductance history. Returns zero if the upstream pressure is already
    /// past the critical pressure.
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream pressure or seed is invalid, or the
    /// search does not converge.
    pub fn critical_flow(&mut self, seed: f64) -> Result<f64, HydraulicsError> {
        let p_ups = self.upstream_mpa()?;
        let p_crit = self.segment.critical_pressure(self.solver.k_threshold);
        let segment = &self.segment;

        let flow = solve_critical_flow(
            |flow| segment.end_pressure(p_ups, flow, p_crit) - p_crit,
            seed,
            &self.solver,
        )?;

        self.k_history.push(self.segment.conductance(p_ups));
        Ok(flow)
    }

    /// Applies temperature effects on water surface tension and viscosity.
    ///
    /// # Errors
    ///
    /// Returns an error if the water properties cannot be evaluated.
    pub fn temperature_effects(
        &mut self,
        temperature: ThermodynamicTemperature,
    ) -> Result<(), HydraulicsError> {
        let f_st = relative_surface_tension(temperature)?;
        let f_vis = relative_viscosity(temperature)?;
        self.segment.set_temperature_factors(f_st, f_vis);
        Ok(())
    }

    /// Returns the leaf-end pressure for a flux (mol m⁻² s⁻¹).
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream pressure is non-finite.
    pub fn end_pressure(&self, flow: f64) -> Result<Pressure, HydraulicsError> {
        let p = self
            .segment
            .end_pressure(self.upstream_mpa()?, flow, f64::NEG_INFINITY);
        Ok(Pressure::new::<megapascal>(p))
    }

    /// Commits drainage history for a realized flux (mol m⁻² s⁻¹).
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream pressure or flux is invalid.
    pub fn update_pressure_profile(&mut self, flow: f64) -> Result<(), HydraulicsError> {
        if !flow.is_finite() || flow < 0.0 {
            return Err(HydraulicsError::InvalidInput(format!(
                "flow must be finite and non-negative, got {flow}"
            )));
        }
        let p_ups = self.upstream_mpa()?;
        self.segment.update_history(p_ups, flow);
        Ok(())
    }

    /// Returns the pressure at which leaf conductance collapses.
    #[must_use]
    pub fn critical_pressure(&self) -> Pressure {
        Pressure::new::<megapascal>(self.segment.critical_pressure(self.solver.k_threshold))
    }

    /// Returns the conductance history.
    #[must_use]
    pub fn k_history(&self) -> &ConductanceHistory {
        &self.k_history
    }

    /// Clears drainage and conductance history between independent runs.
    pub fn reset_history(&mut self) {
        self.segment.reset_history();
        self.k_history.clear();
    }

    fn upstream_mpa(&self) -> Result<f64, HydraulicsError> {
        let p = self.p_ups.get::<megapascal>();
        if p.is_finite() {
            Ok(p)
        } else {
            Err(HydraulicsError::InvalidInput(format!(
                "upstream pressure must be finite, got {p} MPa"
            )))
        }
    }
}
