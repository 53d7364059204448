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

/// Configuration of a whole-plant hydraulic system.
///
/// Segment conductances are whole-organ values (mol s⁻¹ MPa⁻¹).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-derive", serde(default))]
pub struct WholePlantConfig {
    pub root: SegmentConfig,
    pub stem: SegmentConfig,
    pub leaf: SegmentConfig,

    /// Critical-flow search settings.
    pub solver: CriticalFlowConfig,

    /// Maximum number of conductance history entries kept.
    pub history_capacity: usize,
}

impl Default for WholePlantConfig {
    /// A small tree with 50 m² of leaves on an 8 m stem.
    fn default() -> Self {
        Self {
            root: SegmentConfig {
                k_max: 10.0,
                slices: 10,
                height: 0.0,
                curve: WeibullCurve { b: 1.879, c: 2.396 },
            },
            stem: SegmentConfig {
                k_max: 10.0,
                slices: 10,
                height: 8.0,
                curve: WeibullCurve { b: 2.238, c: 9.380 },
            },
            leaf: SegmentConfig {
                k_max: 2.0,
                slices: 10,
                height: 0.0,
                curve: WeibullCurve { b: 1.879, c: 2.396 },
            },
            solver: CriticalFlowConfig::default(),
            history_capacity: 256,
        }
    }
}

/// Hydraulics of a whole plant: root, stem, and leaf segments in series.
///
/// Fluxes are whole-plant (mol s⁻¹). The upstream (soil) pressure belongs
/// to the plant and is set by the surrounding driver through
/// [`WholePlantHydraulics::set_soil_pressure`]; leaves attached to the plant
/// never write it.
#[derive(Debug, Clone, PartialEq)]
pub struct WholePlantHydraulics {
    p_soil: Pressure,
    root: Segment,
    stem: Segment,
    leaf: Segment,
    solver: CriticalFlowConfig,
    k_history: ConductanceHistory,
}

impl WholePlantHydraulics {
    /// Creates a fully hydrated plant at 25 °C in saturated soil.
    ///
    /// # Errors
    ///
    /// Returns [`HydraulicsError::InvalidInput`] if any segment or the
    /// solver configuration is invalid.
    pub fn new(config: &WholePlantConfig) -> Result<Self, HydraulicsError> {
        config.solver.validate()?;
        Ok(Self {
            p_soil: Pressure::new::<megapascal>(0.0),
            root: Segment::new(&config.root)?,
            stem: Segment::new(&config.stem)?,
            leaf: Segment::new(&config.leaf)?,
            solver: config.solver,
            k_history: ConductanceHistory::with_capacity(config.history_capacity),
        })
    }

    /// Sets the soil water potential at the root surface.
    pub fn set_soil_pressure(&mut self, p_soil: Pressure) {
        self.p_soil = p_soil;
    }

    /// Returns the soil water potential at the root surface.
    #[must_use]
    pub fn soil_pressure(&self) -> Pressure {
        self.p_soil
    }

    /// Returns the maximum sustainable whole-plant transpiration (mol s⁻¹).
    ///
    /// Each segment must stay above its own critical pressure. Records the
    /// zero-flow plant conductance in the conductance history.
    ///
    /// # Errors
    ///
    /// Returns an error if the soil pressure or seed is invalid, or the
    /// search does not converge.
    pub fn critical_flow(&mut self, seed: f64) -> Result<f64, HydraulicsError> {
        let p_soil = self.soil_mpa()?;
        let k_threshold = self.solver.k_threshold;
        let segments = [&self.root, &self.stem, &self.leaf];

        let flow = solve_critical_flow(
            |flow| {
                let mut p = p_soil;
                let mut margin = 0.0;
                for segment in segments {
                    let p_crit = segment.critical_pressure(k_threshold);
                    p = segment.end_pressure(p, flow, p_crit);
                    margin = p - p_crit;
                    if margin < 0.0 {
                        break;
                    }
                }
                margin
            },
            seed,
            &self.solver,
        )?;

        self.k_history.push(self.conductance(p_soil));
        Ok(flow)
    }

    /// Applies temperature effects on water surface tension and viscosity
    /// to every segment.
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
        for segment in [&mut self.root, &mut self.stem, &mut self.leaf] {
            segment.set_temperature_factors(f_st, f_vis);
        }
        Ok(())
    }

    /// Returns the leaf-end pressure for a whole-plant flux (mol s⁻¹).
    ///
    /// # Errors
    ///
    /// Returns an error if the soil pressure is non-finite.
    pub fn end_pressure(&self, flow: f64) -> Result<Pressure, HydraulicsError> {
        let mut p = self.soil_mpa()?;
        for segment in [&self.root, &self.stem, &self.leaf] {
            p = segment.end_pressure(p, flow, f64::NEG_INFINITY);
        }
        Ok(Pressure::new::<megapascal>(p))
    }

    /// Commits drainage history in every segment for a realized flux (mol s⁻¹).
    ///
    /// # Errors
    ///
    /// Returns an error if the soil pressure or flux is invalid.
    pub fn update_pressure_profile(&mut self, flow: f64) -> Result<(), HydraulicsError> {
        if !flow.is_finite() || flow < 0.0 {
            return Err(HydraulicsError::InvalidInput(format!(
                "flow must be finite and non-negative, got {flow}"
            )));
        }
        let mut p = self.soil_mpa()?;
        for segment in [&mut self.root, &mut self.stem, &mut self.leaf] {
            let p_end = segment.end_pressure(p, flow, f64::NEG_INFINITY);
            segment.update_history(p, flow);
            p = p_end;
        }
        Ok(())
    }

    /// Returns the conductance history.
    #[must_use]
    pub fn k_history(&self) -> &ConductanceHistory {
        &self.k_history
    }

    /// Clears drainage and conductance history between independent runs.
    pub fn reset_history(&mut self) {
        for segment in [&mut self.root, &mut self.stem, &mut self.leaf] {
            segment.reset_history();
        }
        self.k_history.clear();
    }

    /// Zero-flow conductance of the three segments in series.
    fn conductance(&self, p_soil: f64) -> f64 {
        let mut p = p_soil;
        let mut resistance = 0.0;
        for segment in [&self.root, &self.stem, &self.leaf] {
            resistance += 1.0 / segment.conductance(p);
            p = segment.end_pressure(p, 0.0, f64::NEG_INFINITY);
        }
        1.0 / resistance
    }

    fn soil_mpa(&self) -> Result<f64, HydraulicsError> {
        let p = self.p_soil.get::<megapascal>();
        if p.is_finite() {
            Ok(p)
        } else {
            Err(HydraulicsError::InvalidInput(format!(
                "soil pressure must be finite, got {p} MPa"
            )))
        }
    }
}
