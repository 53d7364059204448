use tracing::trace;
use uom::si::{
    area::square_meter,
    f64::{Area, Pressure, ThermodynamicTemperature},
};

use crate::{HydraulicsError, LeafHydraulics, WholePlantHydraulics};

/// A hydraulic system that supplies water to a leaf.
///
/// The leaf model talks to its water supply only through this trait.
/// Implementations differ in how the leaf's upstream pressure and area are
/// used, and that difference is intentional:
///
/// - [`LeafHydraulics`] takes the leaf's upstream pressure on every solve
///   and works per unit leaf area, so the area is unused.
/// - [`WholePlantHydraulics`] ignores the leaf's upstream pressure, since
///   its own soil pressure is kept in sync by the surrounding driver, and
///   converts between leaf and whole-plant fluxes with the leaf area.
pub trait HydraulicSystem {
    /// Applies temperature effects on water properties.
    ///
    /// # Errors
    ///
    /// Returns an error if the water properties cannot be evaluated.
    fn temperature_effects(
        &mut self,
        temperature: ThermodynamicTemperature,
    ) -> Result<(), HydraulicsError>;

    /// Returns the critical flux per unit leaf area (mol m⁻² s⁻¹).
    ///
    /// `seed` is the previous leaf-level critical flux.
    ///
    /// # Errors
    ///
    /// Returns an error if the inputs are invalid or the solver does not converge.
    fn critical_leaf_flux(
        &mut self,
        p_ups: Pressure,
        leaf_area: Area,
        seed: f64,
    ) -> Result<f64, HydraulicsError>;

    /// Returns the most recent entry of the conductance history.
    fn latest_conductance(&self) -> Option<f64>;
}

impl HydraulicSystem for LeafHydraulics {
    fn temperature_effects(
        &mut self,
        temperature: ThermodynamicTemperature,
    ) -> Result<(), HydraulicsError> {
        LeafHydraulics::temperature_effects(self, temperature)
    }

    fn critical_leaf_flux(
        &mut self,
        p_ups: Pressure,
        _leaf_area: Area,
        seed: f64,
    ) -> Result<f64, HydraulicsError> {
        self.p_ups = p_ups;
        self.critical_flow(seed)
    }

    fn latest_conductance(&self) -> Option<f64> {
        self.k_history().latest()
    }
}

impl HydraulicSystem for WholePlantHydraulics {
    fn temperature_effects(
        &mut self,
        temperature: ThermodynamicTemperature,
    ) -> Result<(), HydraulicsError> {
        WholePlantHydraulics::temperature_effects(self, temperature)
    }

    fn critical_leaf_flux(
        &mut self,
        _p_ups: Pressure,
        leaf_area: Area,
        seed: f64,
    ) -> Result<f64, HydraulicsError> {
        let la = leaf_area.get::<square_meter>();
        if !la.is_finite() || la <= 0.0 {
            return Err(HydraulicsError::not_positive("leaf area", la));
        }

        let plant_flux = self.critical_flow(seed * la)?;
        trace!(plant_flux, leaf_area = la, "scaled whole-plant critical flux");
        Ok(plant_flux / la)
    }

    fn latest_conductance(&self) -> Option<f64> {
        self.k_history().latest()
    }
}
