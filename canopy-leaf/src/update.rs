use canopy_hydraulics::HydraulicSystem;
use canopy_photosynthesis::Biochemistry;
use canopy_physics::{
    Environment, constants::molar_mass_water, relative_diffusive_coefficient,
    water::{latent_heat_vapor, saturation_vapor_pressure},
};
use tracing::{debug, trace};
use uom::si::{area::square_meter, pressure::megapascal, thermodynamic_temperature::kelvin};

use crate::{LeafError, LeafLayer, error::positive};

/// Which part of the leaf state an update recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// Drivers matched the last update; nothing was recomputed.
    Unchanged,
    /// Temperature changed; all temperature-dependent state and the critical
    /// flux were recomputed.
    Temperature,
    /// Only the upstream pressure changed; the critical flux was recomputed.
    Pressure,
}

/// Brings the leaf state up to date with its temperature and upstream pressure.
///
/// A temperature change takes precedence over a simultaneous pressure change
/// and refreshes diffusive conductance bounds, latent heat, saturation vapor
/// pressure, the biochemistry rates, and the hydraulic temperature effects
/// before re-solving the critical flux. A pressure-only change re-solves the
/// critical flux and nothing else. The previous critical flux seeds the solve.
///
/// On error the memo shadows are left untouched, so the next call retries.
///
/// # Errors
///
/// Returns [`LeafError::InvalidInput`] for non-finite drivers or a
/// non-positive leaf area, and propagates collaborator errors unchanged.
pub fn update_leaf_tp<B, H>(
    leaf: &mut LeafLayer<B>,
    hs: &mut H,
    env: &Environment,
) -> Result<Refresh, LeafError>
where
    B: Biochemistry,
    H: HydraulicSystem + ?Sized,
{
    if leaf.t_old != Some(leaf.temperature) {
        validate_drivers(leaf, env)?;
        debug!(
            t_old = leaf.t_old.map(|t| t.get::<kelvin>()),
            t = leaf.temperature.get::<kelvin>(),
            "leaf temperature changed"
        );

        let t = leaf.temperature;
        let factor = relative_diffusive_coefficient(t)?;
        leaf.g_max = leaf.g_max25 * factor;
        leaf.g_min = leaf.g_min25 * factor;
        leaf.lv = latent_heat_vapor(t)? * molar_mass_water();

        leaf.ps.set_temperature(t);
        leaf.ps
            .temperature_dependence(env)
            .map_err(LeafError::biochemistry)?;

        let p_sat = saturation_vapor_pressure(t)?;
        leaf.p_sat = p_sat;
        leaf.ps.set_saturation_vapor_pressure(p_sat);

        hs.temperature_effects(t)?;
        leaf.ec = hs.critical_leaf_flux(leaf.p_ups, leaf.leaf_area, leaf.ec)?;

        leaf.t_old = Some(t);
        leaf.p_old = Some(leaf.p_ups);
        Ok(Refresh::Temperature)
    } else if leaf.p_old != Some(leaf.p_ups) {
        validate_drivers(leaf, env)?;
        debug!(
            p_old = leaf.p_old.map(|p| p.get::<megapascal>()),
            p_ups = leaf.p_ups.get::<megapascal>(),
            "leaf upstream pressure changed"
        );

        leaf.ec = hs.critical_leaf_flux(leaf.p_ups, leaf.leaf_area, leaf.ec)?;
        leaf.p_old = Some(leaf.p_ups);
        Ok(Refresh::Pressure)
    } else {
        trace!("leaf drivers unchanged");
        Ok(Refresh::Unchanged)
    }
}

fn validate_drivers<B>(leaf: &LeafLayer<B>, env: &Environment) -> Result<(), LeafError> {
    positive("temperature", leaf.temperature.get::<kelvin>())?;
    let p_ups = leaf.p_ups.get::<megapascal>();
    if !p_ups.is_finite() {
        return Err(LeafError::InvalidInput {
            field: "p_ups",
            value: p_ups,
            reason: "must be finite",
        });
    }
    positive("leaf_area", leaf.leaf_area.get::<square_meter>())?;
    env.validate()?;
    Ok(())
}
