use canopy_hydraulics::HydraulicSystem;
use canopy_photosynthesis::{Biochemistry, Mode};
use canopy_physics::Environment;
use tracing::debug;
use uom::si::{f64::Pressure, pressure::pascal};

use crate::{LeafError, LeafLayer};

/// Floor on the stomatal resistance left after the boundary layer (m² s mol⁻¹).
const RESISTANCE_FLOOR: f64 = 1e-3;

/// Returns the whole-leaf water conductance at which transpiration equals
/// the critical flux `ec` (mol m⁻² s⁻¹) at vapor pressure deficit `vpd`.
///
/// Unbounded when the air is saturated relative to the leaf.
#[must_use]
pub fn critical_conductance(ec: f64, vpd: Pressure, p_atm: Pressure) -> f64 {
    let vpd = vpd.get::<pascal>();
    if vpd > 0.0 {
        ec / vpd * p_atm.get::<pascal>()
    } else {
        f64::INFINITY
    }
}

/// Returns the largest stomatal conductance that, in series with the
/// boundary layer `g_bw`, stays within the critical conductance `g_crit`.
///
/// The remaining stomatal resistance is floored at `1e-3`, so the result
/// never exceeds `1000`.
#[must_use]
pub fn max_stomatal_conductance(g_crit: f64, g_bw: f64) -> f64 {
    1.0 / (1.0 / g_crit - 1.0 / g_bw).max(RESISTANCE_FLOOR)
}

/// Computes the maximum net assimilation of every light bin under the
/// current hydraulic limit.
///
/// The stomatal conductance that exhausts the critical flux is clamped into
/// `[g_min, g_max]` and the biochemistry is evaluated at the resulting leaf
/// CO2 conductance with the bin's absorbed PAR. Afterwards `kr_max` holds
/// the latest conductance of the hydraulic system. Realized `g_sw` is not
/// modified.
///
/// # Errors
///
/// Returns [`LeafError::StaleDrivers`] if [`update_leaf_tp`] has not run for
/// the current drivers, and [`LeafError::AtBin`] if a bin is invalid or its
/// evaluation fails.
///
/// [`update_leaf_tp`]: crate::update_leaf_tp
pub fn update_leaf_ak<B, H>(
    leaf: &mut LeafLayer<B>,
    hs: &H,
    env: &Environment,
) -> Result<(), LeafError>
where
    B: Biochemistry,
    H: HydraulicSystem + ?Sized,
{
    if !leaf.is_current() {
        return Err(LeafError::StaleDrivers);
    }
    env.validate()?;

    let g_crit = critical_conductance(
        leaf.ec,
        env.vapor_pressure_deficit(leaf.p_sat),
        env.p_atm,
    );
    let (g_min, g_max) = (leaf.g_min, leaf.g_max);

    for (index, bin) in leaf.bins.iter_mut().enumerate() {
        bin.validate().map_err(|error| error.at_bin(index))?;

        let g_sw = max_stomatal_conductance(g_crit, bin.g_bw).max(g_min).min(g_max);
        let g_lc = bin.co2_conductance(g_sw);

        leaf.ps.set_par(bin.apar);
        bin.a_max = leaf
            .ps
            .leaf_photosynthesis(env, Mode::LeafConductance(g_lc))
            .map_err(|error| LeafError::biochemistry(error).at_bin(index))?;
    }

    if let Some(k) = hs.latest_conductance() {
        leaf.kr_max = k;
    }
    debug!(g_crit, kr_max = leaf.kr_max, bins = leaf.bins.len(), "updated flux capacity");
    Ok(())
}
