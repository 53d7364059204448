use canopy_photosynthesis::Biochemistry;
use canopy_physics::Environment;
use tracing::debug;

use crate::{LeafError, LeafLayer, error::non_negative, leaf_gas_exchange};

/// Outcome of enforcing the stomatal conductance bounds on one bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clamp {
    /// `g_sw` was already within bounds and was left untouched.
    Within,
    /// `g_sw` was raised to `g_min` and gas exchange re-evaluated.
    Min,
    /// `g_sw` was lowered to `g_max` and gas exchange re-evaluated.
    Max,
}

/// Enforces `g_min ≤ g_sw ≤ g_max` on one light bin.
///
/// Out-of-bounds conductances are moved to the violated bound and gas
/// exchange is re-evaluated there with the PAR currently set on the
/// biochemistry.
///
/// # Errors
///
/// Returns [`LeafError::InvalidInput`] if the bin does not exist, one of its
/// drivers is invalid, or its `g_sw` is negative or non-finite, and
/// propagates biochemistry errors.
pub fn gsw_control<B: Biochemistry>(
    leaf: &mut LeafLayer<B>,
    env: &Environment,
    index: usize,
) -> Result<Clamp, LeafError> {
    let bin = leaf.bin(index)?;
    bin.validate()?;
    let g_sw = non_negative("g_sw", bin.g_sw)?;

    let (bound, clamp) = if g_sw < leaf.g_min {
        (leaf.g_min, Clamp::Min)
    } else if g_sw > leaf.g_max {
        (leaf.g_max, Clamp::Max)
    } else {
        return Ok(Clamp::Within);
    };

    debug!(index, g_sw, bound, ?clamp, "clamped stomatal conductance");
    leaf_gas_exchange(leaf, index, bound, env)?;
    Ok(clamp)
}

/// Enforces the stomatal conductance bounds on every light bin.
///
/// Sets each bin's absorbed PAR on the biochemistry before controlling it.
/// Returns the number of bins that were clamped.
///
/// # Errors
///
/// Returns [`LeafError::AtBin`] wrapping the first failure.
pub fn gsw_control_all<B: Biochemistry>(
    leaf: &mut LeafLayer<B>,
    env: &Environment,
) -> Result<usize, LeafError> {
    let mut clamped = 0;
    for index in 0..leaf.bins.len() {
        leaf.ps.set_par(leaf.bins[index].apar);
        let clamp = gsw_control(leaf, env, index).map_err(|error| error.at_bin(index))?;
        if clamp != Clamp::Within {
            clamped += 1;
        }
    }
    Ok(clamped)
}
