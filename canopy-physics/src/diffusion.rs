use uom::si::f64::ThermodynamicTemperature;

use crate::{
    PhysicsError,
    constants::T_REFERENCE,
    error::checked_kelvin,
};

/// Exponent of the temperature dependence of gas diffusivity in air.
const DIFFUSIVITY_EXPONENT: f64 = 1.8;

/// Returns the diffusivity of gases in air relative to its value at 25 °C.
///
/// Uses `(T / 298.15)^1.8`, which scales every diffusive conductance of the
/// leaf by the same factor.
///
/// # Errors
///
/// Returns [`PhysicsError::InvalidInput`] if the temperature is not finite
/// and positive.
pub fn relative_diffusive_coefficient(
    temperature: ThermodynamicTemperature,
) -> Result<f64, PhysicsError> {
    let t = checked_kelvin(temperature)?;
    Ok((t / T_REFERENCE).powf(DIFFUSIVITY_EXPONENT))
}
