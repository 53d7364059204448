use thiserror::Error;

/// Errors that may occur when evaluating physical properties.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// The input values are invalid or inconsistent.
    ///
    /// Indicates non-finite values or values outside their physical domain,
    /// such as a negative absolute temperature.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The property is undefined at the given temperature.
    ///
    /// For example, the surface tension of water above its critical point.
    #[error("property `{property}` is undefined at {temperature} K")]
    OutOfRange {
        property: &'static str,
        temperature: f64,
    },
}

/// Returns the temperature in kelvin after checking it is finite and positive.
pub(crate) fn checked_kelvin(
    temperature: uom::si::f64::ThermodynamicTemperature,
) -> Result<f64, PhysicsError> {
    let t = temperature.get::<uom::si::thermodynamic_temperature::kelvin>();
    if t.is_finite() && t > 0.0 {
        Ok(t)
    } else {
        Err(PhysicsError::InvalidInput(format!(
            "temperature must be finite and positive, got {t} K"
        )))
    }
}
