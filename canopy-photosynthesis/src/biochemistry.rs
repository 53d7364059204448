use std::error::Error as StdError;

use canopy_physics::Environment;
use uom::si::f64::{Pressure, ThermodynamicTemperature};

/// How net assimilation is constrained when it is evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    /// Total leaf CO2 conductance from the air to the chloroplast (mol m⁻² s⁻¹).
    ///
    /// Internal CO2 follows from the supply and demand balance.
    LeafConductance(f64),

    /// Fixed internal CO2 partial pressure.
    InternalCo2(Pressure),
}

/// A leaf photosynthesis model.
///
/// The model holds its own drivers. The leaf model pushes light and
/// temperature in with the setters, then calls
/// [`Biochemistry::temperature_dependence`] once per temperature change and
/// [`Biochemistry::leaf_photosynthesis`] once per evaluation.
///
/// Assimilation rates are in μmol m⁻² s⁻¹.
pub trait Biochemistry {
    /// Error raised when the model cannot be evaluated.
    type Error: StdError + Send + Sync + 'static;

    /// Sets the absorbed photosynthetically active radiation (μmol m⁻² s⁻¹).
    fn set_par(&mut self, par: f64);

    /// Sets the leaf temperature used by the next temperature update.
    fn set_temperature(&mut self, temperature: ThermodynamicTemperature);

    /// Sets the saturation vapor pressure at leaf temperature.
    fn set_saturation_vapor_pressure(&mut self, p_sat: Pressure);

    /// Refreshes temperature-dependent rate parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the temperature or environment is invalid.
    fn temperature_dependence(&mut self, env: &Environment) -> Result<(), Self::Error>;

    /// Evaluates and stores net assimilation.
    ///
    /// # Errors
    ///
    /// Returns an error if the inputs are invalid.
    fn leaf_photosynthesis(&mut self, env: &Environment, mode: Mode) -> Result<f64, Self::Error>;

    /// Returns the net assimilation of the last evaluation.
    fn net_assimilation(&self) -> f64;
}
