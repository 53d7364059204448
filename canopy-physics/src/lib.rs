//! Physical constants, water properties, and atmospheric drivers for the
//! canopy leaf model.
//!
//! Property functions take a [`ThermodynamicTemperature`] and return either a
//! `uom` quantity or a dimensionless factor relative to the reference
//! temperature [`constants::T_REFERENCE`].
//!
//! [`ThermodynamicTemperature`]: uom::si::f64::ThermodynamicTemperature

mod diffusion;
mod environment;
mod error;

pub mod constants;
pub mod water;

pub use diffusion::relative_diffusive_coefficient;
pub use environment::Environment;
pub use error::PhysicsError;
