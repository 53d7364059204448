//! Process-wide physical constants.
//!
//! Values are SI unless the name says otherwise.

use uom::si::{f64::MolarMass, molar_mass::kilogram_per_mole};

/// Universal gas constant (J mol⁻¹ K⁻¹).
pub const GAS_CONSTANT: f64 = 8.314_462_618;

/// Molar mass of water (kg mol⁻¹).
pub const MOLAR_MASS_WATER: f64 = 0.018_015_28;

/// Reference temperature for 25 °C rate constants (K).
pub const T_REFERENCE: f64 = 298.15;

/// Triple point temperature of water (K).
pub const T_TRIPLE: f64 = 273.16;

/// Triple point pressure of water (Pa).
pub const P_TRIPLE: f64 = 611.657;

/// Latent heat of vaporization at the triple point (J kg⁻¹).
pub const LATENT_HEAT_TRIPLE: f64 = 2.5008e6;

/// Isobaric specific heat of water vapor (J kg⁻¹ K⁻¹).
pub const CP_VAPOR: f64 = 1859.0;

/// Isobaric specific heat of liquid water (J kg⁻¹ K⁻¹).
pub const CP_LIQUID: f64 = 4181.0;

/// Critical point temperature of water (K).
pub const T_CRITICAL: f64 = 647.096;

/// Density of liquid water (kg m⁻³).
pub const RHO_WATER: f64 = 1000.0;

/// Gravitational acceleration (m s⁻²).
pub const GRAVITY: f64 = 9.81;

/// Ratio of the diffusivity of water vapor to that of CO2 in air.
pub const DIFFUSIVITY_RATIO_H2O_CO2: f64 = 1.6;

/// Returns the molar mass of water.
#[must_use]
pub fn molar_mass_water() -> MolarMass {
    MolarMass::new::<kilogram_per_mole>(MOLAR_MASS_WATER)
}

/// Returns the specific gas constant of water vapor (J kg⁻¹ K⁻¹).
#[must_use]
pub fn gas_constant_vapor() -> f64 {
    GAS_CONSTANT / MOLAR_MASS_WATER
}

/// Returns the hydrostatic pressure gradient of liquid water (MPa m⁻¹).
#[must_use]
pub fn hydrostatic_gradient() -> f64 {
    RHO_WATER * GRAVITY * 1e-6
}
