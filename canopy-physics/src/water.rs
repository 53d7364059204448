//! Properties of liquid water and water vapor.

use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{AvailableEnergy, Pressure, ThermodynamicTemperature},
    pressure::pascal,
};

use crate::{
    PhysicsError,
    constants::{
        CP_LIQUID, CP_VAPOR, LATENT_HEAT_TRIPLE, P_TRIPLE, T_CRITICAL, T_REFERENCE, T_TRIPLE,
        gas_constant_vapor,
    },
    error::checked_kelvin,
};

/// Surface tension coefficients of the IAPWS correlation (N m⁻¹, -, -).
const SURFACE_TENSION_B: f64 = 0.2358;
const SURFACE_TENSION_MU: f64 = 1.256;
const SURFACE_TENSION_C: f64 = 0.625;

/// Vogel viscosity coefficients (K, K).
const VISCOSITY_B: f64 = 247.8;
const VISCOSITY_C: f64 = 140.0;

/// Returns the latent heat of vaporization.
///
/// Linear in temperature, `L = L₀ + (c_v − c_l)·(T − T₃)`, with `L₀` the
/// latent heat at the triple point `T₃`.
///
/// # Errors
///
/// Returns [`PhysicsError::InvalidInput`] if the temperature is not finite
/// and positive.
pub fn latent_heat_vapor(
    temperature: ThermodynamicTemperature,
) -> Result<AvailableEnergy, PhysicsError> {
    let t = checked_kelvin(temperature)?;
    let value = LATENT_HEAT_TRIPLE + (CP_VAPOR - CP_LIQUID) * (t - T_TRIPLE);
    Ok(AvailableEnergy::new::<joule_per_kilogram>(value))
}

/// Returns the saturation vapor pressure over liquid water.
///
/// Integrates Clausius–Clapeyron with the temperature-dependent latent heat
/// of [`latent_heat_vapor`], anchored at the triple point.
///
/// # Errors
///
/// Returns [`PhysicsError::InvalidInput`] if the temperature is not finite
/// and positive.
pub fn saturation_vapor_pressure(
    temperature: ThermodynamicTemperature,
) -> Result<Pressure, PhysicsError> {
    let t = checked_kelvin(temperature)?;
    let r_v = gas_constant_vapor();
    let delta_cp = CP_VAPOR - CP_LIQUID;

    let power = (t / T_TRIPLE).powf(delta_cp / r_v);
    let exponent = (LATENT_HEAT_TRIPLE - delta_cp * T_TRIPLE) / r_v * (1.0 / T_TRIPLE - 1.0 / t);

    Ok(Pressure::new::<pascal>(P_TRIPLE * power * exponent.exp()))
}

/// Returns the surface tension of water relative to its value at 25 °C.
///
/// Xylem vulnerability curves are parameterized at 25 °C; dividing a xylem
/// pressure by this factor maps it onto the reference curve.
///
/// # Errors
///
/// Returns an error if the temperature is non-physical or at or above the
/// critical point of water.
pub fn relative_surface_tension(temperature: ThermodynamicTemperature) -> Result<f64, PhysicsError> {
    let t = checked_kelvin(temperature)?;
    if t >= T_CRITICAL {
        return Err(PhysicsError::OutOfRange {
            property: "surface tension",
            temperature: t,
        });
    }
    Ok(surface_tension(t) / surface_tension(T_REFERENCE))
}

/// Returns the dynamic viscosity of liquid water relative to its value at 25 °C.
///
/// Xylem conductance scales inversely with this factor.
///
/// # Errors
///
/// Returns an error if the temperature is non-physical or at or below the
/// singularity of the Vogel equation.
pub fn relative_viscosity(temperature: ThermodynamicTemperature) -> Result<f64, PhysicsError> {
    let t = checked_kelvin(temperature)?;
    if t <= VISCOSITY_C {
        return Err(PhysicsError::OutOfRange {
            property: "viscosity",
            temperature: t,
        });
    }
    let exponent = VISCOSITY_B / (t - VISCOSITY_C) - VISCOSITY_B / (T_REFERENCE - VISCOSITY_C);
    Ok(10.0_f64.powf(exponent))
}

/// Surface tension of water (N m⁻¹).
fn surface_tension(t: f64) -> f64 {
    let tau = 1.0 - t / T_CRITICAL;
    SURFACE_TENSION_B * tau.powf(SURFACE_TENSION_MU) * (1.0 - SURFACE_TENSION_C * tau)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        available_energy::kilojoule_per_kilogram, pressure::kilopascal,
        thermodynamic_temperature::kelvin,
    };

    fn kelvin_temp(value: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(value)
    }

    #[test]
    fn latent_heat_at_triple_point() {
        let l = latent_heat_vapor(kelvin_temp(T_TRIPLE)).unwrap();
        assert_relative_eq!(l.get::<joule_per_kilogram>(), LATENT_HEAT_TRIPLE);
    }

    #[test]
    fn latent_heat_decreases_with_temperature() {
        let cool = latent_heat_vapor(kelvin_temp(283.15)).unwrap();
        let warm = latent_heat_vapor(kelvin_temp(303.15)).unwrap();
        assert!(warm < cool);
        assert_relative_eq!(warm.get::<kilojoule_per_kilogram>(), 2430.7, epsilon = 1.0);
    }

    #[test]
    fn saturation_vapor_pressure_matches_tables() {
        let at_triple = saturation_vapor_pressure(kelvin_temp(T_TRIPLE)).unwrap();
        assert_relative_eq!(at_triple.get::<pascal>(), P_TRIPLE, epsilon = 1e-9);

        // Tabulated values are 3.17 kPa at 25 °C and 4.25 kPa at 30 °C.
        let at_25 = saturation_vapor_pressure(kelvin_temp(298.15)).unwrap();
        assert_relative_eq!(at_25.get::<kilopascal>(), 3.17, epsilon = 0.02);

        let at_30 = saturation_vapor_pressure(kelvin_temp(303.15)).unwrap();
        assert_relative_eq!(at_30.get::<kilopascal>(), 4.25, epsilon = 0.03);
    }

    #[test]
    fn relative_factors_are_unity_at_reference() {
        let t = kelvin_temp(T_REFERENCE);
        assert_relative_eq!(relative_surface_tension(t).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(relative_viscosity(t).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn warm_water_is_less_viscous_and_weaker() {
        let t = kelvin_temp(313.15);
        assert!(relative_viscosity(t).unwrap() < 1.0);
        assert!(relative_surface_tension(t).unwrap() < 1.0);
    }

    #[test]
    fn rejects_out_of_range_temperatures() {
        assert!(matches!(
            relative_surface_tension(kelvin_temp(700.0)),
            Err(PhysicsError::OutOfRange { .. })
        ));
        assert!(matches!(
            relative_viscosity(kelvin_temp(100.0)),
            Err(PhysicsError::OutOfRange { .. })
        ));
        assert!(matches!(
            saturation_vapor_pressure(kelvin_temp(f64::INFINITY)),
            Err(PhysicsError::InvalidInput(_))
        ));
    }
}
