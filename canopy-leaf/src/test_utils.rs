//! Instrumented collaborators for unit tests.

use canopy_hydraulics::{HydraulicSystem, HydraulicsError};
use canopy_photosynthesis::{Biochemistry, Mode, PhotosynthesisError};
use canopy_physics::Environment;
use uom::si::{
    f64::{Area, Pressure, ThermodynamicTemperature},
    pressure::megapascal,
    thermodynamic_temperature::kelvin,
};

/// A hydraulic system with a linear critical flux that counts its calls.
///
/// The flux is `0.01 (p_ups + 3 MPa)` per unit leaf area, zero below -3 MPa,
/// scaled by `T / 298.15` after a temperature update.
#[derive(Debug, Clone)]
pub(crate) struct CountingHydraulics {
    pub temperature_calls: usize,
    pub flux_calls: usize,
    pub last_temperature: Option<ThermodynamicTemperature>,
    pub last_p_ups: Option<Pressure>,
    pub last_seed: Option<f64>,
    pub conductance: Option<f64>,
    pub fail: bool,
    scale: f64,
}

impl Default for CountingHydraulics {
    fn default() -> Self {
        Self {
            temperature_calls: 0,
            flux_calls: 0,
            last_temperature: None,
            last_p_ups: None,
            last_seed: None,
            conductance: None,
            fail: false,
            scale: 1.0,
        }
    }
}

impl CountingHydraulics {
    /// A system whose critical-flux solve always fails.
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl HydraulicSystem for CountingHydraulics {
    fn temperature_effects(
        &mut self,
        temperature: ThermodynamicTemperature,
    ) -> Result<(), HydraulicsError> {
        self.temperature_calls += 1;
        self.last_temperature = Some(temperature);
        self.scale = temperature.get::<kelvin>() / 298.15;
        Ok(())
    }

    fn critical_leaf_flux(
        &mut self,
        p_ups: Pressure,
        _leaf_area: Area,
        seed: f64,
    ) -> Result<f64, HydraulicsError> {
        self.flux_calls += 1;
        self.last_p_ups = Some(p_ups);
        self.last_seed = Some(seed);
        if self.fail {
            return Err(HydraulicsError::NonConvergence {
                seed,
                reason: "mock failure",
            });
        }

        let p = p_ups.get::<megapascal>();
        self.conductance = Some(0.04 * (1.0 + p / 3.0).max(0.0));
        Ok(self.scale * 0.01 * (p + 3.0).max(0.0))
    }

    fn latest_conductance(&self) -> Option<f64> {
        self.conductance
    }
}

/// A biochemistry model that records what it was asked to evaluate.
///
/// Net assimilation is `par · g_lc / (g_lc + 0.1) / 50`, so it rises with
/// both light and conductance.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingBiochemistry {
    pub par: f64,
    pub temperature: Option<ThermodynamicTemperature>,
    pub p_sat: Option<Pressure>,
    pub temperature_calls: usize,
    /// `(par, g_lc)` of every conductance-driven evaluation.
    pub evaluations: Vec<(f64, f64)>,
    pub fail_above_par: Option<f64>,
    a_net: f64,
}

impl Biochemistry for RecordingBiochemistry {
    type Error = PhotosynthesisError;

    fn set_par(&mut self, par: f64) {
        self.par = par;
    }

    fn set_temperature(&mut self, temperature: ThermodynamicTemperature) {
        self.temperature = Some(temperature);
    }

    fn set_saturation_vapor_pressure(&mut self, p_sat: Pressure) {
        self.p_sat = Some(p_sat);
    }

    fn temperature_dependence(&mut self, _env: &Environment) -> Result<(), PhotosynthesisError> {
        self.temperature_calls += 1;
        Ok(())
    }

    fn leaf_photosynthesis(
        &mut self,
        _env: &Environment,
        mode: Mode,
    ) -> Result<f64, PhotosynthesisError> {
        let Mode::LeafConductance(g_lc) = mode else {
            return Err(PhotosynthesisError::InvalidInput(
                "recording model only supports conductance mode".into(),
            ));
        };
        if self.fail_above_par.is_some_and(|limit| self.par > limit) {
            return Err(PhotosynthesisError::InvalidInput("par too high".into()));
        }

        self.evaluations.push((self.par, g_lc));
        self.a_net = self.par * g_lc / (g_lc + 0.1) / 50.0;
        Ok(self.a_net)
    }

    fn net_assimilation(&self) -> f64 {
        self.a_net
    }
}
