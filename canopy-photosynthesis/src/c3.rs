//! Farquhar-type C3 photosynthesis.

mod kinetics;
mod parameters;

pub use kinetics::{Arrhenius, PeakedArrhenius};
pub use parameters::C3Parameters;

use canopy_physics::Environment;
use tracing::trace;
use uom::si::{
    f64::{Pressure, ThermodynamicTemperature},
    pressure::pascal,
    thermodynamic_temperature::kelvin,
};

use crate::{Biochemistry, Mode, PhotosynthesisError};

/// Rate parameters at the current leaf temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rates {
    /// Maximum carboxylation rate (μmol m⁻² s⁻¹).
    pub vcmax: f64,
    /// Maximum electron transport rate (μmol m⁻² s⁻¹).
    pub jmax: f64,
    /// Dark respiration (μmol m⁻² s⁻¹).
    pub rd: f64,
    /// Michaelis constant for CO2 (Pa).
    pub kc: f64,
    /// Michaelis constant for O2 (Pa).
    pub ko: f64,
    /// CO2 compensation point without dark respiration (Pa).
    pub gamma_star: f64,
}

impl Rates {
    fn at(params: &C3Parameters, t: f64) -> Self {
        Self {
            vcmax: params.vcmax25 * params.vcmax_temperature.factor(t),
            jmax: params.jmax25 * params.jmax_temperature.factor(t),
            rd: params.rd25 * params.rd_temperature.factor(t),
            kc: params.kc25 * params.kc_temperature.factor(t),
            ko: params.ko25 * params.ko_temperature.factor(t),
            gamma_star: params.gamma_star25 * params.gamma_star_temperature.factor(t),
        }
    }
}

/// A carboxylation rate of the form `V (Cᵢ − Γ*) / (m Cᵢ + n)`.
#[derive(Debug, Clone, Copy)]
struct Limitation {
    v: f64,
    m: f64,
    n: f64,
}

impl Limitation {
    fn gross_at_internal(&self, p_i: f64, gamma_star: f64) -> f64 {
        self.v * (p_i - gamma_star) / (self.m * p_i + self.n)
    }

    /// Gross rate when internal CO2 is set by a series conductance.
    ///
    /// `a` is the CO2 drawdown per unit net assimilation (Pa per μmol m⁻² s⁻¹)
    /// and `c` the ambient CO2 plus the drawdown offset of respiration. The
    /// quadratic `m a A² − (m c + n + V a) A + V (c − Γ*) = 0` is solved for
    /// its smaller root in a form that stays finite as `a` goes to zero.
    fn gross_at_conductance(&self, a: f64, c: f64, gamma_star: f64) -> f64 {
        let b = self.m * c + self.n + self.v * a;
        let q = self.v * (c - gamma_star);
        let disc = (b * b - 4.0 * self.m * a * q).max(0.0);
        2.0 * q / (b + disc.sqrt())
    }
}

/// Reference C3 leaf biochemistry.
///
/// Temperature-dependent rates are cached and only recomputed when
/// [`Biochemistry::temperature_dependence`] sees a new temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct C3Model {
    params: C3Parameters,
    temperature: ThermodynamicTemperature,
    p_sat: Pressure,
    par: f64,
    cached_temperature: Option<f64>,
    rates: Rates,
    j: f64,
    a_gross: f64,
    a_net: f64,
    p_i: Pressure,
}

impl C3Model {
    /// Creates a model at 25 °C with no absorbed light.
    ///
    /// # Errors
    ///
    /// Returns [`PhotosynthesisError::InvalidInput`] if the parameters are invalid.
    pub fn new(params: C3Parameters) -> Result<Self, PhotosynthesisError> {
        params.validate()?;
        Ok(Self {
            rates: Rates::at(&params, canopy_physics::constants::T_REFERENCE),
            params,
            temperature: ThermodynamicTemperature::new::<kelvin>(
                canopy_physics::constants::T_REFERENCE,
            ),
            p_sat: Pressure::new::<pascal>(0.0),
            par: 0.0,
            cached_temperature: None,
            j: 0.0,
            a_gross: 0.0,
            a_net: 0.0,
            p_i: Pressure::new::<pascal>(0.0),
        })
    }

    #[must_use]
    pub fn parameters(&self) -> &C3Parameters {
        &self.params
    }

    /// Returns the rates at the last refreshed temperature.
    #[must_use]
    pub fn rates(&self) -> &Rates {
        &self.rates
    }

    /// Returns the temperature (K) the rates were last computed at.
    #[must_use]
    pub fn cached_temperature(&self) -> Option<f64> {
        self.cached_temperature
    }

    #[must_use]
    pub fn temperature(&self) -> ThermodynamicTemperature {
        self.temperature
    }

    #[must_use]
    pub fn saturation_vapor_pressure(&self) -> Pressure {
        self.p_sat
    }

    #[must_use]
    pub fn par(&self) -> f64 {
        self.par
    }

    /// Returns the electron transport rate of the last evaluation (μmol m⁻² s⁻¹).
    #[must_use]
    pub fn electron_transport(&self) -> f64 {
        self.j
    }

    /// Returns the gross assimilation of the last evaluation (μmol m⁻² s⁻¹).
    #[must_use]
    pub fn gross_assimilation(&self) -> f64 {
        self.a_gross
    }

    /// Returns the internal CO2 partial pressure of the last evaluation.
    #[must_use]
    pub fn internal_co2(&self) -> Pressure {
        self.p_i
    }

    /// Non-rectangular hyperbola of absorbed light and `Jmax`.
    fn electron_transport_rate(&self) -> f64 {
        let i = self.par * self.params.quantum_yield * self.params.psii_fraction;
        let jmax = self.rates.jmax;
        let theta = self.params.theta_j;
        let sum = i + jmax;
        let disc = (sum * sum - 4.0 * theta * i * jmax).max(0.0);
        (sum - disc.sqrt()) / (2.0 * theta)
    }

    fn limitations(&self, p_o2: f64) -> [Limitation; 2] {
        let Rates {
            vcmax,
            kc,
            ko,
            gamma_star,
            ..
        } = self.rates;
        [
            Limitation {
                v: vcmax,
                m: 1.0,
                n: kc * (1.0 + p_o2 / ko),
            },
            Limitation {
                v: self.j,
                m: 4.0,
                n: 8.0 * gamma_star,
            },
        ]
    }
}

impl Biochemistry for C3Model {
    type Error = PhotosynthesisError;

    fn set_par(&mut self, par: f64) {
        self.par = par;
    }

    fn set_temperature(&mut self, temperature: ThermodynamicTemperature) {
        self.temperature = temperature;
    }

    fn set_saturation_vapor_pressure(&mut self, p_sat: Pressure) {
        self.p_sat = p_sat;
    }

    fn temperature_dependence(&mut self, _env: &Environment) -> Result<(), PhotosynthesisError> {
        let t = self.temperature.get::<kelvin>();
        if !t.is_finite() || t <= 0.0 {
            return Err(PhotosynthesisError::InvalidInput(format!(
                "temperature must be finite and positive, got {t} K"
            )));
        }
        if self.cached_temperature == Some(t) {
            return Ok(());
        }

        self.rates = Rates::at(&self.params, t);
        self.cached_temperature = Some(t);
        trace!(t, vcmax = self.rates.vcmax, jmax = self.rates.jmax, "refreshed C3 rates");
        Ok(())
    }

    fn leaf_photosynthesis(
        &mut self,
        env: &Environment,
        mode: Mode,
    ) -> Result<f64, PhotosynthesisError> {
        if !self.par.is_finite() || self.par < 0.0 {
            return Err(PhotosynthesisError::InvalidInput(format!(
                "absorbed PAR must be finite and non-negative, got {}",
                self.par
            )));
        }

        self.j = self.electron_transport_rate();
        let gamma_star = self.rates.gamma_star;
        let rd = self.rates.rd;
        let limitations = self.limitations(env.p_o2.get::<pascal>());

        let (a_gross, p_i) = match mode {
            Mode::InternalCo2(p_i) => {
                let p_i = p_i.get::<pascal>();
                if !p_i.is_finite() || p_i < 0.0 {
                    return Err(PhotosynthesisError::InvalidInput(format!(
                        "internal CO2 must be finite and non-negative, got {p_i} Pa"
                    )));
                }
                let a_gross = limitations
                    .iter()
                    .map(|lim| lim.gross_at_internal(p_i, gamma_star))
                    .fold(f64::INFINITY, f64::min);
                (a_gross, p_i)
            }
            Mode::LeafConductance(g_lc) => {
                if !g_lc.is_finite() || g_lc < 0.0 {
                    return Err(PhotosynthesisError::InvalidInput(format!(
                        "leaf CO2 conductance must be finite and non-negative, got {g_lc}"
                    )));
                }
                let p_a = env.p_co2.get::<pascal>();
                if g_lc == 0.0 {
                    // Closed leaf: no net exchange with the air.
                    (rd, p_a)
                } else {
                    let a = 1e-6 * env.p_atm.get::<pascal>() / g_lc;
                    let c = p_a + a * rd;
                    let a_gross = limitations
                        .iter()
                        .map(|lim| lim.gross_at_conductance(a, c, gamma_star))
                        .fold(f64::INFINITY, f64::min);
                    (a_gross, c - a * a_gross)
                }
            }
        };

        self.a_gross = a_gross;
        self.a_net = a_gross - rd;
        self.p_i = Pressure::new::<pascal>(p_i);
        Ok(self.a_net)
    }

    fn net_assimilation(&self) -> f64 {
        self.a_net
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn model_at(t: f64, par: f64) -> C3Model {
        let mut ps = C3Model::new(C3Parameters::default()).unwrap();
        ps.set_temperature(ThermodynamicTemperature::new::<kelvin>(t));
        ps.temperature_dependence(&Environment::default()).unwrap();
        ps.set_par(par);
        ps
    }

    #[test]
    fn reference_rates_at_25_celsius() {
        let ps = model_at(298.15, 0.0);
        let rates = ps.rates();
        assert_relative_eq!(rates.vcmax, 80.0, epsilon = 1e-9);
        assert_relative_eq!(rates.jmax, 133.6, epsilon = 1e-9);
        assert_relative_eq!(rates.rd, 1.2, epsilon = 1e-9);
        assert_relative_eq!(rates.gamma_star, 4.332, epsilon = 1e-9);
    }

    #[test]
    fn rates_follow_temperature() {
        let ps = model_at(303.15, 0.0);
        assert_relative_eq!(ps.rates().vcmax, 100.778, epsilon = 1e-3);
        assert_relative_eq!(ps.rates().kc, 68.685, epsilon = 1e-3);
        assert_eq!(ps.cached_temperature(), Some(303.15));
    }

    #[test]
    fn electron_transport_saturates() {
        let mut ps = model_at(298.15, 1000.0);
        ps.leaf_photosynthesis(&Environment::default(), Mode::LeafConductance(0.2))
            .unwrap();
        assert_relative_eq!(ps.electron_transport(), 119.56, epsilon = 1e-2);
        assert!(ps.electron_transport() < ps.rates().jmax);
    }

    #[test]
    fn dark_leaf_respires() {
        let mut ps = model_at(298.15, 0.0);
        let a_net = ps
            .leaf_photosynthesis(&Environment::default(), Mode::LeafConductance(0.2))
            .unwrap();
        assert_relative_eq!(a_net, -1.2, epsilon = 1e-9);
    }

    #[test]
    fn conductance_mode_matches_internal_mode() {
        let env = Environment::default();
        let g_lc = 0.15;
        let mut ps = model_at(298.15, 1200.0);

        let a_net = ps
            .leaf_photosynthesis(&env, Mode::LeafConductance(g_lc))
            .unwrap();
        let p_i = ps.internal_co2();

        // Supply: A = g (Cₐ − Cᵢ) / P, in μmol.
        let supply = 1e6 * g_lc * (env.p_co2 - p_i).get::<pascal>() / env.p_atm.get::<pascal>();
        assert_relative_eq!(a_net, supply, epsilon = 1e-9);

        let at_internal = ps.leaf_photosynthesis(&env, Mode::InternalCo2(p_i)).unwrap();
        assert_relative_eq!(at_internal, a_net, epsilon = 1e-9);
    }

    #[test]
    fn assimilation_rises_with_conductance() {
        let env = Environment::default();
        let mut ps = model_at(298.15, 1000.0);
        let mut previous = f64::NEG_INFINITY;
        for g_lc in [0.01, 0.05, 0.1, 0.2, 0.5] {
            let a_net = ps
                .leaf_photosynthesis(&env, Mode::LeafConductance(g_lc))
                .unwrap();
            assert!(a_net > previous);
            previous = a_net;
        }
    }

    #[test]
    fn closed_leaf_has_no_net_exchange() {
        let mut ps = model_at(298.15, 1000.0);
        let a_net = ps
            .leaf_photosynthesis(&Environment::default(), Mode::LeafConductance(0.0))
            .unwrap();
        assert_relative_eq!(a_net, 0.0);
        assert_relative_eq!(ps.net_assimilation(), 0.0);
    }

    #[test]
    fn same_temperature_keeps_cached_rates() {
        let mut ps = model_at(303.15, 0.0);
        let rates = *ps.rates();
        ps.set_temperature(ThermodynamicTemperature::new::<kelvin>(303.15));
        ps.temperature_dependence(&Environment::default()).unwrap();
        assert_eq!(*ps.rates(), rates);
    }

    #[test]
    fn rejects_negative_conductance() {
        let mut ps = model_at(298.15, 1000.0);
        let result = ps.leaf_photosynthesis(&Environment::default(), Mode::LeafConductance(-0.1));
        assert!(matches!(result, Err(PhotosynthesisError::InvalidInput(_))));
    }

    #[test]
    fn rejects_non_finite_temperature() {
        let mut ps = C3Model::new(C3Parameters::default()).unwrap();
        ps.set_temperature(ThermodynamicTemperature::new::<kelvin>(f64::NAN));
        assert!(ps.temperature_dependence(&Environment::default()).is_err());
    }
}
