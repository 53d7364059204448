use canopy_physics::{
    constants::{DIFFUSIVITY_RATIO_H2O_CO2, T_REFERENCE, molar_mass_water},
    water::{latent_heat_vapor, saturation_vapor_pressure},
};
use uom::si::{
    area::square_meter,
    f64::{Area, MolarEnergy, Pressure, ThermodynamicTemperature},
    pressure::megapascal,
    thermodynamic_temperature::kelvin,
};

use crate::{BinConfig, LeafConfig, LeafError};

/// State of one absorbed-radiation class of a leaf layer.
///
/// Conductances are in mol m⁻² s⁻¹; PAR and assimilation in μmol m⁻² s⁻¹;
/// transpiration in mol m⁻² s⁻¹.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightBin {
    /// Absorbed photosynthetically active radiation.
    pub apar: f64,
    /// Boundary-layer conductance to CO2.
    pub g_bc: f64,
    /// Boundary-layer conductance to water vapor.
    pub g_bw: f64,
    /// Mesophyll conductance to CO2.
    pub g_m: f64,
    /// Realized stomatal conductance to water vapor.
    pub g_sw: f64,
    /// Maximum net assimilation under current hydraulic limits.
    pub a_max: f64,
    /// Net assimilation at `g_sw`.
    pub a_net: f64,
    /// Total leaf conductance to CO2 at `g_sw`.
    pub g_lc: f64,
    /// Transpiration at `g_sw`.
    pub e: f64,
}

impl LightBin {
    fn new(config: &BinConfig, g_sw: f64) -> Self {
        Self {
            apar: config.apar,
            g_bc: config.g_bc,
            g_bw: config.g_bw,
            g_m: config.g_m,
            g_sw,
            a_max: 0.0,
            a_net: 0.0,
            g_lc: 0.0,
            e: 0.0,
        }
    }

    /// Boundary-layer, stomatal, and mesophyll CO2 conductances in series.
    #[must_use]
    pub fn co2_conductance(&self, g_sw: f64) -> f64 {
        1.0 / (1.0 / self.g_bc + DIFFUSIVITY_RATIO_H2O_CO2 / g_sw + 1.0 / self.g_m)
    }

    /// Stomatal and boundary-layer water conductances in series.
    #[must_use]
    pub fn water_conductance(&self, g_sw: f64) -> f64 {
        1.0 / (1.0 / g_sw + 1.0 / self.g_bw)
    }

    pub(crate) fn validate(&self) -> Result<(), LeafError> {
        BinConfig {
            apar: self.apar,
            g_bc: self.g_bc,
            g_bw: self.g_bw,
            g_m: self.g_m,
        }
        .validate()
    }
}

/// Thermal, hydraulic, and gas-exchange state of one canopy leaf layer.
///
/// The surrounding driver writes `temperature`, `p_ups`, and the per-bin
/// drivers, then calls the update operations. `t_old` and `p_old` hold the
/// drivers of the last state update; `None` means the layer has never been
/// updated.
#[derive(Debug, Clone)]
pub struct LeafLayer<B> {
    pub temperature: ThermodynamicTemperature,
    pub t_old: Option<ThermodynamicTemperature>,

    /// Water potential upstream of the leaf.
    pub p_ups: Pressure,
    pub p_old: Option<Pressure>,

    /// Stomatal conductance bounds to water (mol m⁻² s⁻¹).
    pub g_min25: f64,
    pub g_max25: f64,
    pub g_min: f64,
    pub g_max: f64,

    pub bins: Vec<LightBin>,

    /// Latent heat of vaporization per mole of water.
    pub lv: MolarEnergy,

    /// Saturation vapor pressure at leaf temperature.
    pub p_sat: Pressure,

    /// Critical transpiration flux per unit leaf area (mol m⁻² s⁻¹).
    pub ec: f64,

    /// Latest maximum conductance of the hydraulic system.
    pub kr_max: f64,

    pub leaf_area: Area,

    /// Biochemistry of the leaf.
    pub ps: B,
}

impl<B> LeafLayer<B> {
    /// Creates a layer at 25 °C and zero upstream pressure.
    ///
    /// Stomatal conductance starts at the lower bound in every bin.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: &LeafConfig, ps: B) -> Result<Self, LeafError> {
        config.validate()?;
        let temperature = ThermodynamicTemperature::new::<kelvin>(T_REFERENCE);

        Ok(Self {
            temperature,
            t_old: None,
            p_ups: Pressure::new::<megapascal>(0.0),
            p_old: None,
            g_min25: config.g_min25,
            g_max25: config.g_max25,
            g_min: config.g_min25,
            g_max: config.g_max25,
            bins: config
                .bins
                .iter()
                .map(|bin| LightBin::new(bin, config.g_min25))
                .collect(),
            lv: latent_heat_vapor(temperature)? * molar_mass_water(),
            p_sat: saturation_vapor_pressure(temperature)?,
            ec: 0.0,
            kr_max: 0.0,
            leaf_area: Area::new::<square_meter>(config.leaf_area),
            ps,
        })
    }

    /// Forgets the drivers of the last update so the next update
    /// recomputes everything.
    ///
    /// Hydraulic history lives in the hydraulic system and is reset there.
    pub fn reset(&mut self) {
        self.t_old = None;
        self.p_old = None;
        self.ec = 0.0;
        self.kr_max = 0.0;
    }

    /// Returns true if the state reflects the current temperature and
    /// upstream pressure.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.t_old == Some(self.temperature) && self.p_old == Some(self.p_ups)
    }

    pub(crate) fn bin(&self, index: usize) -> Result<&LightBin, LeafError> {
        self.bins.get(index).ok_or(LeafError::InvalidInput {
            field: "bin index",
            value: index as f64,
            reason: "out of range",
        })
    }
}
