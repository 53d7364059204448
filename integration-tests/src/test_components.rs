//! A leaf layer wired to real collaborators, configured from TOML.

use std::error::Error;

use canopy_hydraulics::{
    HydraulicSystem, HydraulicsError, LeafHydraulics, LeafHydraulicsConfig, WholePlantConfig,
    WholePlantHydraulics,
};
use canopy_leaf::{LeafConfig, LeafError, LeafLayer, Refresh, update_leaf_ak, update_leaf_tp};
use canopy_photosynthesis::{C3Model, C3Parameters};
use canopy_physics::Environment;
use serde::{Deserialize, Serialize};
use uom::si::{
    f64::{Pressure, ThermodynamicTemperature},
    pressure::megapascal,
    thermodynamic_temperature::degree_celsius,
};

/// Configuration of a stand: one leaf layer and its water supply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandConfig {
    pub environment: Environment,
    pub leaf: LeafConfig,
    pub photosynthesis: C3Parameters,
    pub hydraulics: Hydraulics,
}

impl Default for StandConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            leaf: LeafConfig::default(),
            photosynthesis: C3Parameters::default(),
            hydraulics: Hydraulics::Leaf(LeafHydraulicsConfig::default()),
        }
    }
}

/// Which hydraulic system supplies the leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Hydraulics {
    Leaf(LeafHydraulicsConfig),
    WholePlant(WholePlantConfig),
}

impl StandConfig {
    /// Parses a stand from TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not describe a stand.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Builds the leaf layer with a C3 model.
    ///
    /// # Errors
    ///
    /// Returns an error if the leaf or photosynthesis parameters are invalid.
    pub fn leaf_layer(&self) -> Result<LeafLayer<C3Model>, Box<dyn Error>> {
        let ps = C3Model::new(self.photosynthesis)?;
        Ok(LeafLayer::new(&self.leaf, ps)?)
    }

    /// Builds the hydraulic system.
    ///
    /// # Errors
    ///
    /// Returns an error if the hydraulic configuration is invalid.
    pub fn hydraulic_system(&self) -> Result<Box<dyn HydraulicSystem>, HydraulicsError> {
        let hs: Box<dyn HydraulicSystem> = match &self.hydraulics {
            Hydraulics::Leaf(config) => Box::new(LeafHydraulics::new(config)?),
            Hydraulics::WholePlant(config) => Box::new(WholePlantHydraulics::new(config)?),
        };
        Ok(hs)
    }
}

/// Sets the leaf drivers and runs the state and flux-capacity updates.
///
/// # Errors
///
/// Propagates errors from either update.
pub fn step<H>(
    leaf: &mut LeafLayer<C3Model>,
    hs: &mut H,
    env: &Environment,
    celsius: f64,
    p_ups_mpa: f64,
) -> Result<Refresh, LeafError>
where
    H: HydraulicSystem + ?Sized,
{
    leaf.temperature = ThermodynamicTemperature::new::<degree_celsius>(celsius);
    leaf.p_ups = Pressure::new::<megapascal>(p_ups_mpa);
    let refresh = update_leaf_tp(leaf, &mut *hs, env)?;
    update_leaf_ak(leaf, &*hs, env)?;
    Ok(refresh)
}
