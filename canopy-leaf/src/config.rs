#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

use crate::{
    LeafError,
    error::{non_negative, positive},
};

/// Drivers of one light bin.
///
/// Conductances are in mol m⁻² s⁻¹, absorbed PAR in μmol m⁻² s⁻¹.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-derive", serde(default))]
pub struct BinConfig {
    pub apar: f64,
    pub g_bc: f64,
    pub g_bw: f64,
    pub g_m: f64,
}

impl Default for BinConfig {
    fn default() -> Self {
        Self {
            apar: 1000.0,
            g_bc: 2.0,
            g_bw: 3.0,
            g_m: 0.5,
        }
    }
}

impl BinConfig {
    /// Validates the bin drivers.
    ///
    /// # Errors
    ///
    /// Returns [`LeafError::InvalidInput`] for the first invalid value.
    pub fn validate(&self) -> Result<(), LeafError> {
        non_negative("apar", self.apar)?;
        positive("g_bc", self.g_bc)?;
        positive("g_bw", self.g_bw)?;
        positive("g_m", self.g_m)?;
        Ok(())
    }
}

/// Configuration of a leaf layer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-derive", serde(default))]
pub struct LeafConfig {
    /// Minimum stomatal conductance to water at 25 °C (mol m⁻² s⁻¹).
    pub g_min25: f64,

    /// Maximum stomatal conductance to water at 25 °C (mol m⁻² s⁻¹).
    pub g_max25: f64,

    /// Leaf area (m²), used when the hydraulic system is a whole plant.
    pub leaf_area: f64,

    /// Light bins, one per absorbed-radiation class.
    pub bins: Vec<BinConfig>,
}

impl Default for LeafConfig {
    fn default() -> Self {
        Self {
            g_min25: 0.01,
            g_max25: 0.8,
            leaf_area: 1.0,
            bins: vec![BinConfig::default()],
        }
    }
}

impl LeafConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LeafError::InvalidInput`] for the first invalid value, or
    /// [`LeafError::AtBin`] wrapping it when a light bin is invalid.
    pub fn validate(&self) -> Result<(), LeafError> {
        non_negative("g_min25", self.g_min25)?;
        positive("g_max25", self.g_max25)?;
        if self.g_min25 > self.g_max25 {
            return Err(LeafError::InvalidInput {
                field: "g_min25",
                value: self.g_min25,
                reason: "must not exceed g_max25",
            });
        }
        positive("leaf_area", self.leaf_area)?;
        if self.bins.is_empty() {
            return Err(LeafError::InvalidInput {
                field: "bins",
                value: 0.0,
                reason: "at least one light bin is required",
            });
        }
        for (index, bin) in self.bins.iter().enumerate() {
            bin.validate().map_err(|error| error.at_bin(index))?;
        }
        Ok(())
    }
}
