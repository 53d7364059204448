//! Coupled thermal, hydraulic, and gas-exchange state of a canopy leaf layer.
//!
//! A [`LeafLayer`] is updated in place by a driver that owns the layer, its
//! hydraulic system, and the environment:
//!
//! 1. [`update_leaf_tp`] brings temperature-dependent state and the critical
//!    transpiration flux up to date, doing nothing if the drivers have not
//!    changed since the last call.
//! 2. [`update_leaf_ak`] turns the critical flux into the maximum net
//!    assimilation of each light bin.
//! 3. After an external optimizer sets stomatal conductances,
//!    [`gsw_control_all`] (or [`gsw_control`] for one bin) enforces the
//!    physiological bounds.
//!
//! Hydraulics and biochemistry are collaborators behind the
//! [`HydraulicSystem`] and [`Biochemistry`] traits.
//!
//! [`HydraulicSystem`]: canopy_hydraulics::HydraulicSystem
//! [`Biochemistry`]: canopy_photosynthesis::Biochemistry

mod capacity;
mod config;
mod control;
mod error;
mod exchange;
mod layer;
mod update;

#[cfg(test)]
mod test_utils;

pub use capacity::{critical_conductance, max_stomatal_conductance, update_leaf_ak};
pub use config::{BinConfig, LeafConfig};
pub use control::{Clamp, gsw_control, gsw_control_all};
pub use error::LeafError;
pub use exchange::leaf_gas_exchange;
pub use layer::{LeafLayer, LightBin};
pub use update::{Refresh, update_leaf_tp};
