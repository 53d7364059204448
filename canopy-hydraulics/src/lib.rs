//! Xylem hydraulics for the canopy leaf model.
//!
//! A hydraulic system carries water from an upstream pressure to the leaf
//! through one or more [`Segment`]s. Each segment loses conductance as its
//! pressure falls, following a [`WeibullCurve`], and remembers the most
//! negative pressure it has seen so that loss is not recovered when the
//! pressure rises again.
//!
//! The central operation is the critical flow: the largest transpiration
//! flux the system can carry before the leaf end reaches the pressure at
//! which conductance collapses. Two systems provide it:
//!
//! - [`LeafHydraulics`]: a single leaf, fluxes per unit leaf area.
//! - [`WholePlantHydraulics`]: root, stem, and leaf in series, whole-plant
//!   fluxes.
//!
//! Both implement [`HydraulicSystem`], the seam the leaf model depends on.

mod critical;
mod error;
mod history;
mod leaf;
mod plant;
mod segment;
mod system;
mod vulnerability;

pub use critical::CriticalFlowConfig;
pub use error::HydraulicsError;
pub use history::ConductanceHistory;
pub use leaf::{LeafHydraulics, LeafHydraulicsConfig};
pub use plant::{WholePlantConfig, WholePlantHydraulics};
pub use segment::{Segment, SegmentConfig};
pub use system::HydraulicSystem;
pub use vulnerability::WeibullCurve;
