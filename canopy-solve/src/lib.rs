//! Numerical solvers for the canopy leaf model.

pub mod equation;
