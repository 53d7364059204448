use canopy_physics::PhysicsError;
use canopy_solve::equation::bisection;
use thiserror::Error;

/// Errors that can occur while evaluating a hydraulic system.
///
/// Reaching the critical pressure is a physiological state, not an error:
/// the critical flow is then zero.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HydraulicsError {
    /// A configuration value or driver is non-finite or non-physical.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The critical-flow search did not converge from the given seed.
    ///
    /// A retry needs a different seed, which only the caller can choose.
    #[error("critical flow did not converge from seed {seed}: {reason}")]
    NonConvergence { seed: f64, reason: &'static str },

    /// The root finder rejected the problem.
    #[error(transparent)]
    Solver(#[from] bisection::Error),

    /// A temperature-dependent water property could not be evaluated.
    #[error(transparent)]
    Physics(#[from] PhysicsError),
}

impl HydraulicsError {
    /// Creates an invalid input error for a value that must be finite and positive.
    pub(crate) fn not_positive(name: &str, value: f64) -> Self {
        Self::InvalidInput(format!("{name} must be finite and positive, got {value}"))
    }
}
