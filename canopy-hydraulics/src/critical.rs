#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

use canopy_solve::equation::bisection;
use tracing::{debug, warn};

use crate::HydraulicsError;

/// First trial flux when the caller has no previous solution to seed from.
const DEFAULT_SEED: f64 = 1e-3;

/// Configuration for the critical-flow search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-derive", serde(default))]
pub struct CriticalFlowConfig {
    /// Tolerances and iteration limit of the bisection stage.
    pub bisection: bisection::Config,

    /// Maximum number of times the upper bracket is doubled.
    pub max_expansions: usize,

    /// Relative conductance that defines the critical pressure.
    pub k_threshold: f64,
}

impl Default for CriticalFlowConfig {
    fn default() -> Self {
        Self {
            bisection: bisection::Config {
                max_iters: 200,
                x_abs_tol: 1e-12,
                x_rel_tol: 1e-9,
                residual_tol: 1e-9,
            },
            max_expansions: 64,
            k_threshold: 1e-3,
        }
    }
}

impl CriticalFlowConfig {
    /// Validates the search configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HydraulicsError::InvalidInput`] if the bisection config is
    /// invalid or `k_threshold` is outside `(0, 1)`.
    pub fn validate(&self) -> Result<(), HydraulicsError> {
        self.bisection
            .validate()
            .map_err(|reason| HydraulicsError::InvalidInput(reason.into()))?;
        if !(self.k_threshold > 0.0 && self.k_threshold < 1.0) {
            return Err(HydraulicsError::InvalidInput(format!(
                "k_threshold must lie in (0, 1), got {}",
                self.k_threshold
            )));
        }
        Ok(())
    }
}

/// Finds the largest flow whose pressure margin is non-negative.
///
/// `margin(flow)` is the downstream pressure minus the critical pressure
/// (MPa). It must not increase with flow. The search brackets the root
/// starting from `seed`, doubling the upper bound as needed, then bisects.
///
/// Returns zero when the margin is already non-positive at zero flow.
pub(crate) fn solve_critical_flow<F>(
    mut margin: F,
    seed: f64,
    config: &CriticalFlowConfig,
) -> Result<f64, HydraulicsError>
where
    F: FnMut(f64) -> f64,
{
    if !seed.is_finite() || seed < 0.0 {
        return Err(HydraulicsError::InvalidInput(format!(
            "critical flow seed must be finite and non-negative, got {seed}"
        )));
    }

    let mut margin = move |flow: f64| margin(flow).max(f64::MIN);

    let at_zero = margin(0.0);
    if at_zero <= 0.0 {
        warn!(margin = at_zero, "upstream pressure is past critical, flow is zero");
        return Ok(0.0);
    }

    let mut upper = if seed > 0.0 { seed } else { DEFAULT_SEED };
    let mut lower = 0.0;
    let mut expansions = 0;
    while margin(upper) > 0.0 {
        if expansions == config.max_expansions {
            return Err(HydraulicsError::NonConvergence {
                seed,
                reason: "bracket expansion limit reached",
            });
        }
        lower = upper;
        upper *= 2.0;
        expansions += 1;
    }

    let solution = bisection::solve(&mut margin, [lower, upper], &config.bisection)?;
    if !solution.is_converged() {
        return Err(HydraulicsError::NonConvergence {
            seed,
            reason: "bisection iteration limit reached",
        });
    }

    debug!(
        seed,
        lower,
        upper,
        iters = solution.iters,
        flow = solution.x,
        "solved critical flow"
    );
    Ok(solution.x)
}
