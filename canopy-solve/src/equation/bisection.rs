mod bracket;
mod config;
mod error;
mod solution;

pub use bracket::{Bracket, Sign};
pub use config::Config;
pub use error::Error;
pub use solution::{Solution, Status};

use bracket::Bounds;

/// Finds a root of `residual` inside `bracket` using the bisection method.
///
/// The endpoints may be given in either order.
/// An endpoint whose residual already satisfies `residual_tol` is returned
/// immediately without iterating.
///
/// When `max_iters` is reached the best midpoint seen so far is returned
/// with [`Status::MaxIters`]; deciding whether that is acceptable is left
/// to the caller.
///
/// # Errors
///
/// Returns an error if the config is invalid, the bracket is non-finite or
/// has zero width, the endpoint residuals share a sign, or any residual
/// evaluates to a non-finite value.
pub fn solve<F>(mut residual: F, bracket: [f64; 2], config: &Config) -> Result<Solution, Error>
where
    F: FnMut(f64) -> f64,
{
    config
        .validate()
        .map_err(|reason| Error::InvalidConfig { reason })?;

    let bounds = Bounds::new(bracket)?;
    let [left, right] = bounds.as_array();

    let left_residual = finite_residual(&mut residual, left)?;
    if left_residual.abs() <= config.residual_tol {
        return Ok(Solution::new(Status::Converged, left, left_residual, 0));
    }

    let right_residual = finite_residual(&mut residual, right)?;
    if right_residual.abs() <= config.residual_tol {
        return Ok(Solution::new(Status::Converged, right, right_residual, 0));
    }

    let mut bracket = Bracket::new(bounds, Sign::of(left_residual), Sign::of(right_residual))
        .ok_or(Error::NoBracket {
            left,
            right,
            left_residual,
            right_residual,
        })?;

    let mut best = if left_residual.abs() <= right_residual.abs() {
        (left, left_residual)
    } else {
        (right, right_residual)
    };

    for iter in 1..=config.max_iters {
        let mid = bracket.midpoint();
        let mid_residual = finite_residual(&mut residual, mid)?;

        if bracket.is_x_converged(config.x_abs_tol, config.x_rel_tol)
            || mid_residual.abs() <= config.residual_tol
        {
            return Ok(Solution::new(Status::Converged, mid, mid_residual, iter));
        }

        if mid_residual.abs() < best.1.abs() {
            best = (mid, mid_residual);
        }

        bracket.shrink(mid, Sign::of(mid_residual));
    }

    Ok(Solution::new(
        Status::MaxIters,
        best.0,
        best.1,
        config.max_iters,
    ))
}

/// Evaluates the residual and rejects non-finite values.
fn finite_residual<F>(residual: &mut F, x: f64) -> Result<f64, Error>
where
    F: FnMut(f64) -> f64,
{
    let value = residual(x);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonFiniteResidual { x, residual: value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn finds_square_root() {
        let solution =
            solve(|x| x * x - 9.0, [0.0, 10.0], &Config::default()).expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.x, 3.0, epsilon = 1e-10);
    }

    #[test]
    fn finds_root_of_decreasing_function() {
        // Same shape as a pressure drop that falls with increasing flow.
        let solution =
            solve(|x| 2.0 - x * x * x, [0.0, 5.0], &Config::default()).expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.x, 2.0_f64.cbrt(), epsilon = 1e-10);
    }

    #[test]
    fn stateful_residual_counts_calls() {
        let mut calls = 0usize;
        let solution = solve(
            |x| {
                calls += 1;
                x - 1.0
            },
            [0.0, 4.0],
            &Config::default(),
        )
        .expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert!(calls >= 3);
    }

    #[test]
    fn normalizes_reversed_bracket() {
        let solution = solve(|x| x * x - 36.0, [10.0, 0.0], &Config::default())
            .expect("should solve with reversed bracket");

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.x, 6.0, epsilon = 1e-10);
    }

    #[test]
    fn returns_endpoint_root_without_iterating() {
        let solution = solve(|x| x, [0.0, 3.0], &Config::default()).expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert_eq!(solution.iters, 0);
        assert_relative_eq!(solution.x, 0.0);
    }

    #[test]
    fn errors_on_zero_width_bracket() {
        let result = solve(|x| x * x - 25.0, [5.0, 5.0], &Config::default());
        assert!(matches!(result, Err(Error::ZeroWidthBracket { .. })));
    }

    #[test]
    fn errors_on_non_finite_bracket() {
        let result = solve(|x| x, [f64::NAN, 10.0], &Config::default());
        assert!(matches!(result, Err(Error::NonFiniteBracket { .. })));

        let result = solve(|x| x, [0.0, f64::INFINITY], &Config::default());
        assert!(matches!(result, Err(Error::NonFiniteBracket { .. })));
    }

    #[test]
    fn errors_on_no_bracket() {
        let result = solve(|x| x * x - 9.0, [5.0, 10.0], &Config::default());
        assert!(matches!(result, Err(Error::NoBracket { .. })));
    }

    #[test]
    fn errors_on_non_finite_residual() {
        let result = solve(|x| 1.0 / (x - 1.0), [1.0, 2.0], &Config::default());
        assert!(matches!(result, Err(Error::NonFiniteResidual { .. })));
    }

    #[test]
    fn errors_on_invalid_config() {
        let config = Config {
            x_abs_tol: -1.0,
            ..Config::default()
        };
        let result = solve(|x| x * x - 4.0, [0.0, 10.0], &config);
        assert!(matches!(result, Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn zero_iters_returns_best_endpoint() {
        let config = Config {
            max_iters: 0,
            ..Config::default()
        };
        let solution =
            solve(|x| x * x - 9.0, [2.0, 10.0], &config).expect("should return best endpoint");

        assert_eq!(solution.status, Status::MaxIters);
        assert_eq!(solution.iters, 0);
        // x=2 gives |4-9|=5, x=10 gives |100-9|=91.
        assert_relative_eq!(solution.x, 2.0);
    }
}
