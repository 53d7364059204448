//! Scalar equation solvers.
//!
//! An equation here is a residual function `f(x)` whose root is sought.
//! Residual functions may carry state (`FnMut`) so callers can cache
//! intermediate results while the solver searches.

pub mod bisection;
