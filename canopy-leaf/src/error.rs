use std::error::Error as StdError;

use canopy_hydraulics::HydraulicsError;
use canopy_physics::PhysicsError;
use thiserror::Error;

/// Errors that can occur while updating a leaf layer.
///
/// Collaborator errors pass through unchanged. The only context added is the
/// light-bin index when a per-bin loop fails.
#[derive(Debug, Error)]
pub enum LeafError {
    /// A driver, parameter, or per-bin value is non-finite or non-physical.
    #[error("invalid {field} = {value}: {reason}")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The flux capacity was requested before the state was updated for the
    /// current temperature and upstream pressure.
    #[error("leaf state is stale, update temperature and pressure state first")]
    StaleDrivers,

    #[error(transparent)]
    Hydraulics(#[from] HydraulicsError),

    #[error("biochemistry failed: {0}")]
    Biochemistry(#[source] Box<dyn StdError + Send + Sync + 'static>),

    #[error(transparent)]
    Physics(#[from] PhysicsError),

    /// A per-bin evaluation failed.
    #[error("light bin {index}: {source}")]
    AtBin {
        index: usize,
        source: Box<LeafError>,
    },
}

impl LeafError {
    pub(crate) fn biochemistry<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Biochemistry(Box::new(error))
    }

    pub(crate) fn at_bin(self, index: usize) -> Self {
        Self::AtBin {
            index,
            source: Box::new(self),
        }
    }
}

/// Returns `value` if it is finite and positive.
pub(crate) fn positive(field: &'static str, value: f64) -> Result<f64, LeafError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(LeafError::InvalidInput {
            field,
            value,
            reason: "must be finite and positive",
        })
    }
}

/// Returns `value` if it is finite and non-negative.
pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<f64, LeafError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(LeafError::InvalidInput {
            field,
            value,
            reason: "must be finite and non-negative",
        })
    }
}
