//! Leaf biochemistry for the canopy leaf model.
//!
//! The leaf model treats biochemistry as a collaborator behind the
//! [`Biochemistry`] trait: it sets absorbed light and temperature, asks for
//! the temperature dependence to be refreshed, and evaluates net
//! assimilation at a given leaf CO2 conductance.
//!
//! [`C3Model`] is the reference implementation, a Farquhar-type model with
//! Rubisco- and light-limited rates.

mod biochemistry;
mod c3;
mod error;

pub use biochemistry::{Biochemistry, Mode};
pub use c3::{Arrhenius, C3Model, C3Parameters, PeakedArrhenius, Rates};
pub use error::PhotosynthesisError;
