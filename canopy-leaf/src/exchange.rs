use canopy_photosynthesis::{Biochemistry, Mode};
use canopy_physics::Environment;
use uom::si::ratio::ratio;

use crate::{LeafError, LeafLayer, error::non_negative};

/// Evaluates gas exchange of one light bin at stomatal conductance `g_sw`.
///
/// Writes `g_sw`, the leaf CO2 conductance `g_lc`, net assimilation `a_net`,
/// and transpiration `e = g_tw (p_sat − p_H2O) / P_atm` to the bin, where
/// `g_tw` is the stomatal and boundary-layer water conductance in series.
/// The biochemistry uses whatever absorbed PAR is currently set on it.
///
/// # Errors
///
/// Returns [`LeafError::InvalidInput`] if the bin does not exist, one of its
/// drivers is invalid, or `g_sw` is negative or non-finite, and propagates
/// biochemistry errors.
pub fn leaf_gas_exchange<B: Biochemistry>(
    leaf: &mut LeafLayer<B>,
    index: usize,
    g_sw: f64,
    env: &Environment,
) -> Result<(), LeafError> {
    non_negative("g_sw", g_sw)?;
    let bin = *leaf.bin(index)?;
    bin.validate()?;

    let g_lc = bin.co2_conductance(g_sw);
    let a_net = leaf
        .ps
        .leaf_photosynthesis(env, Mode::LeafConductance(g_lc))
        .map_err(LeafError::biochemistry)?;

    let vpd = env.vapor_pressure_deficit(leaf.p_sat);
    let e = bin.water_conductance(g_sw) * (vpd / env.p_atm).get::<ratio>();

    let bin = &mut leaf.bins[index];
    bin.g_sw = g_sw;
    bin.g_lc = g_lc;
    bin.a_net = a_net;
    bin.e = e;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{f64::Pressure, pressure::pascal};

    use crate::{LeafConfig, test_utils::RecordingBiochemistry};

    fn leaf() -> LeafLayer<RecordingBiochemistry> {
        LeafLayer::new(&LeafConfig::default(), RecordingBiochemistry::default()).unwrap()
    }

    #[test]
    fn writes_fluxes_to_the_bin() {
        let mut leaf = leaf();
        leaf.p_sat = Pressure::new::<pascal>(3500.0);
        leaf.ps.par = 500.0;
        let env = Environment {
            p_atm: Pressure::new::<pascal>(100_000.0),
            ..Environment::default()
        };

        leaf_gas_exchange(&mut leaf, 0, 0.6, &env).unwrap();

        let bin = leaf.bins[0];
        assert_relative_eq!(bin.g_sw, 0.6);
        assert_relative_eq!(bin.g_lc, bin.co2_conductance(0.6));
        assert_relative_eq!(bin.a_net, 500.0 * bin.g_lc / (bin.g_lc + 0.1) / 50.0);
        // g_tw = 0.5 at 2 kPa deficit in 100 kPa air.
        assert_relative_eq!(bin.e, 0.01, epsilon = 1e-12);
        assert_eq!(leaf.ps.evaluations, vec![(500.0, bin.g_lc)]);
    }

    #[test]
    fn closed_stomata_stop_transpiration() {
        let mut leaf = leaf();
        leaf_gas_exchange(&mut leaf, 0, 0.0, &Environment::default()).unwrap();
        assert_relative_eq!(leaf.bins[0].e, 0.0);
        assert_relative_eq!(leaf.bins[0].g_lc, 0.0);
    }

    #[test]
    fn rejects_missing_bin() {
        let mut leaf = leaf();
        assert!(matches!(
            leaf_gas_exchange(&mut leaf, 3, 0.1, &Environment::default()),
            Err(LeafError::InvalidInput { field: "bin index", .. })
        ));
    }

    #[test]
    fn rejects_invalid_bin_conductances() {
        let mut leaf = leaf();
        let g_sw = leaf.bins[0].g_sw;
        leaf.bins[0].g_m = -0.5;
        assert!(matches!(
            leaf_gas_exchange(&mut leaf, 0, 0.1, &Environment::default()),
            Err(LeafError::InvalidInput { field: "g_m", .. })
        ));
        assert!(leaf.ps.evaluations.is_empty());
        assert_relative_eq!(leaf.bins[0].g_sw, g_sw);
    }

    #[test]
    fn rejects_negative_conductance() {
        let mut leaf = leaf();
        assert!(leaf_gas_exchange(&mut leaf, 0, -0.1, &Environment::default()).is_err());
        assert!(leaf.ps.evaluations.is_empty());
    }
}
