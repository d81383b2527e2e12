//! Property tests for the path simulator and pricer entry points.
//!
//! - Reproducibility for a fixed seed
//! - Antithetic pairing of noise and paths
//! - Path shape and initial column
//! - Eager validation of invalid inputs

use approx::assert_relative_eq;
use asian_pricing::mc::{
    price_asian_call, simulate_brownian_paths, simulate_brownian_paths_par, AsianCallParams,
    BrownianParams, McError, SimulationConfig,
};
use asian_pricing::rng::PricerRng;
use proptest::prelude::*;

fn log_process() -> BrownianParams {
    AsianCallParams::default().log_price_process(10)
}

#[test]
fn test_simulation_is_reproducible() {
    let params = log_process();
    let a = simulate_brownian_paths(&params, 300, true, &mut PricerRng::from_seed(9)).unwrap();
    let b = simulate_brownian_paths(&params, 300, true, &mut PricerRng::from_seed(9)).unwrap();
    let c = simulate_brownian_paths(&params, 300, true, &mut PricerRng::from_seed(10)).unwrap();

    assert_eq!(a, b);
    assert_ne!(a.paths, c.paths);
}

#[test]
fn test_time_grid_matches_process() {
    let params = log_process();
    let sim = simulate_brownian_paths(&params, 1, false, &mut PricerRng::from_seed(0)).unwrap();

    assert_eq!(sim.time_grid.points().len(), 11);
    assert_eq!(sim.time_grid.points()[0], 0.0);
    assert_eq!(sim.time_grid.horizon(), 0.25);
    assert_relative_eq!(sim.time_grid.dt(), 0.025, epsilon = 1e-15);
}

#[test]
fn test_invalid_pricer_inputs() {
    let config = SimulationConfig::default();
    let mut rng = PricerRng::from_seed(0);

    let cases = [
        AsianCallParams { spot: 0.0, ..Default::default() },
        AsianCallParams { strike: -1.0, ..Default::default() },
        AsianCallParams { maturity: -0.25, ..Default::default() },
        AsianCallParams { rate: f64::NAN, ..Default::default() },
    ];
    for params in cases {
        assert!(matches!(
            price_asian_call(&params, &config, &mut rng),
            Err(McError::InvalidParameter { .. })
        ));
    }

    let flat = AsianCallParams { volatility: -0.3, ..Default::default() };
    assert!(matches!(
        price_asian_call(&flat, &config, &mut rng),
        Err(McError::DegenerateVolatility { .. })
    ));

    // No draws were consumed by the rejected calls.
    assert_eq!(rng.gen_normal(), PricerRng::from_seed(0).gen_normal());
}

#[test]
fn test_invalid_config_is_rejected_at_build() {
    assert!(matches!(
        SimulationConfig::builder().n_paths(0).build(),
        Err(McError::InvalidPathCount(0))
    ));
    assert!(matches!(
        SimulationConfig::builder().n_steps(0).build(),
        Err(McError::InvalidStepCount(0))
    ));
    assert!(SimulationConfig::builder().confidence_level(1.0).build().is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(40))]

    #[test]
    fn prop_antithetic_pairing(seed in any::<u64>(), n_paths in 1..64usize, n_steps in 1..40usize) {
        let params = BrownianParams { n_steps, ..log_process() };
        let sim = simulate_brownian_paths(&params, n_paths, true, &mut PricerRng::from_seed(seed)).unwrap();

        prop_assert_eq!(sim.noise.rows(), 2 * n_paths);
        for i in 0..n_paths {
            let (first, second) = (sim.noise.row(i), sim.noise.row(i + n_paths));
            for (z, m) in first.iter().zip(second) {
                prop_assert_eq!(*m, -*z);
            }
        }
    }

    #[test]
    fn prop_path_shape(
        seed in any::<u64>(),
        n_paths in 1..64usize,
        n_steps in 1..40usize,
        antithetic in any::<bool>(),
    ) {
        let params = BrownianParams { n_steps, ..log_process() };
        let sim = simulate_brownian_paths(&params, n_paths, antithetic, &mut PricerRng::from_seed(seed)).unwrap();

        let rows = if antithetic { 2 * n_paths } else { n_paths };
        prop_assert_eq!(sim.paths.rows(), rows);
        prop_assert_eq!(sim.paths.cols(), n_steps + 1);
        for row in sim.paths.iter_rows() {
            prop_assert_eq!(row[0], params.initial);
        }
    }

    #[test]
    fn prop_parallel_matches_sequential(seed in any::<u64>(), n_paths in 1..200usize) {
        let params = log_process();
        let seq = simulate_brownian_paths(&params, n_paths, true, &mut PricerRng::from_seed(seed)).unwrap();
        let par = simulate_brownian_paths_par(&params, n_paths, true, &mut PricerRng::from_seed(seed)).unwrap();
        prop_assert_eq!(seq, par);
    }
}
