//! Monte Carlo pricing of the arithmetic Asian call.
//!
//! # Overview
//!
//! [`price_asian_call`] runs the full estimator:
//! 1. Log-price process `X0 = ln S0`, drift `r - δ - ½σ²`
//! 2. Path simulation (via [`simulate_brownian_paths`])
//! 3. Payoff on `exp(X)` averaged over `t_1..t_N`, discounted by `exp(-rT)`
//! 4. Antithetic pair averaging (row `i` with row `i + n_paths`)
//! 5. Sample mean, sample standard deviation and a normal-approximation
//!    confidence interval
//!
//! # Reduction Order
//!
//! Observations are reduced in fixed chunks of [`REDUCTION_CHUNK`] and the
//! chunk accumulators are merged left to right. The sequential and rayon
//! paths share this order, so they return bit-identical estimates.

use asian_core::math::statistics::{ConfidenceInterval, RunningStats};
use asian_core::types::StatisticsError;
use rayon::prelude::*;
use tracing::{debug, warn};

use super::config::SimulationConfig;
use super::error::McError;
use super::params::AsianCallParams;
use super::paths::{simulate_brownian_paths, simulate_brownian_paths_par, BrownianPaths};
use super::payoff::asian_call_payoff_from_log_path;
use crate::rng::PricerRng;

/// Number of observations folded into each partial accumulator.
pub const REDUCTION_CHUNK: usize = 4096;

/// Minimum number of observations for a sample standard deviation.
const MIN_OBSERVATIONS: usize = 2;

/// Monte Carlo price estimate with its confidence interval.
///
/// # Examples
///
/// ```rust
/// use asian_pricing::mc::{price_asian_call, AsianCallParams, SimulationConfig};
/// use asian_pricing::rng::PricerRng;
///
/// let config = SimulationConfig::builder().n_paths(2_000).build().unwrap();
/// let mut rng = PricerRng::from_seed(42);
///
/// let estimate = price_asian_call(&AsianCallParams::default(), &config, &mut rng).unwrap();
/// let (price, lower, upper) = estimate.as_tuple();
///
/// assert!(lower <= price && price <= upper);
/// assert_eq!(estimate.n_samples, 2_000);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceEstimate {
    /// Discounted sample mean.
    pub price: f64,
    /// Lower confidence bound.
    pub lower: f64,
    /// Upper confidence bound.
    pub upper: f64,
    /// Sample standard deviation of the observations (ddof = 1).
    pub std_dev: f64,
    /// Number of observations; antithetic pairs count once.
    pub n_samples: usize,
    /// Whether the observations are antithetic pair averages.
    pub antithetic: bool,
    /// Two-sided level of the interval.
    pub confidence_level: f64,
}

impl PriceEstimate {
    /// Distance from the price to either bound.
    #[inline]
    pub fn half_width(&self) -> f64 {
        0.5 * (self.upper - self.lower)
    }

    /// Interval width `upper - lower`.
    #[inline]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Standard error of the mean, `s / √n`.
    #[inline]
    pub fn std_error(&self) -> f64 {
        self.std_dev / (self.n_samples as f64).sqrt()
    }

    /// Returns `true` if `value` lies within `[lower, upper]`.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// `(price, lower, upper)`.
    #[inline]
    pub fn as_tuple(&self) -> (f64, f64, f64) {
        (self.price, self.lower, self.upper)
    }

    /// The interval as a [`ConfidenceInterval`].
    #[inline]
    pub fn interval(&self) -> ConfidenceInterval {
        ConfidenceInterval {
            estimate: self.price,
            lower: self.lower,
            upper: self.upper,
            level: self.confidence_level,
        }
    }
}

/// Prices an arithmetic Asian call by Monte Carlo.
///
/// With antithetic sampling, `config.n_paths()` base rows are drawn and
/// mirrored; each observation is the average of a path's discounted payoff
/// and its mirror's, giving `n_paths` observations in both modes.
///
/// # Errors
///
/// Validation happens before any draw from `rng`:
/// - any error from [`AsianCallParams::validate`] or [`SimulationConfig::validate`]
/// - `Statistics(InsufficientSamples)` if `n_paths < 2`
///
/// After simulation:
/// - `NumericalInstability` if a payoff overflows
///
/// # Examples
///
/// ```rust
/// use asian_pricing::mc::{price_asian_call, AsianCallParams, SimulationConfig};
/// use asian_pricing::rng::PricerRng;
///
/// let params = AsianCallParams::new(11.0, 10.0, 0.25, 0.02, 0.3, 0.01);
/// let config = SimulationConfig::builder()
///     .n_paths(5_000)
///     .antithetic(true)
///     .build()
///     .unwrap();
///
/// let mut rng = PricerRng::from_seed(7);
/// let estimate = price_asian_call(&params, &config, &mut rng).unwrap();
/// assert!(estimate.price > 0.9 && estimate.price < 1.3);
/// ```
pub fn price_asian_call(
    params: &AsianCallParams,
    config: &SimulationConfig,
    rng: &mut PricerRng,
) -> Result<PriceEstimate, McError> {
    params.validate()?;
    config.validate()?;

    let n_paths = config.n_paths();
    if n_paths < MIN_OBSERVATIONS {
        return Err(StatisticsError::InsufficientSamples {
            count: n_paths,
            required: MIN_OBSERVATIONS,
        }
        .into());
    }

    let process = params.log_price_process(config.n_steps());
    debug!(
        spot = params.spot,
        strike = params.strike,
        maturity = params.maturity,
        volatility = params.volatility,
        n_paths,
        n_steps = config.n_steps(),
        antithetic = config.antithetic(),
        parallel = config.parallel(),
        seed = rng.seed(),
        "pricing arithmetic Asian call"
    );

    let simulation = if config.parallel() {
        simulate_brownian_paths_par(&process, n_paths, config.antithetic(), rng)?
    } else {
        simulate_brownian_paths(&process, n_paths, config.antithetic(), rng)?
    };

    let observations = discounted_observations(&simulation, params, config);

    if let Some(index) = observations.iter().position(|v| !v.is_finite()) {
        warn!(
            index,
            value = observations[index],
            "non-finite discounted payoff"
        );
        return Err(McError::NumericalInstability {
            message: format!("non-finite discounted payoff at observation {index}"),
        });
    }

    let stats = reduce(&observations, config.parallel());
    let interval = ConfidenceInterval::from_stats(&stats, config.confidence_level())?;
    let std_dev = stats.sample_std_dev()?;

    if !(interval.lower.is_finite() && interval.upper.is_finite()) {
        warn!(
            price = interval.estimate,
            std_dev, "non-finite confidence interval"
        );
        return Err(McError::NumericalInstability {
            message: "confidence interval is not finite".to_string(),
        });
    }

    debug!(
        price = interval.estimate,
        lower = interval.lower,
        upper = interval.upper,
        std_dev,
        "Asian call priced"
    );

    Ok(PriceEstimate {
        price: interval.estimate,
        lower: interval.lower,
        upper: interval.upper,
        std_dev,
        n_samples: stats.count(),
        antithetic: config.antithetic(),
        confidence_level: interval.level,
    })
}

/// One discounted observation per base path, pair-averaged when antithetic.
fn discounted_observations(
    simulation: &BrownianPaths,
    params: &AsianCallParams,
    config: &SimulationConfig,
) -> Vec<f64> {
    let paths = &simulation.paths;
    let n_paths = config.n_paths();
    let discount = params.discount_factor();
    let strike = params.strike;

    let observation = |i: usize| {
        let payoff = discount * asian_call_payoff_from_log_path(paths.row(i), strike);
        if config.antithetic() {
            let mirror = discount * asian_call_payoff_from_log_path(paths.row(i + n_paths), strike);
            0.5 * (payoff + mirror)
        } else {
            payoff
        }
    };

    if config.parallel() {
        (0..n_paths).into_par_iter().map(observation).collect()
    } else {
        (0..n_paths).map(observation).collect()
    }
}

/// Chunked reduction, merged in chunk order.
fn reduce(observations: &[f64], parallel: bool) -> RunningStats {
    let partials: Vec<RunningStats> = if parallel {
        observations
            .par_chunks(REDUCTION_CHUNK)
            .map(|chunk| chunk.iter().copied().collect())
            .collect()
    } else {
        observations
            .chunks(REDUCTION_CHUNK)
            .map(|chunk| chunk.iter().copied().collect())
            .collect()
    };

    partials.iter().fold(RunningStats::new(), |mut acc, part| {
        acc.merge(part);
        acc
    })
}

/// Stateful pricer owning a configuration and a seeded generator.
///
/// Successive calls to [`price`](Self::price) continue the random stream;
/// [`reset`](Self::reset) replays it from the seed.
///
/// # Examples
///
/// ```rust
/// use asian_pricing::mc::{AsianCallParams, AsianPricer, SimulationConfig};
///
/// let config = SimulationConfig::builder().n_paths(1_000).build().unwrap();
/// let mut pricer = AsianPricer::with_seed(config, 42).unwrap();
///
/// let first = pricer.price(&AsianCallParams::default()).unwrap();
/// pricer.reset();
/// let replay = pricer.price(&AsianCallParams::default()).unwrap();
/// assert_eq!(first, replay);
/// ```
#[derive(Clone, Debug)]
pub struct AsianPricer {
    config: SimulationConfig,
    rng: PricerRng,
}

impl AsianPricer {
    /// Creates a pricer from a configuration and a generator.
    ///
    /// # Errors
    ///
    /// Returns `McError` if the configuration is invalid.
    pub fn new(config: SimulationConfig, rng: PricerRng) -> Result<Self, McError> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    /// Creates a pricer with a fresh generator seeded by `seed`.
    ///
    /// # Errors
    ///
    /// Returns `McError` if the configuration is invalid.
    pub fn with_seed(config: SimulationConfig, seed: u64) -> Result<Self, McError> {
        Self::new(config, PricerRng::from_seed(seed))
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Returns the generator's seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Rewinds the generator to its seed.
    pub fn reset(&mut self) {
        self.rng.reset();
    }

    /// Replaces the generator with one seeded by `seed`.
    pub fn reset_with_seed(&mut self, seed: u64) {
        self.rng = PricerRng::from_seed(seed);
    }

    /// Prices `params` with the stored configuration.
    ///
    /// # Errors
    ///
    /// See [`price_asian_call`].
    pub fn price(&mut self, params: &AsianCallParams) -> Result<PriceEstimate, McError> {
        price_asian_call(params, &self.config, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn config(n_paths: usize, antithetic: bool, parallel: bool) -> SimulationConfig {
        SimulationConfig::builder()
            .n_paths(n_paths)
            .antithetic(antithetic)
            .parallel(parallel)
            .build()
            .unwrap()
    }

    #[test]
    fn test_estimate_helpers() {
        let estimate = PriceEstimate {
            price: 1.0,
            lower: 0.9,
            upper: 1.1,
            std_dev: 2.0,
            n_samples: 400,
            antithetic: false,
            confidence_level: 0.95,
        };

        assert_relative_eq!(estimate.width(), 0.2, epsilon = 1e-12);
        assert_relative_eq!(estimate.half_width(), 0.1, epsilon = 1e-12);
        assert_relative_eq!(estimate.std_error(), 0.1, epsilon = 1e-12);
        assert!(estimate.contains(0.95));
        assert!(!estimate.contains(1.2));
        assert_eq!(estimate.as_tuple(), (1.0, 0.9, 1.1));
        assert_eq!(estimate.interval().level, 0.95);
    }

    #[test]
    fn test_interval_matches_sample_statistics() {
        let params = AsianCallParams::default();
        let cfg = config(3_000, false, false);

        let mut rng = PricerRng::from_seed(11);
        let estimate = price_asian_call(&params, &cfg, &mut rng).unwrap();

        // Recompute the observations directly from the same stream.
        let mut replay = PricerRng::from_seed(11);
        let process = params.log_price_process(cfg.n_steps());
        let sim = simulate_brownian_paths(&process, 3_000, false, &mut replay).unwrap();
        let observations: Vec<f64> = sim
            .paths
            .iter_rows()
            .map(|row| params.discount_factor() * asian_call_payoff_from_log_path(row, params.strike))
            .collect();

        let n = observations.len() as f64;
        let mean = observations.iter().sum::<f64>() / n;
        let var = observations.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
        let half = 1.959_963_984_540_054 * (var / n).sqrt();

        assert_relative_eq!(estimate.price, mean, epsilon = 1e-10);
        assert_relative_eq!(estimate.std_dev, var.sqrt(), epsilon = 1e-10);
        assert_relative_eq!(estimate.half_width(), half, epsilon = 1e-8);
        assert_eq!(estimate.n_samples, 3_000);
    }

    #[test]
    fn test_antithetic_observations_are_pair_averages() {
        let params = AsianCallParams::default();
        let cfg = config(500, true, false);

        let mut rng = PricerRng::from_seed(21);
        let estimate = price_asian_call(&params, &cfg, &mut rng).unwrap();

        let mut replay = PricerRng::from_seed(21);
        let process = params.log_price_process(cfg.n_steps());
        let sim = simulate_brownian_paths(&process, 500, true, &mut replay).unwrap();
        let df = params.discount_factor();
        let mean = (0..500)
            .map(|i| {
                let a = df * asian_call_payoff_from_log_path(sim.paths.row(i), params.strike);
                let b = df * asian_call_payoff_from_log_path(sim.paths.row(i + 500), params.strike);
                0.5 * (a + b)
            })
            .sum::<f64>()
            / 500.0;

        assert_relative_eq!(estimate.price, mean, epsilon = 1e-10);
        assert_eq!(estimate.n_samples, 500);
        assert!(estimate.antithetic);
    }

    #[test]
    fn test_seed_determinism() {
        let params = AsianCallParams::default();
        for antithetic in [false, true] {
            let cfg = config(2_000, antithetic, false);
            let a = price_asian_call(&params, &cfg, &mut PricerRng::from_seed(5)).unwrap();
            let b = price_asian_call(&params, &cfg, &mut PricerRng::from_seed(5)).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let params = AsianCallParams::default();
        for antithetic in [false, true] {
            // Spans several reduction chunks.
            let seq = price_asian_call(
                &params,
                &config(10_000, antithetic, false),
                &mut PricerRng::from_seed(99),
            )
            .unwrap();
            let par = price_asian_call(
                &params,
                &config(10_000, antithetic, true),
                &mut PricerRng::from_seed(99),
            )
            .unwrap();
            assert_eq!(seq, par);
        }
    }

    #[test]
    fn test_tiny_volatility_reproduces_deterministic_payoff() {
        let params = AsianCallParams {
            volatility: 1e-10,
            ..Default::default()
        };
        let n_steps = 10;
        let dt = params.maturity / n_steps as f64;
        let nu = params.risk_neutral_drift();
        let avg = (1..=n_steps)
            .map(|j| params.spot * (nu * j as f64 * dt).exp())
            .sum::<f64>()
            / n_steps as f64;
        let expected = params.discount_factor() * (avg - params.strike).max(0.0);

        for antithetic in [false, true] {
            let estimate =
                price_asian_call(&params, &config(200, antithetic, false), &mut PricerRng::from_seed(3))
                    .unwrap();
            assert_relative_eq!(estimate.price, expected, epsilon = 1e-6);
            assert!(estimate.width() < 1e-6);
        }
    }

    #[test]
    fn test_insufficient_samples() {
        let cfg = config(1, false, false);
        let mut rng = PricerRng::from_seed(0);
        assert_eq!(
            price_asian_call(&AsianCallParams::default(), &cfg, &mut rng),
            Err(McError::Statistics(StatisticsError::InsufficientSamples {
                count: 1,
                required: 2
            }))
        );
    }

    #[test]
    fn test_degenerate_volatility() {
        let params = AsianCallParams {
            volatility: 0.0,
            ..Default::default()
        };
        let mut rng = PricerRng::from_seed(0);
        assert!(matches!(
            price_asian_call(&params, &config(100, false, false), &mut rng),
            Err(McError::DegenerateVolatility { .. })
        ));
    }

    #[test]
    fn test_overflow_is_numerical_instability() {
        // ln(1e300) + 300 · 0.1 already exceeds ln(f64::MAX) at the first date.
        let params = AsianCallParams {
            spot: 1e300,
            maturity: 1.0,
            dividend_yield: -300.0,
            ..Default::default()
        };
        let mut rng = PricerRng::from_seed(1);
        assert!(matches!(
            price_asian_call(&params, &config(100, false, false), &mut rng),
            Err(McError::NumericalInstability { .. })
        ));
    }

    #[test]
    fn test_pricer_reset_and_reseed() {
        let params = AsianCallParams::default();
        let mut pricer = AsianPricer::with_seed(config(1_000, true, false), 42).unwrap();

        let first = pricer.price(&params).unwrap();
        let second = pricer.price(&params).unwrap();
        assert_ne!(first, second);

        pricer.reset();
        assert_eq!(pricer.price(&params).unwrap(), first);

        pricer.reset_with_seed(43);
        assert_eq!(pricer.seed(), 43);
        let other = pricer.price(&params).unwrap();
        let direct = price_asian_call(&params, pricer.config(), &mut PricerRng::from_seed(43)).unwrap();
        assert_eq!(other, direct);
    }

    #[test]
    fn test_reduce_chunking_matches_single_pass() {
        let values: Vec<f64> = (0..10_000).map(|i| ((i * 7919) % 1000) as f64 * 0.01).collect();
        let chunked = reduce(&values, false);
        let single: RunningStats = values.iter().copied().collect();

        assert_eq!(chunked.count(), single.count());
        assert_relative_eq!(chunked.mean().unwrap(), single.mean().unwrap(), epsilon = 1e-10);
        assert_relative_eq!(
            chunked.sample_variance().unwrap(),
            single.sample_variance().unwrap(),
            epsilon = 1e-9
        );
        assert_eq!(chunked, reduce(&values, true));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_interval_ordering(
            spot in 1.0..200.0f64,
            strike in 0.0..300.0f64,
            maturity in 0.05..3.0f64,
            rate in -0.05..0.1f64,
            volatility in 0.01..1.0f64,
            dividend_yield in 0.0..0.05f64,
            n_paths in 2..300usize,
            antithetic in any::<bool>(),
            seed in any::<u64>(),
        ) {
            let params = AsianCallParams::new(spot, strike, maturity, rate, volatility, dividend_yield);
            let cfg = config(n_paths, antithetic, false);
            let estimate = price_asian_call(&params, &cfg, &mut PricerRng::from_seed(seed)).unwrap();

            prop_assert!(estimate.lower <= estimate.price);
            prop_assert!(estimate.price <= estimate.upper);
            prop_assert!(estimate.price >= 0.0);
            prop_assert_eq!(estimate.n_samples, n_paths);
        }
    }
}
