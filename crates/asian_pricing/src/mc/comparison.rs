//! Plain versus antithetic estimators at equal simulation cost.
//!
//! Both estimators consume `2 · n_paths` simulated rows: the plain run draws
//! `2 · n_paths` independent paths, the antithetic run draws `n_paths` and
//! mirrors them.

use tracing::debug;

use super::config::SimulationConfig;
use super::error::McError;
use super::params::AsianCallParams;
use super::pricer::{price_asian_call, PriceEstimate};
use crate::rng::PricerRng;

/// Estimates from a matched-cost plain/antithetic run.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AntitheticComparison {
    /// Plain estimator over `2 · n_paths` independent paths.
    pub plain: PriceEstimate,
    /// Antithetic estimator over `n_paths` mirrored pairs.
    pub antithetic: PriceEstimate,
}

impl AntitheticComparison {
    /// `antithetic.width() / plain.width()`; below 1 when mirroring helps.
    ///
    /// `None` when the plain interval has zero width, e.g. a strike so far
    /// out of the money that every payoff is zero.
    #[inline]
    pub fn width_ratio(&self) -> Option<f64> {
        ratio(self.antithetic.width(), self.plain.width())
    }

    /// Ratio of estimator variances, `plain.std_error()² / antithetic.std_error()²`.
    ///
    /// `None` when the antithetic standard error is zero.
    #[inline]
    pub fn variance_reduction(&self) -> Option<f64> {
        let plain = self.plain.std_error();
        let antithetic = self.antithetic.std_error();
        ratio(plain * plain, antithetic * antithetic)
    }

    /// Returns `true` if the two confidence intervals share a point.
    #[inline]
    pub fn intervals_overlap(&self) -> bool {
        self.plain.interval().overlaps(&self.antithetic.interval())
    }
}

#[inline]
fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    (denominator > 0.0).then(|| numerator / denominator)
}

/// Runs the plain and antithetic estimators at matched cost.
///
/// `config.n_paths()` is the antithetic base row count; its `antithetic`
/// flag is ignored. The plain run is drawn first from `rng`, the antithetic
/// run continues the same stream.
///
/// # Errors
///
/// - `InvalidPathCount` if `2 · n_paths` exceeds the path limit
/// - any error from [`price_asian_call`]
///
/// # Examples
///
/// ```rust
/// use asian_pricing::mc::{compare_antithetic, AsianCallParams, SimulationConfig};
/// use asian_pricing::rng::PricerRng;
///
/// let config = SimulationConfig::builder().n_paths(2_000).build().unwrap();
/// let mut rng = PricerRng::from_seed(42);
///
/// let cmp = compare_antithetic(&AsianCallParams::default(), &config, &mut rng).unwrap();
/// assert!(cmp.width_ratio().unwrap() < 1.0);
/// assert_eq!(cmp.plain.n_samples, 4_000);
/// assert_eq!(cmp.antithetic.n_samples, 2_000);
/// ```
pub fn compare_antithetic(
    params: &AsianCallParams,
    config: &SimulationConfig,
    rng: &mut PricerRng,
) -> Result<AntitheticComparison, McError> {
    params.validate()?;
    config.validate()?;

    let n_paths = config.n_paths();
    let doubled = n_paths
        .checked_mul(2)
        .ok_or(McError::InvalidPathCount(n_paths))?;

    let plain_config = config.to_builder().n_paths(doubled).antithetic(false).build()?;
    let antithetic_config = config.to_builder().antithetic(true).build()?;

    debug!(n_paths, raw_rows = doubled, "matched-cost antithetic comparison");

    let plain = price_asian_call(params, &plain_config, rng)?;
    let antithetic = price_asian_call(params, &antithetic_config, rng)?;

    let comparison = AntitheticComparison { plain, antithetic };
    debug!(
        width_ratio = ?comparison.width_ratio(),
        variance_reduction = ?comparison.variance_reduction(),
        overlap = comparison.intervals_overlap(),
        "comparison finished"
    );

    Ok(comparison)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_matched_cost_sample_counts() {
        let config = SimulationConfig::builder()
            .n_paths(1_000)
            .antithetic(false)
            .build()
            .unwrap();
        let mut rng = PricerRng::from_seed(17);
        let cmp = compare_antithetic(&AsianCallParams::default(), &config, &mut rng).unwrap();

        assert_eq!(cmp.plain.n_samples, 2_000);
        assert!(!cmp.plain.antithetic);
        assert_eq!(cmp.antithetic.n_samples, 1_000);
        assert!(cmp.antithetic.antithetic);
    }

    #[test]
    fn test_antithetic_reduces_variance() {
        let config = SimulationConfig::builder().n_paths(5_000).build().unwrap();
        let mut rng = PricerRng::from_seed(2024);
        let cmp = compare_antithetic(&AsianCallParams::default(), &config, &mut rng).unwrap();

        assert!(cmp.width_ratio().unwrap() < 0.8);
        assert!(cmp.variance_reduction().unwrap() > 1.5);
        assert!(cmp.intervals_overlap());
    }

    #[test]
    fn test_ratio_helpers() {
        let estimate = |price: f64, half: f64, std_dev: f64, n_samples: usize| PriceEstimate {
            price,
            lower: price - half,
            upper: price + half,
            std_dev,
            n_samples,
            antithetic: false,
            confidence_level: 0.95,
        };
        let cmp = AntitheticComparison {
            plain: estimate(1.0, 0.04, 2.0, 100),
            antithetic: estimate(1.1, 0.01, 0.5, 100),
        };

        assert_relative_eq!(cmp.width_ratio().unwrap(), 0.25, epsilon = 1e-12);
        assert_relative_eq!(cmp.variance_reduction().unwrap(), 16.0, epsilon = 1e-12);
        assert!(!cmp.intervals_overlap());
    }

    #[test]
    fn test_ratios_undefined_when_every_payoff_is_zero() {
        let params = AsianCallParams {
            strike: 1e6,
            ..Default::default()
        };
        let config = SimulationConfig::builder().n_paths(500).build().unwrap();
        let mut rng = PricerRng::from_seed(4);
        let cmp = compare_antithetic(&params, &config, &mut rng).unwrap();

        assert_eq!(cmp.plain.width(), 0.0);
        assert_eq!(cmp.antithetic.width(), 0.0);
        assert_eq!(cmp.width_ratio(), None);
        assert_eq!(cmp.variance_reduction(), None);
        assert!(cmp.intervals_overlap());
    }

    #[test]
    fn test_comparison_rejects_oversized_budget() {
        let config = SimulationConfig::builder()
            .n_paths(crate::mc::config::MAX_PATHS)
            .build()
            .unwrap();
        let mut rng = PricerRng::from_seed(0);
        assert!(matches!(
            compare_antithetic(&AsianCallParams::default(), &config, &mut rng),
            Err(McError::InvalidPathCount(_))
        ));
    }
}
