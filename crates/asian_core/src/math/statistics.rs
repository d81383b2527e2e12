//! Streaming sample statistics and normal-approximation confidence intervals.
//!
//! [`RunningStats`] accumulates count, mean and the sum of squared deviations
//! (Welford's update) in a single pass. Two accumulators can be merged with
//! the pairwise formula of Chan, Golub and LeVeque, so a sample split into
//! chunks and reduced chunk by chunk yields the same statistics (up to
//! rounding) as a single sequential pass.
//!
//! [`ConfidenceInterval`] turns the accumulated statistics into a two-sided
//! interval `mean ± z · s / √n` with `z = Φ⁻¹(½ + level/2)`.

use super::distributions::try_norm_quantile;
use crate::types::StatisticsError;

/// Default two-sided confidence level.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Streaming accumulator for sample mean and variance.
///
/// # Examples
///
/// ```rust
/// use asian_core::math::statistics::RunningStats;
///
/// let stats: RunningStats = [1.0, 2.0, 3.0, 4.0].into_iter().collect();
/// assert_eq!(stats.count(), 4);
/// assert!((stats.mean().unwrap() - 2.5).abs() < 1e-12);
/// assert!((stats.sample_variance().unwrap() - 5.0 / 3.0).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunningStats {
    count: usize,
    mean: f64,
    /// Sum of squared deviations from the running mean.
    m2: f64,
}

impl RunningStats {
    /// Creates an empty accumulator.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one observation.
    #[inline]
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    /// Combines another accumulator into this one.
    ///
    /// The result describes the union of both samples.
    pub fn merge(&mut self, other: &RunningStats) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }

        let n_a = self.count as f64;
        let n_b = other.count as f64;
        let n = n_a + n_b;
        let delta = other.mean - self.mean;

        self.mean += delta * n_b / n;
        self.m2 += other.m2 + delta * delta * n_a * n_b / n;
        self.count += other.count;
    }

    /// Number of observations.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns `true` if no observation has been pushed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Sample mean.
    ///
    /// # Errors
    ///
    /// Returns [`StatisticsError::InsufficientSamples`] for an empty sample.
    pub fn mean(&self) -> Result<f64, StatisticsError> {
        self.require(1)?;
        Ok(self.mean)
    }

    /// Unbiased sample variance (denominator `n - 1`).
    ///
    /// # Errors
    ///
    /// Returns [`StatisticsError::InsufficientSamples`] with fewer than two observations.
    pub fn sample_variance(&self) -> Result<f64, StatisticsError> {
        self.require(2)?;
        // Rounding can leave m2 marginally negative for constant samples.
        Ok((self.m2 / (self.count - 1) as f64).max(0.0))
    }

    /// Sample standard deviation (square root of [`sample_variance`](Self::sample_variance)).
    ///
    /// # Errors
    ///
    /// Returns [`StatisticsError::InsufficientSamples`] with fewer than two observations.
    pub fn sample_std_dev(&self) -> Result<f64, StatisticsError> {
        Ok(self.sample_variance()?.sqrt())
    }

    /// Standard error of the mean, `s / √n`.
    ///
    /// # Errors
    ///
    /// Returns [`StatisticsError::InsufficientSamples`] with fewer than two observations.
    pub fn std_error(&self) -> Result<f64, StatisticsError> {
        Ok(self.sample_std_dev()? / (self.count as f64).sqrt())
    }

    #[inline]
    fn require(&self, required: usize) -> Result<(), StatisticsError> {
        if self.count < required {
            return Err(StatisticsError::InsufficientSamples {
                count: self.count,
                required,
            });
        }
        Ok(())
    }
}

impl Extend<f64> for RunningStats {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl FromIterator<f64> for RunningStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = Self::new();
        stats.extend(iter);
        stats
    }
}

/// Two-sided confidence interval around a sample mean.
///
/// # Examples
///
/// ```rust
/// use asian_core::math::statistics::{ConfidenceInterval, RunningStats};
///
/// let stats: RunningStats = (0..100).map(|i| i as f64).collect();
/// let ci = ConfidenceInterval::from_stats(&stats, 0.95).unwrap();
///
/// assert!(ci.contains(49.5));
/// assert!((ci.width() - 2.0 * ci.half_width()).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfidenceInterval {
    /// Point estimate (sample mean).
    pub estimate: f64,
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
    /// Nominal two-sided coverage, e.g. 0.95.
    pub level: f64,
}

impl ConfidenceInterval {
    /// Builds the normal-approximation interval `mean ± z · s / √n`.
    ///
    /// # Errors
    ///
    /// - [`StatisticsError::InvalidConfidenceLevel`] unless `0 < level < 1`
    /// - [`StatisticsError::InsufficientSamples`] with fewer than two observations
    pub fn from_stats(stats: &RunningStats, level: f64) -> Result<Self, StatisticsError> {
        let z = z_multiplier(level)?;
        let estimate = stats.mean()?;
        let half_width = z * stats.std_error()?;

        Ok(Self {
            estimate,
            lower: estimate - half_width,
            upper: estimate + half_width,
            level,
        })
    }

    /// Distance from the estimate to either bound.
    #[inline]
    pub fn half_width(&self) -> f64 {
        0.5 * (self.upper - self.lower)
    }

    /// Distance between the bounds.
    #[inline]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Returns `true` if `value` lies within the closed interval.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Returns `true` if the two intervals share at least one point.
    #[inline]
    pub fn overlaps(&self, other: &ConfidenceInterval) -> bool {
        self.lower <= other.upper && other.lower <= self.upper
    }
}

/// Two-sided normal multiplier `Φ⁻¹(½ + level/2)`.
///
/// # Errors
///
/// Returns [`StatisticsError::InvalidConfidenceLevel`] unless `0 < level < 1`.
pub fn z_multiplier(level: f64) -> Result<f64, StatisticsError> {
    if !(level > 0.0 && level < 1.0) {
        return Err(StatisticsError::InvalidConfidenceLevel { level });
    }
    try_norm_quantile(0.5 + 0.5 * level)
}
