//! Error types for statistical operations.
//!
//! This module provides:
//! - `StatisticsError`: Errors from sample statistics, quantiles and intervals

use thiserror::Error;

/// Statistical operation errors.
///
/// # Variants
/// - `InsufficientSamples`: Too few observations for the requested statistic
/// - `InvalidProbability`: Probability outside the open interval (0, 1)
/// - `InvalidConfidenceLevel`: Confidence level outside (0, 1)
///
/// # Examples
/// ```
/// use asian_core::types::StatisticsError;
///
/// let err = StatisticsError::InsufficientSamples { count: 1, required: 2 };
/// assert_eq!(
///     format!("{}", err),
///     "Insufficient samples: 1 observation(s), at least 2 required"
/// );
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StatisticsError {
    /// Not enough observations to compute the statistic.
    #[error("Insufficient samples: {count} observation(s), at least {required} required")]
    InsufficientSamples {
        /// Number of observations available
        count: usize,
        /// Minimum number of observations required
        required: usize,
    },

    /// Probability outside (0, 1).
    #[error("Invalid probability: p = {p}, must lie in (0, 1)")]
    InvalidProbability {
        /// The invalid probability
        p: f64,
    },

    /// Confidence level outside (0, 1).
    #[error("Invalid confidence level: {level}, must lie in (0, 1)")]
    InvalidConfidenceLevel {
        /// The invalid confidence level
        level: f64,
    },
}
