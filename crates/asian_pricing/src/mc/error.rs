//! Error types for the Monte Carlo simulator and pricer.
//!
//! Every variant is raised by eager validation at an entry point, before any
//! random draw, except `NumericalInstability` which guards the final
//! statistics against overflow.

use asian_core::types::StatisticsError;
use thiserror::Error;

use super::config::{MAX_PATHS, MAX_STEPS};

/// Monte Carlo simulation and pricing errors.
///
/// # Examples
///
/// ```rust
/// use asian_pricing::mc::McError;
///
/// let err = McError::InvalidStepCount(0);
/// assert!(err.to_string().contains("Invalid step count 0"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum McError {
    /// Simulated path count, antithetic mirrors included, outside [1, MAX_PATHS].
    #[error("Invalid path count {0}: simulated paths must be in range [1, {max}]", max = MAX_PATHS)]
    InvalidPathCount(usize),

    /// Step count outside [1, MAX_STEPS].
    #[error("Invalid step count {0}: must be in range [1, {max}]", max = MAX_STEPS)]
    InvalidStepCount(usize),

    /// Invalid real-valued parameter.
    #[error("Invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
        /// Constraint that was violated.
        reason: &'static str,
    },

    /// Volatility at or below zero leaves no randomness to estimate.
    #[error("Degenerate volatility: σ = {volatility}, must be strictly positive")]
    DegenerateVolatility {
        /// The rejected volatility.
        volatility: f64,
    },

    /// Simulation produced non-finite statistics.
    #[error("Numerical instability: {message}")]
    NumericalInstability {
        /// Description of the failure.
        message: String,
    },

    /// Failure in the statistical reduction.
    #[error(transparent)]
    Statistics(#[from] StatisticsError),
}

impl McError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}
