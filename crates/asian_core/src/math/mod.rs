//! Mathematical building blocks for Monte Carlo estimation.
//!
//! - [`distributions`]: standard normal quantile
//! - [`statistics`]: streaming mean/variance and normal-approximation intervals

pub mod distributions;
pub mod statistics;

pub use distributions::{norm_quantile, try_norm_quantile};
pub use statistics::{z_multiplier, ConfidenceInterval, RunningStats, DEFAULT_CONFIDENCE_LEVEL};
