//! # asian_core: Statistical Foundation for Monte Carlo Estimators
//!
//! ## Layer 1 (Foundation) Role
//!
//! asian_core is the bottom layer of the workspace, providing:
//! - Standard normal quantile (`math::distributions`)
//! - Streaming sample statistics and confidence intervals (`math::statistics`)
//! - Error types: `StatisticsError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other workspace crates, with minimal external dependencies:
//! - thiserror: Structured error types
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use asian_core::math::distributions::norm_quantile;
//! use asian_core::math::statistics::{ConfidenceInterval, RunningStats};
//!
//! // 97.5th percentile of the standard normal
//! let z = norm_quantile(0.975_f64);
//! assert!((z - 1.959964).abs() < 1e-6);
//!
//! // Streaming statistics over a sample
//! let mut stats = RunningStats::new();
//! for x in [1.0, 2.0, 3.0, 4.0] {
//!     stats.push(x);
//! }
//! let ci = ConfidenceInterval::from_stats(&stats, 0.95).unwrap();
//! assert!(ci.lower <= ci.estimate && ci.estimate <= ci.upper);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `ConfidenceInterval`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
