//! # asian_pricing: Antithetic Monte Carlo for Arithmetic Asian Calls
//!
//! ## Layer 2 Role
//!
//! asian_pricing builds on asian_core and provides:
//! - Explicitly seeded random source (`rng`)
//! - Brownian path simulation with antithetic mirroring (`mc::paths`)
//! - Arithmetic Asian call pricing with confidence intervals (`mc::pricer`)
//! - Matched-cost plain/antithetic comparison (`mc::comparison`)
//!
//! ## Usage Example
//!
//! ```rust
//! use asian_pricing::{price_asian_call, AsianCallParams, SimulationConfig};
//! use asian_pricing::rng::PricerRng;
//!
//! let params = AsianCallParams::new(11.0, 10.0, 0.25, 0.02, 0.3, 0.01);
//! let config = SimulationConfig::builder()
//!     .n_paths(5_000)
//!     .antithetic(true)
//!     .build()
//!     .unwrap();
//!
//! let mut rng = PricerRng::from_seed(42);
//! let (price, lower, upper) = price_asian_call(&params, &config, &mut rng)
//!     .unwrap()
//!     .as_tuple();
//! assert!(lower <= price && price <= upper);
//! ```
//!
//! ## Logging
//!
//! Entry points emit `tracing` events (`debug` for runs, `trace` for noise
//! draws, `warn` before a numerical failure). No subscriber is installed.
//!
//! ## Feature Flags
//!
//! - `serde`: Serialisation for `SimulationConfig`, `AsianCallParams`,
//!   `PriceEstimate` and `AntitheticComparison`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod mc;
pub mod rng;

pub use mc::{
    compare_antithetic, price_asian_call, AntitheticComparison, AsianCallParams, AsianPricer,
    McError, PriceEstimate, SimulationConfig,
};
