//! Monte Carlo simulation and pricing of arithmetic Asian calls.
//!
//! # Architecture
//!
//! ```text
//! price_asian_call / AsianPricer
//! ├── AsianCallParams   (S0, K, T, r, σ, δ)
//! ├── SimulationConfig  (n_steps, n_paths, antithetic, parallel, level)
//! ├── PricerRng         (explicitly seeded, passed by &mut)
//! └── Orchestration
//!     ├── simulate_brownian_paths()   log-price paths on a TimeGrid
//!     ├── asian_call_payoff_from_log_path()
//!     └── chunked RunningStats reduction → PriceEstimate
//! ```
//!
//! # Antithetic Sampling
//!
//! With `antithetic = true`, each of the `n_paths` drawn noise rows is
//! paired with its negation. The discounted payoffs of a pair are averaged
//! into one observation, so the estimate is always over `n_paths`
//! observations. [`compare_antithetic`] runs both estimators at matched cost.
//!
//! # Parallelism
//!
//! `parallel = true` builds rows and evaluates payoffs on the rayon pool.
//! Noise is drawn sequentially and statistics are merged in a fixed order,
//! so results do not depend on the thread count.
//!
//! # Example
//!
//! ```rust
//! use asian_pricing::mc::{price_asian_call, AsianCallParams, SimulationConfig};
//! use asian_pricing::rng::PricerRng;
//!
//! let params = AsianCallParams::new(11.0, 10.0, 0.25, 0.02, 0.3, 0.01);
//! let config = SimulationConfig::builder()
//!     .n_steps(10)
//!     .n_paths(10_000)
//!     .build()
//!     .unwrap();
//!
//! let mut rng = PricerRng::from_seed(42);
//! let estimate = price_asian_call(&params, &config, &mut rng).unwrap();
//! println!("{:.4} [{:.4}, {:.4}]", estimate.price, estimate.lower, estimate.upper);
//! ```

pub mod comparison;
pub mod config;
pub mod error;
pub mod grid;
pub mod params;
pub mod paths;
pub mod payoff;
pub mod pricer;

pub use comparison::{compare_antithetic, AntitheticComparison};
pub use config::{
    SimulationConfig, SimulationConfigBuilder, DEFAULT_N_PATHS, DEFAULT_N_STEPS, MAX_GRID_CELLS,
    MAX_PATHS, MAX_STEPS,
};
pub use error::McError;
pub use grid::TimeGrid;
pub use params::AsianCallParams;
pub use paths::{
    build_paths, simulate_brownian_paths, simulate_brownian_paths_par, BrownianParams,
    BrownianPaths, NoiseMatrix, PathMatrix,
};
pub use payoff::{
    arithmetic_average_excluding_start, asian_call_payoff, asian_call_payoff_from_log_path,
};
pub use pricer::{price_asian_call, AsianPricer, PriceEstimate, REDUCTION_CHUNK};
