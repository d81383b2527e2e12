//! # Random Number Generation
//!
//! Seeded pseudo-random source for the path simulator.
//!
//! ## Design
//!
//! - **Explicit state**: there is no process-wide generator. A [`PricerRng`]
//!   is created from a seed by the caller and passed `&mut` into every
//!   simulation, so the seed is part of each call's contract.
//! - **Reproducibility**: the same seed always replays the same stream of
//!   draws, hence identical paths and identical price estimates.
//! - **Batch fills**: normals are written into caller-owned `&mut [f64]`
//!   slices, row by row, in a fixed order.
//!
//! ## Usage Example
//!
//! ```rust
//! use asian_pricing::rng::PricerRng;
//!
//! let mut rng = PricerRng::from_seed(12345);
//!
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//! ```

mod prng;

pub use prng::PricerRng;
