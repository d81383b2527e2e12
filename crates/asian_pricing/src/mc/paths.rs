//! Brownian path simulation with optional antithetic mirroring.
//!
//! Simulates `X(t) = X0 + μ t + σ W(t)` on a [`TimeGrid`] by drawing a
//! [`NoiseMatrix`] of standard normals and accumulating scaled increments
//! row by row into a [`PathMatrix`].
//!
//! # Memory Layout
//!
//! Both matrices are row-major: `data[row * (n_steps + 1) + step]`, where
//! `step = 0` holds the initial value. Column 0 of the noise matrix is drawn
//! but never used, so a row consumes `n_steps + 1` variates.
//!
//! # Antithetic Pairing
//!
//! With antithetic sampling, only `n_paths` rows are drawn from the RNG.
//! Rows `n_paths..2 * n_paths` are their exact negations, so row `i` and row
//! `i + n_paths` are driven by `z` and `-z` respectively.

use rayon::prelude::*;
use tracing::{debug, trace};

use super::config::{check_simulation_size, MAX_STEPS};
use super::error::McError;
use super::grid::TimeGrid;
use crate::rng::PricerRng;

/// Parameters of a drifted, scaled Brownian motion.
///
/// # Examples
///
/// ```rust
/// use asian_pricing::mc::BrownianParams;
///
/// let params = BrownianParams {
///     horizon: 1.0,
///     n_steps: 252,
///     initial: 0.0,
///     drift: 0.05,
///     volatility: 0.2,
/// };
/// assert!(params.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrownianParams {
    /// Time horizon `T`.
    pub horizon: f64,
    /// Number of grid steps `N`.
    pub n_steps: usize,
    /// Initial value `X0`.
    pub initial: f64,
    /// Drift per unit time.
    pub drift: f64,
    /// Diffusion coefficient per square-root unit time.
    pub volatility: f64,
}

impl BrownianParams {
    /// Validates the parameters.
    ///
    /// A zero volatility is accepted here (the path is a straight line).
    ///
    /// # Errors
    ///
    /// - `InvalidStepCount` if `n_steps` is outside [1, MAX_STEPS]
    /// - `InvalidParameter` for a non-positive horizon, a negative volatility
    ///   or any non-finite value
    pub fn validate(&self) -> Result<(), McError> {
        if !(self.horizon.is_finite() && self.horizon > 0.0) {
            return Err(McError::invalid(
                "horizon",
                self.horizon,
                "must be finite and positive",
            ));
        }
        if self.n_steps == 0 || self.n_steps > MAX_STEPS {
            return Err(McError::InvalidStepCount(self.n_steps));
        }
        if !self.initial.is_finite() {
            return Err(McError::invalid("initial", self.initial, "must be finite"));
        }
        if !self.drift.is_finite() {
            return Err(McError::invalid("drift", self.drift, "must be finite"));
        }
        if !(self.volatility.is_finite() && self.volatility >= 0.0) {
            return Err(McError::invalid(
                "volatility",
                self.volatility,
                "must be finite and non-negative",
            ));
        }
        Ok(())
    }

    /// Number of grid columns, `N + 1`.
    #[inline]
    pub fn n_cols(&self) -> usize {
        self.n_steps + 1
    }
}

/// Row-major matrix of standard normal draws driving the paths.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseMatrix {
    data: Vec<f64>,
    base_rows: usize,
    cols: usize,
    antithetic: bool,
}

impl NoiseMatrix {
    /// Draws `base_rows × cols` normals from `rng`, row by row.
    ///
    /// With `antithetic`, the negated copy of every row is appended, giving
    /// `2 · base_rows` rows while consuming only `base_rows × cols` draws.
    ///
    /// # Errors
    ///
    /// Checked before anything is allocated or drawn:
    /// - `InvalidPathCount` if the row count is zero or exceeds `MAX_PATHS`
    /// - `InvalidParameter` if `cols` is zero or the matrix exceeds `MAX_GRID_CELLS`
    pub fn draw(
        rng: &mut PricerRng,
        base_rows: usize,
        cols: usize,
        antithetic: bool,
    ) -> Result<Self, McError> {
        check_simulation_size(base_rows, antithetic, cols)?;
        let drawn = base_rows * cols;
        let total = if antithetic { 2 * drawn } else { drawn };

        let mut data = vec![0.0; total];
        let (head, tail) = data.split_at_mut(drawn);
        rng.fill_normal(head);
        for (mirror, &z) in tail.iter_mut().zip(head.iter()) {
            *mirror = -z;
        }

        trace!(base_rows, cols, antithetic, seed = rng.seed(), "drew noise matrix");

        Ok(Self {
            data,
            base_rows,
            cols,
            antithetic,
        })
    }

    /// Builds a noise matrix from explicit base draws (row-major).
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `cols` is zero, `draws` is empty, or
    /// `draws.len()` is not a multiple of `cols`.
    pub fn from_draws(draws: Vec<f64>, cols: usize, antithetic: bool) -> Result<Self, McError> {
        if cols == 0 || draws.is_empty() || draws.len() % cols != 0 {
            return Err(McError::invalid(
                "draws",
                draws.len() as f64,
                "length must be a positive multiple of the column count",
            ));
        }

        let base_rows = draws.len() / cols;
        let mut data = draws;
        if antithetic {
            let mirrored: Vec<f64> = data.iter().map(|&z| -z).collect();
            data.extend(mirrored);
        }

        Ok(Self {
            data,
            base_rows,
            cols,
            antithetic,
        })
    }

    /// Total number of rows (doubled under antithetic sampling).
    #[inline]
    pub fn rows(&self) -> usize {
        if self.antithetic {
            2 * self.base_rows
        } else {
            self.base_rows
        }
    }

    /// Number of independently drawn rows.
    #[inline]
    pub fn base_rows(&self) -> usize {
        self.base_rows
    }

    /// Number of columns (`N + 1`).
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the second half mirrors the first.
    #[inline]
    pub fn is_antithetic(&self) -> bool {
        self.antithetic
    }

    /// Row `i` of the matrix.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.rows()`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Index of the antithetic partner of row `i`, if any.
    #[inline]
    pub fn partner(&self, i: usize) -> Option<usize> {
        if !self.antithetic || i >= self.rows() {
            None
        } else if i < self.base_rows {
            Some(i + self.base_rows)
        } else {
            Some(i - self.base_rows)
        }
    }

    /// Whole matrix, row-major.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// Row-major matrix of simulated paths.
#[derive(Clone, Debug, PartialEq)]
pub struct PathMatrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl PathMatrix {
    /// Number of paths.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of grid columns (`N + 1`).
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Path `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.rows()`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Iterator over paths in row order.
    #[inline]
    pub fn iter_rows(&self) -> std::slice::ChunksExact<'_, f64> {
        self.data.chunks_exact(self.cols)
    }

    /// Whole matrix, row-major.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// Output of the path simulator.
#[derive(Clone, Debug, PartialEq)]
pub struct BrownianPaths {
    /// Observation times, `N + 1` points on `[0, T]`.
    pub time_grid: TimeGrid,
    /// Normal draws used to build the paths.
    pub noise: NoiseMatrix,
    /// Simulated paths, `n_paths` or `2 · n_paths` rows of `N + 1` columns.
    pub paths: PathMatrix,
}

/// Accumulates one row: `out[0] = X0`, `out[j] = X0 + Σ_{k=1..j} (μΔt + σ√Δt z_k)`.
#[inline]
fn fill_row(out: &mut [f64], z: &[f64], initial: f64, drift_dt: f64, vol_sqrt_dt: f64) {
    // No increment at time 0.
    out[0] = initial;
    let mut cumulative = 0.0;
    for step in 1..out.len() {
        cumulative += drift_dt + vol_sqrt_dt * z[step];
        out[step] = initial + cumulative;
    }
}

/// Turns a noise matrix into paths.
///
/// Rows are independent, so `parallel` only changes scheduling; the output is
/// bit-identical either way.
///
/// # Errors
///
/// - any error from [`BrownianParams::validate`]
/// - `InvalidParameter` if `noise.cols() != params.n_steps + 1`
pub fn build_paths(
    params: &BrownianParams,
    noise: &NoiseMatrix,
    parallel: bool,
) -> Result<PathMatrix, McError> {
    params.validate()?;
    let cols = params.n_cols();
    if noise.cols() != cols {
        return Err(McError::invalid(
            "noise",
            noise.cols() as f64,
            "column count must equal n_steps + 1",
        ));
    }

    let dt = params.horizon / params.n_steps as f64;
    let drift_dt = params.drift * dt;
    let vol_sqrt_dt = params.volatility * dt.sqrt();
    let initial = params.initial;

    let rows = noise.rows();
    let mut data = vec![0.0; rows * cols];

    if parallel {
        data.par_chunks_mut(cols)
            .zip(noise.as_slice().par_chunks(cols))
            .for_each(|(out, z)| fill_row(out, z, initial, drift_dt, vol_sqrt_dt));
    } else {
        data.chunks_mut(cols)
            .zip(noise.as_slice().chunks(cols))
            .for_each(|(out, z)| fill_row(out, z, initial, drift_dt, vol_sqrt_dt));
    }

    Ok(PathMatrix { data, rows, cols })
}

fn simulate(
    params: &BrownianParams,
    n_paths: usize,
    antithetic: bool,
    parallel: bool,
    rng: &mut PricerRng,
) -> Result<BrownianPaths, McError> {
    params.validate()?;
    check_simulation_size(n_paths, antithetic, params.n_cols())?;
    let time_grid = TimeGrid::uniform(params.horizon, params.n_steps)?;

    debug!(
        n_paths,
        n_steps = params.n_steps,
        antithetic,
        parallel,
        horizon = params.horizon,
        "simulating Brownian paths"
    );

    let noise = NoiseMatrix::draw(rng, n_paths, params.n_cols(), antithetic)?;
    let paths = build_paths(params, &noise, parallel)?;

    Ok(BrownianPaths {
        time_grid,
        noise,
        paths,
    })
}

/// Simulates `n_paths` Brownian paths, plus their mirrors when `antithetic`.
///
/// # Algorithm
///
/// 1. `Δt = T / N`
/// 2. Draw `n_paths × (N + 1)` standard normals `z`
/// 3. If antithetic, stack `z` and `-z`
/// 4. Increments `μΔt + σ√Δt z`, zero at column 0
/// 5. Cumulative sum per row, plus `X0`
///
/// # Errors
///
/// All inputs are validated before any draw:
/// - `InvalidPathCount` if `n_paths` is zero or the simulated row count
///   (doubled when antithetic) exceeds `MAX_PATHS`
/// - `InvalidParameter` if the matrices would exceed `MAX_GRID_CELLS`
/// - any error from [`BrownianParams::validate`]
///
/// # Examples
///
/// ```rust
/// use asian_pricing::mc::{simulate_brownian_paths, BrownianParams};
/// use asian_pricing::rng::PricerRng;
///
/// let params = BrownianParams {
///     horizon: 0.25,
///     n_steps: 10,
///     initial: 11.0_f64.ln(),
///     drift: -0.035,
///     volatility: 0.3,
/// };
/// let mut rng = PricerRng::from_seed(42);
/// let sim = simulate_brownian_paths(&params, 100, true, &mut rng).unwrap();
///
/// assert_eq!(sim.paths.rows(), 200);
/// assert_eq!(sim.paths.cols(), 11);
/// assert_eq!(sim.time_grid.points().len(), 11);
/// ```
pub fn simulate_brownian_paths(
    params: &BrownianParams,
    n_paths: usize,
    antithetic: bool,
    rng: &mut PricerRng,
) -> Result<BrownianPaths, McError> {
    simulate(params, n_paths, antithetic, false, rng)
}

/// Same as [`simulate_brownian_paths`] with rows built on the rayon pool.
///
/// Noise is still drawn sequentially from `rng`, so the result is identical
/// to the sequential simulator for the same seed.
pub fn simulate_brownian_paths_par(
    params: &BrownianParams,
    n_paths: usize,
    antithetic: bool,
    rng: &mut PricerRng,
) -> Result<BrownianPaths, McError> {
    simulate(params, n_paths, antithetic, true, rng)
}
