//! Monte Carlo simulation configuration.
//!
//! This module provides [`SimulationConfig`] and its builder. The random
//! source is not part of the configuration; callers pass an explicitly
//! seeded [`PricerRng`](crate::rng::PricerRng) into every call.

use asian_core::math::statistics::DEFAULT_CONFIDENCE_LEVEL;

use super::error::McError;

/// Maximum number of simulated paths, counting antithetic mirrors.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum number of time steps allowed per path.
pub const MAX_STEPS: usize = 10_000;

/// Maximum number of cells, `rows × (n_steps + 1)`, in one noise or path matrix.
///
/// Large enough for [`MAX_PATHS`] rows at the default step count.
pub const MAX_GRID_CELLS: usize = 120_000_000;

/// Default number of time steps per path.
pub const DEFAULT_N_STEPS: usize = 10;

/// Default number of base simulation paths.
pub const DEFAULT_N_PATHS: usize = 10_000;

/// Monte Carlo simulation configuration.
///
/// Immutable, `Copy`, passed by value. Use [`SimulationConfigBuilder`] to
/// construct validated instances; unset fields take their documented defaults.
///
/// | Field | Default |
/// |-------|---------|
/// | `n_steps` | [`DEFAULT_N_STEPS`] (10) |
/// | `n_paths` | [`DEFAULT_N_PATHS`] (10 000) |
/// | `antithetic` | `false` |
/// | `parallel` | `false` |
/// | `confidence_level` | 0.95 |
///
/// # Examples
///
/// ```rust
/// use asian_pricing::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .n_paths(5_000)
///     .antithetic(true)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 5_000);
/// assert_eq!(config.n_steps(), 10);
/// assert_eq!(config.raw_path_count(), 10_000);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "SimulationConfigBuilder"))]
pub struct SimulationConfig {
    /// Number of time steps per path.
    n_steps: usize,
    /// Number of base paths (before antithetic doubling).
    n_paths: usize,
    /// Pair every path with its sign-flipped mirror.
    antithetic: bool,
    /// Build rows and payoffs on the rayon thread pool.
    parallel: bool,
    /// Two-sided confidence level of the reported interval.
    confidence_level: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_steps: DEFAULT_N_STEPS,
            n_paths: DEFAULT_N_PATHS,
            antithetic: false,
            parallel: false,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
        }
    }
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Returns a builder pre-filled with this configuration.
    #[inline]
    pub fn to_builder(self) -> SimulationConfigBuilder {
        SimulationConfigBuilder {
            n_steps: Some(self.n_steps),
            n_paths: Some(self.n_paths),
            antithetic: self.antithetic,
            parallel: self.parallel,
            confidence_level: Some(self.confidence_level),
        }
    }

    /// Returns the number of time steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the number of base paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns whether antithetic sampling is enabled.
    #[inline]
    pub fn antithetic(&self) -> bool {
        self.antithetic
    }

    /// Returns whether rayon parallelism is enabled.
    #[inline]
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Returns the two-sided confidence level.
    #[inline]
    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Number of simulated rows: `n_paths`, doubled under antithetic sampling.
    #[inline]
    pub fn raw_path_count(&self) -> usize {
        if self.antithetic {
            2 * self.n_paths
        } else {
            self.n_paths
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `McError` if:
    /// - `n_steps` is 0 or greater than [`MAX_STEPS`]
    /// - `n_paths` is 0, or the simulated row count exceeds [`MAX_PATHS`]
    /// - the matrices would exceed [`MAX_GRID_CELLS`]
    /// - `confidence_level` is outside (0, 1)
    pub fn validate(&self) -> Result<(), McError> {
        if self.n_steps == 0 || self.n_steps > MAX_STEPS {
            return Err(McError::InvalidStepCount(self.n_steps));
        }
        check_simulation_size(self.n_paths, self.antithetic, self.n_steps + 1)?;
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(McError::invalid(
                "confidence_level",
                self.confidence_level,
                "must lie in (0, 1)",
            ));
        }
        Ok(())
    }
}

/// Checks the size of a simulation and returns its row count.
///
/// `n_paths` base rows, doubled when `antithetic`, each of `n_cols` cells.
pub(crate) fn check_simulation_size(
    n_paths: usize,
    antithetic: bool,
    n_cols: usize,
) -> Result<usize, McError> {
    let factor = if antithetic { 2 } else { 1 };
    let rows = n_paths
        .checked_mul(factor)
        .filter(|&rows| rows > 0 && rows <= MAX_PATHS)
        .ok_or(McError::InvalidPathCount(n_paths.saturating_mul(factor)))?;

    match rows.checked_mul(n_cols) {
        Some(cells) if n_cols > 0 && cells <= MAX_GRID_CELLS => Ok(rows),
        _ => Err(McError::invalid(
            "grid_cells",
            rows as f64 * n_cols as f64,
            "rows × (n_steps + 1) must be positive and at most MAX_GRID_CELLS",
        )),
    }
}

/// Builder for [`SimulationConfig`].
///
/// # Examples
///
/// ```rust
/// use asian_pricing::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .n_steps(252)
///     .n_paths(50_000)
///     .parallel(true)
///     .build()
///     .expect("valid config");
/// assert!(config.parallel());
/// ```
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfigBuilder {
    n_steps: Option<usize>,
    n_paths: Option<usize>,
    antithetic: bool,
    parallel: bool,
    confidence_level: Option<f64>,
}

impl SimulationConfigBuilder {
    /// Sets the number of time steps per path, in [1, 10_000].
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Sets the number of base paths; with antithetic mirrors the total
    /// must not exceed [`MAX_PATHS`].
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Enables or disables antithetic sampling.
    #[inline]
    pub fn antithetic(mut self, antithetic: bool) -> Self {
        self.antithetic = antithetic;
        self
    }

    /// Enables or disables rayon parallelism.
    #[inline]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the two-sided confidence level, in (0, 1).
    #[inline]
    pub fn confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = Some(level);
        self
    }

    /// Builds the configuration, filling unset fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns `McError` if any field is out of range
    /// (see [`SimulationConfig::validate`]).
    pub fn build(self) -> Result<SimulationConfig, McError> {
        let config = SimulationConfig {
            n_steps: self.n_steps.unwrap_or(DEFAULT_N_STEPS),
            n_paths: self.n_paths.unwrap_or(DEFAULT_N_PATHS),
            antithetic: self.antithetic,
            parallel: self.parallel,
            confidence_level: self.confidence_level.unwrap_or(DEFAULT_CONFIDENCE_LEVEL),
        };

        config.validate()?;
        Ok(config)
    }
}

impl TryFrom<SimulationConfigBuilder> for SimulationConfig {
    type Error = McError;

    fn try_from(builder: SimulationConfigBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}
