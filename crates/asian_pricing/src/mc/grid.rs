//! Uniform simulation time grid.

use super::config::MAX_STEPS;
use super::error::McError;

/// Equally spaced observation times `t_j = j · T / N` for `j = 0..=N`.
///
/// The first point is exactly `0` and the last exactly `T`.
///
/// # Examples
///
/// ```rust
/// use asian_pricing::mc::TimeGrid;
///
/// let grid = TimeGrid::uniform(1.0, 4).unwrap();
/// assert_eq!(grid.points(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(grid.dt(), 0.25);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TimeGrid {
    points: Vec<f64>,
    dt: f64,
}

impl TimeGrid {
    /// Builds the grid on `[0, horizon]` with `n_steps` intervals.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `horizon` is not finite and positive
    /// - `InvalidStepCount` if `n_steps` is outside [1, MAX_STEPS]
    pub fn uniform(horizon: f64, n_steps: usize) -> Result<Self, McError> {
        if !(horizon.is_finite() && horizon > 0.0) {
            return Err(McError::invalid(
                "horizon",
                horizon,
                "must be finite and positive",
            ));
        }
        if n_steps == 0 || n_steps > MAX_STEPS {
            return Err(McError::InvalidStepCount(n_steps));
        }

        let dt = horizon / n_steps as f64;
        let mut points: Vec<f64> = (0..=n_steps).map(|j| j as f64 * dt).collect();
        points[n_steps] = horizon;

        Ok(Self { points, dt })
    }

    /// All grid points, `N + 1` of them.
    #[inline]
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Step size `T / N`.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Number of steps `N`.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.points.len() - 1
    }

    /// Final time `T`.
    #[inline]
    pub fn horizon(&self) -> f64 {
        self.points[self.points.len() - 1]
    }
}
