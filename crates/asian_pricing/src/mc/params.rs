//! Market and contract parameters for the arithmetic Asian call.

use super::error::McError;
use super::paths::BrownianParams;

/// Parameters of an arithmetic-average Asian call under risk-neutral GBM.
///
/// # Model
///
/// Under the risk-neutral measure the log-price `X = ln S` follows
/// ```text
/// dX = (r - δ - ½σ²) dt + σ dW
/// ```
///
/// # Examples
///
/// ```rust
/// use asian_pricing::mc::AsianCallParams;
///
/// let params = AsianCallParams::new(11.0, 10.0, 0.25, 0.02, 0.3, 0.01);
/// assert!(params.validate().is_ok());
/// assert!((params.risk_neutral_drift() - (0.02 - 0.01 - 0.045)).abs() < 1e-15);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AsianCallParams {
    /// Initial spot price (S₀).
    pub spot: f64,
    /// Strike price (K).
    pub strike: f64,
    /// Time to maturity (T) in years.
    pub maturity: f64,
    /// Continuously compounded risk-free rate (r), annualised.
    pub rate: f64,
    /// Volatility (σ), annualised.
    pub volatility: f64,
    /// Continuous dividend yield (δ), annualised.
    pub dividend_yield: f64,
}

impl AsianCallParams {
    /// Creates new parameters.
    #[inline]
    pub fn new(
        spot: f64,
        strike: f64,
        maturity: f64,
        rate: f64,
        volatility: f64,
        dividend_yield: f64,
    ) -> Self {
        Self {
            spot,
            strike,
            maturity,
            rate,
            volatility,
            dividend_yield,
        }
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` for a non-positive spot or maturity, a negative
    ///   strike, or any non-finite value
    /// - `DegenerateVolatility` for `σ <= 0`
    pub fn validate(&self) -> Result<(), McError> {
        if !(self.spot.is_finite() && self.spot > 0.0) {
            return Err(McError::invalid("spot", self.spot, "must be finite and positive"));
        }
        if !(self.strike.is_finite() && self.strike >= 0.0) {
            return Err(McError::invalid(
                "strike",
                self.strike,
                "must be finite and non-negative",
            ));
        }
        if !(self.maturity.is_finite() && self.maturity > 0.0) {
            return Err(McError::invalid(
                "maturity",
                self.maturity,
                "must be finite and positive",
            ));
        }
        if !self.rate.is_finite() {
            return Err(McError::invalid("rate", self.rate, "must be finite"));
        }
        if !self.dividend_yield.is_finite() {
            return Err(McError::invalid(
                "dividend_yield",
                self.dividend_yield,
                "must be finite",
            ));
        }
        if self.volatility.is_nan() || self.volatility == f64::INFINITY {
            return Err(McError::invalid(
                "volatility",
                self.volatility,
                "must be finite",
            ));
        }
        if self.volatility <= 0.0 {
            return Err(McError::DegenerateVolatility {
                volatility: self.volatility,
            });
        }
        Ok(())
    }

    /// Initial log-price `ln S₀`.
    #[inline]
    pub fn log_spot(&self) -> f64 {
        self.spot.ln()
    }

    /// Risk-neutral drift of the log-price, `r - δ - ½σ²`.
    #[inline]
    pub fn risk_neutral_drift(&self) -> f64 {
        self.rate - self.dividend_yield - 0.5 * self.volatility * self.volatility
    }

    /// Discount factor to today, `exp(-rT)`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }

    /// Log-price process parameters on a grid of `n_steps` steps.
    #[inline]
    pub fn log_price_process(&self, n_steps: usize) -> BrownianParams {
        BrownianParams {
            horizon: self.maturity,
            n_steps,
            initial: self.log_spot(),
            drift: self.risk_neutral_drift(),
            volatility: self.volatility,
        }
    }
}

impl Default for AsianCallParams {
    /// In-the-money quarterly contract: S₀ = 11, K = 10, T = 0.25, r = 2%, σ = 30%, δ = 1%.
    fn default() -> Self {
        Self::new(11.0, 10.0, 0.25, 0.02, 0.3, 0.01)
    }
}
