//! Arithmetic Asian call payoff.
//!
//! The average runs over the monitoring dates `t_1..t_N`; the price at
//! `t_0 = 0` is known at inception and excluded.

/// Arithmetic mean of `prices[1..]`.
///
/// Returns NaN for paths with fewer than two points.
///
/// # Examples
///
/// ```rust
/// use asian_pricing::mc::arithmetic_average_excluding_start;
///
/// let avg = arithmetic_average_excluding_start(&[100.0, 2.0, 4.0, 6.0]);
/// assert_eq!(avg, 4.0);
/// ```
#[inline]
pub fn arithmetic_average_excluding_start(prices: &[f64]) -> f64 {
    match prices.split_first() {
        Some((_, observed)) if !observed.is_empty() => {
            observed.iter().sum::<f64>() / observed.len() as f64
        }
        _ => f64::NAN,
    }
}

/// Undiscounted call payoff `max(avg - K, 0)` on a price path.
#[inline]
pub fn asian_call_payoff(prices: &[f64], strike: f64) -> f64 {
    (arithmetic_average_excluding_start(prices) - strike).max(0.0)
}

/// Same as [`asian_call_payoff`] for a log-price path, exponentiating on the fly.
#[inline]
pub fn asian_call_payoff_from_log_path(log_prices: &[f64], strike: f64) -> f64 {
    match log_prices.split_first() {
        Some((_, observed)) if !observed.is_empty() => {
            let avg = observed.iter().map(|x| x.exp()).sum::<f64>() / observed.len() as f64;
            (avg - strike).max(0.0)
        }
        _ => f64::NAN,
    }
}
