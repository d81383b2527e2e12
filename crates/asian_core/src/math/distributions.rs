//! Standard normal quantile.
//!
//! This module provides:
//! - `norm_quantile`: Inverse CDF, used for confidence interval multipliers
//! - `try_norm_quantile`: Checked variant rejecting `p` outside (0, 1)

use crate::types::StatisticsError;

// Acklam rational approximation coefficients for the normal quantile.
const ACKLAM_A: [f64; 6] = [
    -3.969_683_028_665_376e1,
    2.209_460_984_245_205e2,
    -2.759_285_104_469_687e2,
    1.383_577_518_672_690e2,
    -3.066_479_806_614_716e1,
    2.506_628_277_459_239,
];
const ACKLAM_B: [f64; 5] = [
    -5.447_609_879_822_406e1,
    1.615_858_368_580_409e2,
    -1.556_989_798_598_866e2,
    6.680_131_188_771_972e1,
    -1.328_068_155_288_572e1,
];
const ACKLAM_C: [f64; 6] = [
    -7.784_894_002_430_293e-3,
    -3.223_964_580_411_365e-1,
    -2.400_758_277_161_838,
    -2.549_732_539_343_734,
    4.374_664_141_464_968,
    2.938_163_982_698_783,
];
const ACKLAM_D: [f64; 4] = [
    7.784_695_709_041_462e-3,
    3.224_671_290_700_398e-1,
    2.445_134_137_142_996,
    3.754_408_661_907_416,
];

/// Break-point between the central and tail regions of the Acklam approximation.
const ACKLAM_P_LOW: f64 = 0.02425;

/// Standard normal quantile (inverse CDF).
///
/// Returns x such that Φ(x) = p, using Acklam's rational approximation
/// (relative error below 1.15e-9 across (0, 1)).
///
/// Boundary behaviour: `p <= 0` gives `-inf`, `p >= 1` gives `+inf` and a NaN
/// input gives NaN. Use [`try_norm_quantile`] to reject such inputs instead.
///
/// # Examples
/// ```
/// use asian_core::math::distributions::norm_quantile;
///
/// // Two-sided 95% multiplier
/// let z = norm_quantile(0.975);
/// assert!((z - 1.959964).abs() < 1e-6);
///
/// assert_eq!(norm_quantile(0.5), 0.0);
/// ```
pub fn norm_quantile(p: f64) -> f64 {
    if p.is_nan() {
        return f64::NAN;
    }
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }
    if p == 0.5 {
        return 0.0;
    }

    let (a, b, c, d) = (&ACKLAM_A, &ACKLAM_B, &ACKLAM_C, &ACKLAM_D);

    if p < ACKLAM_P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        tail(q, c, d)
    } else if p <= 1.0 - ACKLAM_P_LOW {
        let q = p - 0.5;
        let r = q * q;
        let num = ((((a[0] * r + a[1]) * r + a[2]) * r + a[3]) * r + a[4]) * r + a[5];
        let den = ((((b[0] * r + b[1]) * r + b[2]) * r + b[3]) * r + b[4]) * r + 1.0;
        num * q / den
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -tail(q, c, d)
    }
}

#[inline]
fn tail(q: f64, c: &[f64; 6], d: &[f64; 4]) -> f64 {
    let num = ((((c[0] * q + c[1]) * q + c[2]) * q + c[3]) * q + c[4]) * q + c[5];
    let den = (((d[0] * q + d[1]) * q + d[2]) * q + d[3]) * q + 1.0;
    num / den
}

/// Checked standard normal quantile.
///
/// # Errors
///
/// Returns [`StatisticsError::InvalidProbability`] unless `0 < p < 1`.
///
/// # Examples
/// ```
/// use asian_core::math::distributions::try_norm_quantile;
///
/// assert!(try_norm_quantile(0.975).is_ok());
/// assert!(try_norm_quantile(1.0).is_err());
/// ```
pub fn try_norm_quantile(p: f64) -> Result<f64, StatisticsError> {
    if !(p > 0.0 && p < 1.0) {
        return Err(StatisticsError::InvalidProbability { p });
    }
    Ok(norm_quantile(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ==========================================================
    // norm_quantile tests
    // ==========================================================

    #[test]
    fn test_norm_quantile_975() {
        assert_relative_eq!(norm_quantile(0.975), 1.959963984540054, epsilon = 1e-8);
    }

    #[test]
    fn test_norm_quantile_reference_values() {
        assert_eq!(norm_quantile(0.5), 0.0);
        assert_relative_eq!(norm_quantile(0.8413447460685429), 1.0, epsilon = 1e-8);
        // Lower tail region (p < 0.02425)
        assert_relative_eq!(norm_quantile(0.01), -2.3263478740408408, epsilon = 1e-8);
        // Upper tail region
        assert_relative_eq!(norm_quantile(0.999), 3.090232306167813, epsilon = 1e-8);
    }

    #[test]
    fn test_norm_quantile_symmetry() {
        for p in [0.001, 0.01, 0.02425, 0.1, 0.3, 0.45] {
            assert_relative_eq!(norm_quantile(p), -norm_quantile(1.0 - p), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_norm_quantile_monotonic() {
        let mut prev = f64::NEG_INFINITY;
        for i in 1..1000 {
            let x = norm_quantile(i as f64 / 1000.0);
            assert!(x > prev, "quantile not increasing at p = {}", i as f64 / 1000.0);
            prev = x;
        }
    }

    #[test]
    fn test_norm_quantile_central_region() {
        // Φ⁻¹ at the 90% and 99% two-sided levels
        assert_relative_eq!(norm_quantile(0.95), 1.6448536269514722, epsilon = 1e-8);
        assert_relative_eq!(norm_quantile(0.995), 2.5758293035489004, epsilon = 1e-8);
        assert_relative_eq!(norm_quantile(0.25), -0.6744897501960817, epsilon = 1e-8);
    }

    #[test]
    fn test_norm_quantile_boundaries() {
        assert_eq!(norm_quantile(0.0), f64::NEG_INFINITY);
        assert_eq!(norm_quantile(1.0), f64::INFINITY);
        assert!(norm_quantile(f64::NAN).is_nan());
    }

    #[test]
    fn test_try_norm_quantile_rejects_out_of_range() {
        for p in [0.0, 1.0, -0.5, 2.0, f64::NAN] {
            assert!(matches!(
                try_norm_quantile(p),
                Err(StatisticsError::InvalidProbability { .. })
            ));
        }
        assert_relative_eq!(
            try_norm_quantile(0.975).unwrap(),
            1.959963984540054,
            epsilon = 1e-8
        );
    }
}
