//! Gaussian mixture utilities for a single object.
//!
//! Weights are assumed normalized (see [`normalize_weights`]).

use qn_core::{Error, Result};

use crate::normal;

const PPF_MAX_ITER: usize = 200;
const PPF_XTOL: f64 = 1e-12;

/// Scale `weights` to unit sum.
pub fn normalize_weights(weights: &[f64]) -> Result<Vec<f64>> {
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(Error::Validation("mixture weights must be finite and >= 0".to_string()));
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err(Error::Validation("mixture weights sum to zero".to_string()));
    }
    Ok(weights.iter().map(|w| w / total).collect())
}

pub fn pdf(x: f64, means: &[f64], stds: &[f64], weights: &[f64]) -> Result<f64> {
    let mut acc = 0.0;
    for ((&m, &s), &w) in means.iter().zip(stds).zip(weights) {
        acc += w * normal::pdf(x, m, s)?;
    }
    Ok(acc)
}

pub fn cdf(x: f64, means: &[f64], stds: &[f64], weights: &[f64]) -> Result<f64> {
    let mut acc = 0.0;
    for ((&m, &s), &w) in means.iter().zip(stds).zip(weights) {
        acc += w * normal::cdf(x, m, s)?;
    }
    Ok(acc)
}

/// Inverse CDF by bisection on a bracket spanning every component's ±12σ.
pub fn ppf(q: f64, means: &[f64], stds: &[f64], weights: &[f64]) -> Result<f64> {
    if !(0.0..=1.0).contains(&q) {
        return Err(Error::Validation(format!("quantile level must be in [0, 1], got {}", q)));
    }
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for (&m, &s) in means.iter().zip(stds) {
        lo = lo.min(m - 12.0 * s);
        hi = hi.max(m + 12.0 * s);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return Err(Error::Computation("mixture ppf: empty or non-finite bracket".to_string()));
    }
    if cdf(lo, means, stds, weights)? > q || cdf(hi, means, stds, weights)? < q {
        return Err(Error::Computation(format!("mixture ppf: level {} not bracketed", q)));
    }

    for _ in 0..PPF_MAX_ITER {
        let mid = 0.5 * (lo + hi);
        if cdf(mid, means, stds, weights)? < q {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo <= PPF_XTOL * (1.0 + mid.abs()) {
            return Ok(0.5 * (lo + hi));
        }
    }
    Err(Error::Computation(format!(
        "mixture ppf: no convergence for level {} after {} iterations",
        q, PPF_MAX_ITER
    )))
}

/// Mean and variance of the mixture.
pub fn moments(means: &[f64], stds: &[f64], weights: &[f64]) -> (f64, f64) {
    let mut m1 = 0.0;
    let mut m2 = 0.0;
    for ((&m, &s), &w) in means.iter().zip(stds).zip(weights) {
        m1 += w * m;
        m2 += w * (s * s + m * m);
    }
    (m1, (m2 - m1 * m1).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_single_component_matches_normal() {
        let (m, s, w) = ([0.4], [0.1], [1.0]);
        assert_abs_diff_eq!(
            cdf(0.5, &m, &s, &w).unwrap(),
            normal::cdf(0.5, 0.4, 0.1).unwrap(),
            epsilon = 1e-14
        );
        assert_abs_diff_eq!(
            ppf(0.9, &m, &s, &w).unwrap(),
            normal::ppf(0.9, 0.4, 0.1).unwrap(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_symmetric_mixture_median() {
        let m = [0.2, 0.8];
        let s = [0.05, 0.05];
        let w = normalize_weights(&[2.0, 2.0]).unwrap();
        assert_abs_diff_eq!(w[0], 0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(ppf(0.5, &m, &s, &w).unwrap(), 0.5, epsilon = 1e-9);

        let (mean, var) = moments(&m, &s, &w);
        assert_abs_diff_eq!(mean, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(var, 0.0025 + 0.09, epsilon = 1e-12);
    }

    #[test]
    fn test_bad_weights() {
        assert!(normalize_weights(&[0.0, 0.0]).is_err());
        assert!(normalize_weights(&[1.0, -1.0]).is_err());
    }
}
