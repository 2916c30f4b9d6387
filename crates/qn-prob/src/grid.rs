//! Small grid utilities shared by the grid-based parameterizations.

use qn_core::{Error, Result};

/// `n` evenly spaced points from `start` to `stop`, both inclusive.
///
/// `n == 1` yields `[start]`; `n == 0` yields an empty vector.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            // Pin the last point so rounding never moves the upper edge.
            (0..n).map(|i| if i == n - 1 { stop } else { start + step * i as f64 }).collect()
        }
    }
}

/// Trapezoid-rule integral of `y(x)`.
pub fn trapezoid(x: &[f64], y: &[f64]) -> f64 {
    x.windows(2).zip(y.windows(2)).map(|(xw, yw)| 0.5 * (yw[0] + yw[1]) * (xw[1] - xw[0])).sum()
}

/// Running trapezoid integral, starting at 0 at `x[0]`.
pub fn cumulative_trapezoid(x: &[f64], y: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(x.len());
    let mut acc = 0.0;
    if !x.is_empty() {
        out.push(0.0);
    }
    for (xw, yw) in x.windows(2).zip(y.windows(2)) {
        acc += 0.5 * (yw[0] + yw[1]) * (xw[1] - xw[0]);
        out.push(acc);
    }
    out
}

/// Linear interpolation of `(xp, fp)` at `x`, clamped to the end values outside the range.
///
/// `xp` must be non-decreasing and non-empty.
pub fn interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    let n = xp.len();
    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[n - 1] {
        return fp[n - 1];
    }
    let hi = xp.partition_point(|&v| v <= x);
    let lo = hi - 1;
    let dx = xp[hi] - xp[lo];
    if dx <= 0.0 {
        return fp[hi];
    }
    fp[lo] + (x - xp[lo]) / dx * (fp[hi] - fp[lo])
}

/// `Ok` if `xs` has at least `min_len` finite, strictly increasing values.
pub fn check_increasing_axis(name: &str, xs: &[f64], min_len: usize) -> Result<()> {
    if xs.len() < min_len {
        return Err(Error::Validation(format!(
            "{} needs at least {} points, got {}",
            name,
            min_len,
            xs.len()
        )));
    }
    if xs.iter().any(|v| !v.is_finite()) {
        return Err(Error::Validation(format!("{} contains non-finite values", name)));
    }
    if xs.windows(2).any(|w| w[1] <= w[0]) {
        return Err(Error::Validation(format!("{} must be strictly increasing", name)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_linspace_endpoints_and_step() {
        let xs = linspace(0.0, 3.0, 301);
        assert_eq!(xs.len(), 301);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[300], 3.0);
        assert_abs_diff_eq!(xs[1], 0.01, epsilon = 1e-15);
        assert_eq!(linspace(0.01, 0.99, 1), vec![0.01]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_trapezoid_linear_exact() {
        let x = linspace(0.0, 2.0, 11);
        let y: Vec<f64> = x.iter().map(|v| 3.0 * v).collect();
        assert_abs_diff_eq!(trapezoid(&x, &y), 6.0, epsilon = 1e-12);
        let c = cumulative_trapezoid(&x, &y);
        assert_eq!(c.len(), x.len());
        assert_eq!(c[0], 0.0);
        assert_abs_diff_eq!(c[10], 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_interp_clamps_outside() {
        let xp = [0.0, 1.0, 2.0];
        let fp = [0.0, 10.0, 30.0];
        assert_eq!(interp(-1.0, &xp, &fp), 0.0);
        assert_eq!(interp(5.0, &xp, &fp), 30.0);
        assert_abs_diff_eq!(interp(0.5, &xp, &fp), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(interp(1.5, &xp, &fp), 20.0, epsilon = 1e-12);
        assert_eq!(interp(1.0, &xp, &fp), 10.0);
    }

    #[test]
    fn test_check_increasing_axis() {
        assert!(check_increasing_axis("bins", &[0.0, 1.0], 2).is_ok());
        assert!(check_increasing_axis("bins", &[0.0], 2).is_err());
        assert!(check_increasing_axis("bins", &[0.0, 0.0, 1.0], 2).is_err());
        assert!(check_increasing_axis("bins", &[0.0, f64::NAN], 2).is_err());
    }
}
