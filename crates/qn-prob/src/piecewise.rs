//! Piecewise-linear CDFs.
//!
//! Histograms and quantile tables both describe a distribution whose CDF is
//! linear between knots (piecewise-uniform density). Interpolated grids use
//! the same representation for their CDF, built from the running trapezoid
//! integral.

use qn_core::{Error, Result};

use crate::grid;

/// CDF given by knots `(x_i, F_i)` with `x` strictly increasing and `F` non-decreasing.
///
/// Outside the knot range the CDF is 0 below `x[0]` and 1 above `x[n-1]`;
/// any probability not covered by `[F_0, F_{n-1}]` sits at the end knots.
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseCdf {
    x: Vec<f64>,
    f: Vec<f64>,
}

impl PiecewiseCdf {
    /// CDF of a piecewise-constant density over `edges` (`densities.len() == edges.len() - 1`).
    pub fn from_density_steps(edges: &[f64], densities: &[f64]) -> Self {
        let mut f = Vec::with_capacity(edges.len());
        let mut acc = 0.0;
        f.push(0.0);
        for (w, d) in edges.windows(2).zip(densities) {
            acc += d * (w[1] - w[0]);
            f.push(acc);
        }
        Self { x: edges.to_vec(), f }
    }

    /// CDF through the points `(locs_i, quants_i)`.
    pub fn from_quantiles(locs: &[f64], quants: &[f64]) -> Self {
        Self { x: locs.to_vec(), f: quants.to_vec() }
    }

    /// CDF of a density sampled on a grid, integrated with the trapezoid rule.
    pub fn from_grid(xvals: &[f64], yvals: &[f64]) -> Self {
        Self { x: xvals.to_vec(), f: grid::cumulative_trapezoid(xvals, yvals) }
    }

    /// Probability mass between the first and last knot.
    pub fn inner_mass(&self) -> f64 {
        match (self.f.first(), self.f.last()) {
            (Some(a), Some(b)) => b - a,
            _ => 0.0,
        }
    }

    pub fn cdf(&self, x: f64) -> f64 {
        let n = self.x.len();
        if n == 0 || x < self.x[0] {
            return 0.0;
        }
        if x >= self.x[n - 1] {
            return 1.0;
        }
        grid::interp(x, &self.x, &self.f)
    }

    /// Slope of the CDF at `x`; zero outside the knot range.
    pub fn density(&self, x: f64) -> f64 {
        let n = self.x.len();
        if n < 2 || x < self.x[0] || x >= self.x[n - 1] {
            return 0.0;
        }
        let hi = self.x.partition_point(|&v| v <= x);
        let lo = hi - 1;
        (self.f[hi] - self.f[lo]) / (self.x[hi] - self.x[lo])
    }

    /// Inverse CDF by linear interpolation between knots.
    ///
    /// Levels below `F_0` map to `x[0]`, levels above `F_{n-1}` to `x[n-1]`.
    pub fn ppf(&self, q: f64) -> Result<f64> {
        if !(0.0..=1.0).contains(&q) {
            return Err(Error::Validation(format!("quantile level must be in [0, 1], got {}", q)));
        }
        let n = self.x.len();
        if n == 0 {
            return Err(Error::Computation("ppf of an empty CDF".to_string()));
        }
        let idx = self.f.partition_point(|&v| v < q);
        if idx == 0 {
            return Ok(self.x[0]);
        }
        if idx == n {
            return Ok(self.x[n - 1]);
        }
        let (f0, f1) = (self.f[idx - 1], self.f[idx]);
        let (x0, x1) = (self.x[idx - 1], self.x[idx]);
        Ok(x0 + (q - f0) / (f1 - f0) * (x1 - x0))
    }

    /// Mean and variance of the piecewise-uniform density between the knots.
    pub fn moments(&self) -> Result<(f64, f64)> {
        let mass = self.inner_mass();
        if !(mass > 0.0) {
            return Err(Error::Computation(format!("cannot take moments of a CDF with inner mass {}", mass)));
        }
        let mut m1 = 0.0;
        let mut m2 = 0.0;
        for (xw, fw) in self.x.windows(2).zip(self.f.windows(2)) {
            let p = fw[1] - fw[0];
            let (a, b) = (xw[0], xw[1]);
            m1 += p * 0.5 * (a + b);
            m2 += p * (a * a + a * b + b * b) / 3.0;
        }
        let mean = m1 / mass;
        let var = (m2 / mass - mean * mean).max(0.0);
        Ok((mean, var))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_uniform_histogram() {
        let cdf = PiecewiseCdf::from_density_steps(&[0.0, 1.0, 2.0], &[0.5, 0.5]);
        assert_abs_diff_eq!(cdf.cdf(1.0), 0.5, epsilon = 1e-12);
        assert_eq!(cdf.cdf(-1.0), 0.0);
        assert_eq!(cdf.cdf(3.0), 1.0);
        assert_abs_diff_eq!(cdf.density(0.3), 0.5, epsilon = 1e-12);
        assert_eq!(cdf.density(2.5), 0.0);
        assert_abs_diff_eq!(cdf.ppf(0.25).unwrap(), 0.5, epsilon = 1e-12);

        let (mean, var) = cdf.moments().unwrap();
        assert_abs_diff_eq!(mean, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(var, 4.0 / 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_quantile_table_ppf_hits_knots() {
        let cdf = PiecewiseCdf::from_quantiles(&[0.1, 0.2, 0.4], &[0.1, 0.5, 0.9]);
        assert_abs_diff_eq!(cdf.ppf(0.5).unwrap(), 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(cdf.ppf(0.7).unwrap(), 0.3, epsilon = 1e-12);
        assert_eq!(cdf.ppf(0.05).unwrap(), 0.1);
        assert_eq!(cdf.ppf(0.95).unwrap(), 0.4);
        assert_abs_diff_eq!(cdf.inner_mass(), 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_ppf_rejects_bad_level() {
        let cdf = PiecewiseCdf::from_quantiles(&[0.0, 1.0], &[0.0, 1.0]);
        assert!(cdf.ppf(1.01).is_err());
        assert!(cdf.ppf(f64::NAN).is_err());
    }

    #[test]
    fn test_zero_mass_has_no_moments() {
        let cdf = PiecewiseCdf::from_density_steps(&[0.0, 1.0], &[0.0]);
        assert!(cdf.moments().is_err());
    }
}
