//! Normal distribution utilities.

use qn_core::{Error, Result};
use statrs::function::erf::{erf_inv, erfc};

/// Natural log of `sqrt(2π)`.
const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_7;

fn check_sigma(sigma: f64) -> Result<()> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(Error::Validation(format!("sigma must be finite and > 0, got {}", sigma)));
    }
    Ok(())
}

/// Log-PDF of a Normal distribution `N(mu, sigma)` at `x`.
///
/// `log p(x) = -0.5 * ((x-mu)/sigma)^2 - ln(sigma) - ln(sqrt(2π))`
pub fn logpdf(x: f64, mu: f64, sigma: f64) -> Result<f64> {
    check_sigma(sigma)?;
    let z = (x - mu) / sigma;
    Ok(-0.5 * z * z - sigma.ln() - LN_SQRT_2PI)
}

/// PDF of `N(mu, sigma)` at `x`.
pub fn pdf(x: f64, mu: f64, sigma: f64) -> Result<f64> {
    Ok(logpdf(x, mu, sigma)?.exp())
}

/// CDF of `N(mu, sigma)` at `x`.
///
/// Uses `0.5 * erfc(-z/√2)`, which keeps precision in the lower tail.
pub fn cdf(x: f64, mu: f64, sigma: f64) -> Result<f64> {
    check_sigma(sigma)?;
    let z = (x - mu) / sigma;
    Ok(0.5 * erfc(-z / std::f64::consts::SQRT_2))
}

/// Quantile function (inverse CDF) of `N(mu, sigma)`.
pub fn ppf(q: f64, mu: f64, sigma: f64) -> Result<f64> {
    check_sigma(sigma)?;
    if !(0.0..=1.0).contains(&q) {
        return Err(Error::Validation(format!("quantile level must be in [0, 1], got {}", q)));
    }
    Ok(mu + sigma * std::f64::consts::SQRT_2 * erf_inv(2.0 * q - 1.0))
}
