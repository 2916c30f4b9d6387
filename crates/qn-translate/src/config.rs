//! Parameters for deriving alternate representations.

use qn_core::{Error, Result};
use qn_prob::grid::linspace;
use serde::{Deserialize, Serialize};

/// Shared axis and quantile resolutions used by [`crate::convert_ens_with_config`].
///
/// The default is a 301-point axis over `[0, 3]` (used both as histogram
/// edges and interpolation grid) and quantile sets of 99, 20 and 5 levels
/// spanning `[0.01, 0.99]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    pub axis_min: f64,
    pub axis_max: f64,
    pub axis_points: usize,
    /// Number of quantile levels per derived quantile table, in output order.
    pub quantile_resolutions: Vec<usize>,
    pub quantile_min: f64,
    pub quantile_max: f64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            axis_min: 0.0,
            axis_max: 3.0,
            axis_points: 301,
            quantile_resolutions: vec![99, 20, 5],
            quantile_min: 0.01,
            quantile_max: 0.99,
        }
    }
}

impl ConversionConfig {
    /// Histogram edges / interpolation grid.
    pub fn axis(&self) -> Vec<f64> {
        linspace(self.axis_min, self.axis_max, self.axis_points)
    }

    /// `n` quantile levels spanning `[quantile_min, quantile_max]`.
    pub fn quantile_levels(&self, n: usize) -> Vec<f64> {
        linspace(self.quantile_min, self.quantile_max, n)
    }

    pub fn validate(&self) -> Result<()> {
        if self.axis_points < 2 {
            return Err(Error::Validation(format!(
                "axis_points must be >= 2, got {}",
                self.axis_points
            )));
        }
        if !(self.axis_min.is_finite() && self.axis_max.is_finite() && self.axis_min < self.axis_max)
        {
            return Err(Error::Validation(format!(
                "axis range [{}, {}] is empty or not finite",
                self.axis_min, self.axis_max
            )));
        }
        if !(0.0 < self.quantile_min
            && self.quantile_min <= self.quantile_max
            && self.quantile_max < 1.0)
        {
            return Err(Error::Validation(format!(
                "quantile range [{}, {}] must lie inside (0, 1)",
                self.quantile_min, self.quantile_max
            )));
        }
        if let Some(n) = self.quantile_resolutions.iter().find(|&&n| n == 0) {
            return Err(Error::Validation(format!("quantile resolution must be >= 1, got {}", n)));
        }
        Ok(())
    }
}
