//! Common data types for qpnest

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// PDF parameterization carried by every object of an ensemble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistType {
    /// Gaussian, one `loc`/`scale` pair per object
    Norm,
    /// Gaussian mixture, `means`/`stds`/`weights` per component
    Mixmod,
    /// Density sampled on a shared x grid
    Interp,
    /// Piecewise-constant density over shared bin edges
    Hist,
    /// Locations of shared quantile levels
    Quant,
}

impl DistType {
    /// All supported parameterizations.
    pub const ALL: [DistType; 5] =
        [DistType::Norm, DistType::Mixmod, DistType::Interp, DistType::Hist, DistType::Quant];

    /// Canonical short name, as stored in ensemble metadata.
    pub fn as_str(self) -> &'static str {
        match self {
            DistType::Norm => "norm",
            DistType::Mixmod => "mixmod",
            DistType::Interp => "interp",
            DistType::Hist => "hist",
            DistType::Quant => "quant",
        }
    }

    /// Per-object data columns, in table order.
    pub fn data_columns(self) -> &'static [&'static str] {
        match self {
            DistType::Norm => &["loc", "scale"],
            DistType::Mixmod => &["means", "stds", "weights"],
            DistType::Interp => &["yvals"],
            DistType::Hist => &["pdfs"],
            DistType::Quant => &["locs"],
        }
    }

    /// Name of the metadata axis shared by every object, if any.
    pub fn shared_axis(self) -> Option<&'static str> {
        match self {
            DistType::Norm | DistType::Mixmod => None,
            DistType::Interp => Some("xvals"),
            DistType::Hist => Some("bins"),
            DistType::Quant => Some("quants"),
        }
    }
}

impl fmt::Display for DistType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "norm" => Ok(DistType::Norm),
            "mixmod" => Ok(DistType::Mixmod),
            "interp" => Ok(DistType::Interp),
            "hist" => Ok(DistType::Hist),
            "quant" => Ok(DistType::Quant),
            other => Err(Error::UnsupportedDistType(other.to_string())),
        }
    }
}

/// Parameterization an ensemble can be re-expressed in, with its shared axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ConversionTarget {
    /// Histogram over the given bin edges
    Hist { bins: Vec<f64> },
    /// Quantile locations at the given levels
    Quant { quants: Vec<f64> },
    /// Density sampled at the given grid points
    Interp { xvals: Vec<f64> },
}

impl ConversionTarget {
    /// Parameterization the re-expressed ensemble will carry.
    pub fn dist_type(&self) -> DistType {
        match self {
            ConversionTarget::Hist { .. } => DistType::Hist,
            ConversionTarget::Quant { .. } => DistType::Quant,
            ConversionTarget::Interp { .. } => DistType::Interp,
        }
    }
}

/// Metadata section of an ensemble: the type tag plus shared axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleMeta {
    /// Parameterization name (`"norm"`, `"hist"`, ...).
    pub pdf_name: String,
    /// Shared axes in insertion order, e.g. `("bins", edges)`.
    pub axes: Vec<(String, Vec<f64>)>,
}

impl EnsembleMeta {
    /// Metadata without shared axes.
    pub fn new(dist_type: DistType) -> Self {
        Self { pdf_name: dist_type.as_str().to_string(), axes: Vec::new() }
    }

    /// Metadata with one shared axis.
    pub fn with_axis(dist_type: DistType, name: &str, values: Vec<f64>) -> Self {
        Self { pdf_name: dist_type.as_str().to_string(), axes: vec![(name.to_string(), values)] }
    }

    /// Parse the type tag.
    pub fn dist_type(&self) -> Result<DistType> {
        self.pdf_name.parse()
    }

    /// Look up a shared axis by name.
    pub fn axis(&self, name: &str) -> Option<&[f64]> {
        self.axes.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_slice())
    }
}

/// Data section of an ensemble: per-object arrays, one inner `Vec` per object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnsembleData {
    /// Columns in insertion order.
    pub columns: Vec<(String, Vec<Vec<f64>>)>,
}

impl EnsembleData {
    /// Append a column.
    pub fn push(&mut self, name: &str, values: Vec<Vec<f64>>) {
        self.columns.push((name.to_string(), values));
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&[Vec<f64>]> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_slice())
    }

    /// Number of objects, taken from the first column.
    pub fn npdf(&self) -> usize {
        self.columns.first().map_or(0, |(_, v)| v.len())
    }
}

/// Tabular view of an ensemble, split into metadata and data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleTables {
    pub meta: EnsembleMeta,
    pub data: EnsembleData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dist_type_names_roundtrip() {
        for t in DistType::ALL {
            assert_eq!(t.as_str().parse::<DistType>().unwrap(), t);
            assert_eq!(t.to_string(), t.as_str());
        }
    }

    #[test]
    fn test_unknown_dist_type_is_explicit_error() {
        let err = "spline".parse::<DistType>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedDistType(ref s) if s == "spline"));
    }

    #[test]
    fn test_shared_axis_only_for_grid_types() {
        assert_eq!(DistType::Norm.shared_axis(), None);
        assert_eq!(DistType::Mixmod.shared_axis(), None);
        assert_eq!(DistType::Interp.shared_axis(), Some("xvals"));
        assert_eq!(DistType::Hist.shared_axis(), Some("bins"));
        assert_eq!(DistType::Quant.shared_axis(), Some("quants"));
    }

    #[test]
    fn test_meta_axis_lookup() {
        let meta = EnsembleMeta::with_axis(DistType::Hist, "bins", vec![0.0, 1.0, 2.0]);
        assert_eq!(meta.dist_type().unwrap(), DistType::Hist);
        assert_eq!(meta.axis("bins"), Some(&[0.0, 1.0, 2.0][..]));
        assert!(meta.axis("xvals").is_none());
    }

    #[test]
    fn test_data_columns_keep_order() {
        let mut data = EnsembleData::default();
        data.push("loc", vec![vec![0.1], vec![0.5]]);
        data.push("scale", vec![vec![0.05], vec![0.1]]);
        assert_eq!(data.npdf(), 2);
        assert_eq!(data.columns[0].0, "loc");
        assert_eq!(data.column("scale").unwrap()[1], vec![0.1]);
    }

    #[test]
    fn test_conversion_target_serde_tagged() {
        let t = ConversionTarget::Quant { quants: vec![0.25, 0.5, 0.75] };
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("\"type\":\"quant\""));
        let back: ConversionTarget = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
        assert_eq!(back.dist_type(), DistType::Quant);
    }
}
