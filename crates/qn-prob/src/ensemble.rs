//! In-memory PDF ensemble.
//!
//! [`PdfEnsemble`] stores one [`Parameterization`] for all of its objects and
//! implements [`qn_core::Ensemble`]: tabular export, re-expression into
//! histogram/quantile/grid form, and per-object moments.
//!
//! Grid-based parameterizations are normalized on construction:
//! - `interp`: `yvals` integrate to 1 under the trapezoid rule
//! - `hist`: `Σ pdfs_i · (bins_{i+1} − bins_i) = 1`
//! - `mixmod`: component weights sum to 1
//!
//! Re-expression keeps going past objects with no mass on the target axis:
//! such an object gets an all-zero histogram row or an all-NaN grid row.

use qn_core::{
    ConversionTarget, DistType, Ensemble, EnsembleData, EnsembleMeta, EnsembleTables, Error,
    Result,
};

use crate::grid::{self, check_increasing_axis};
use crate::mixture;
use crate::normal;
use crate::piecewise::PiecewiseCdf;

/// Parameter arrays for every object of an ensemble.
///
/// Per-object arrays are indexed `[object][i]`; shared axes are stored once.
#[derive(Debug, Clone, PartialEq)]
pub enum Parameterization {
    Norm { loc: Vec<f64>, scale: Vec<f64> },
    Mixmod { means: Vec<Vec<f64>>, stds: Vec<Vec<f64>>, weights: Vec<Vec<f64>> },
    Interp { xvals: Vec<f64>, yvals: Vec<Vec<f64>> },
    Hist { bins: Vec<f64>, pdfs: Vec<Vec<f64>> },
    Quant { quants: Vec<f64>, locs: Vec<Vec<f64>> },
}

impl Parameterization {
    pub fn dist_type(&self) -> DistType {
        match self {
            Parameterization::Norm { .. } => DistType::Norm,
            Parameterization::Mixmod { .. } => DistType::Mixmod,
            Parameterization::Interp { .. } => DistType::Interp,
            Parameterization::Hist { .. } => DistType::Hist,
            Parameterization::Quant { .. } => DistType::Quant,
        }
    }

    pub fn npdf(&self) -> usize {
        match self {
            Parameterization::Norm { loc, .. } => loc.len(),
            Parameterization::Mixmod { means, .. } => means.len(),
            Parameterization::Interp { yvals, .. } => yvals.len(),
            Parameterization::Hist { pdfs, .. } => pdfs.len(),
            Parameterization::Quant { locs, .. } => locs.len(),
        }
    }
}

/// Collection of per-object PDFs sharing one parameterization.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfEnsemble {
    params: Parameterization,
}

/// One object's distribution, with any CDF tables precomputed.
enum ObjectDist<'a> {
    Normal { mu: f64, sigma: f64 },
    Mixture { means: &'a [f64], stds: &'a [f64], weights: &'a [f64] },
    Grid { xvals: &'a [f64], yvals: &'a [f64], cdf: PiecewiseCdf },
    Steps(PiecewiseCdf),
}

impl ObjectDist<'_> {
    fn pdf(&self, x: f64) -> Result<f64> {
        match self {
            ObjectDist::Normal { mu, sigma } => normal::pdf(x, *mu, *sigma),
            ObjectDist::Mixture { means, stds, weights } => mixture::pdf(x, means, stds, weights),
            ObjectDist::Grid { xvals, yvals, .. } => {
                if x < xvals[0] || x > xvals[xvals.len() - 1] {
                    Ok(0.0)
                } else {
                    Ok(grid::interp(x, xvals, yvals))
                }
            }
            ObjectDist::Steps(cdf) => Ok(cdf.density(x)),
        }
    }

    fn cdf(&self, x: f64) -> Result<f64> {
        match self {
            ObjectDist::Normal { mu, sigma } => normal::cdf(x, *mu, *sigma),
            ObjectDist::Mixture { means, stds, weights } => mixture::cdf(x, means, stds, weights),
            ObjectDist::Grid { cdf, .. } | ObjectDist::Steps(cdf) => Ok(cdf.cdf(x)),
        }
    }

    fn ppf(&self, q: f64) -> Result<f64> {
        match self {
            ObjectDist::Normal { mu, sigma } => normal::ppf(q, *mu, *sigma),
            ObjectDist::Mixture { means, stds, weights } => mixture::ppf(q, means, stds, weights),
            ObjectDist::Grid { cdf, .. } | ObjectDist::Steps(cdf) => cdf.ppf(q),
        }
    }

    /// `(mean, variance)`
    fn moments(&self) -> Result<(f64, f64)> {
        match self {
            ObjectDist::Normal { mu, sigma } => Ok((*mu, sigma * sigma)),
            ObjectDist::Mixture { means, stds, weights } => {
                Ok(mixture::moments(means, stds, weights))
            }
            ObjectDist::Grid { xvals, yvals, .. } => {
                let mass = grid::trapezoid(xvals, yvals);
                let xy: Vec<f64> = xvals.iter().zip(yvals.iter()).map(|(x, y)| x * y).collect();
                let xxy: Vec<f64> = xvals.iter().zip(xy.iter()).map(|(x, v)| x * v).collect();
                let mean = grid::trapezoid(xvals, &xy) / mass;
                let var = (grid::trapezoid(xvals, &xxy) / mass - mean * mean).max(0.0);
                Ok((mean, var))
            }
            ObjectDist::Steps(cdf) => cdf.moments(),
        }
    }
}

fn check_finite_rows(name: &str, rows: &[Vec<f64>], non_negative: bool) -> Result<()> {
    for (i, row) in rows.iter().enumerate() {
        if row.iter().any(|v| !v.is_finite() || (non_negative && *v < 0.0)) {
            let what = if non_negative { "finite and >= 0" } else { "finite" };
            return Err(Error::Validation(format!("{}[{}] must be {}", name, i, what)));
        }
    }
    Ok(())
}

fn check_row_lengths(name: &str, rows: &[Vec<f64>], expected: usize) -> Result<()> {
    for (i, row) in rows.iter().enumerate() {
        if row.len() != expected {
            return Err(Error::Validation(format!(
                "{}[{}] has length {}, expected {}",
                name, i, row.len(), expected
            )));
        }
    }
    Ok(())
}

fn check_npdf(name: &str, len: usize, npdf: usize) -> Result<()> {
    if len != npdf {
        return Err(Error::Validation(format!("{} has {} objects, expected {}", name, len, npdf)));
    }
    Ok(())
}

impl PdfEnsemble {
    /// Validate and normalize `params`.
    pub fn new(params: Parameterization) -> Result<Self> {
        let params = match params {
            Parameterization::Norm { loc, scale } => {
                check_npdf("scale", scale.len(), loc.len())?;
                if loc.iter().any(|v| !v.is_finite()) {
                    return Err(Error::Validation("loc must be finite".to_string()));
                }
                if let Some(s) = scale.iter().find(|s| !s.is_finite() || **s <= 0.0) {
                    return Err(Error::Validation(format!("scale must be finite and > 0, got {}", s)));
                }
                Parameterization::Norm { loc, scale }
            }
            Parameterization::Mixmod { means, stds, weights } => {
                let n = means.len();
                check_npdf("stds", stds.len(), n)?;
                check_npdf("weights", weights.len(), n)?;
                check_finite_rows("means", &means, false)?;
                check_finite_rows("stds", &stds, true)?;
                let mut normed: Vec<Vec<f64>> = Vec::with_capacity(n);
                for i in 0..n {
                    let ncomp = means[i].len();
                    if ncomp == 0 {
                        return Err(Error::Validation(format!("means[{}] has no components", i)));
                    }
                    if stds[i].len() != ncomp || weights[i].len() != ncomp {
                        return Err(Error::Validation(format!(
                            "object {}: means/stds/weights component counts differ",
                            i
                        )));
                    }
                    if stds[i].iter().any(|s| *s <= 0.0) {
                        return Err(Error::Validation(format!("stds[{}] must be > 0", i)));
                    }
                    normed.push(mixture::normalize_weights(&weights[i])?);
                }
                Parameterization::Mixmod { means, stds, weights: normed }
            }
            Parameterization::Interp { xvals, yvals } => {
                check_increasing_axis("xvals", &xvals, 2)?;
                check_row_lengths("yvals", &yvals, xvals.len())?;
                check_finite_rows("yvals", &yvals, true)?;
                let mut normed: Vec<Vec<f64>> = Vec::with_capacity(yvals.len());
                for (i, row) in yvals.into_iter().enumerate() {
                    let mass = grid::trapezoid(&xvals, &row);
                    if mass <= 0.0 {
                        return Err(Error::Validation(format!("yvals[{}] integrates to zero", i)));
                    }
                    normed.push(row.into_iter().map(|y| y / mass).collect());
                }
                Parameterization::Interp { xvals, yvals: normed }
            }
            Parameterization::Hist { bins, pdfs } => {
                check_increasing_axis("bins", &bins, 2)?;
                check_row_lengths("pdfs", &pdfs, bins.len() - 1)?;
                check_finite_rows("pdfs", &pdfs, true)?;
                let mut normed: Vec<Vec<f64>> = Vec::with_capacity(pdfs.len());
                for (i, row) in pdfs.into_iter().enumerate() {
                    let mass: f64 = bins.windows(2).zip(&row).map(|(w, p)| p * (w[1] - w[0])).sum();
                    if mass <= 0.0 {
                        return Err(Error::Validation(format!("pdfs[{}] has zero mass", i)));
                    }
                    normed.push(row.into_iter().map(|p| p / mass).collect());
                }
                Parameterization::Hist { bins, pdfs: normed }
            }
            Parameterization::Quant { quants, locs } => {
                check_increasing_axis("quants", &quants, 1)?;
                if quants[0] < 0.0 || quants[quants.len() - 1] > 1.0 {
                    return Err(Error::Validation("quants must lie in [0, 1]".to_string()));
                }
                check_row_lengths("locs", &locs, quants.len())?;
                for (i, row) in locs.iter().enumerate() {
                    check_increasing_axis(&format!("locs[{}]", i), row, 1)?;
                }
                Parameterization::Quant { quants, locs }
            }
        };
        Ok(Self { params })
    }

    pub fn norm(loc: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        Self::new(Parameterization::Norm { loc, scale })
    }

    pub fn mixmod(
        means: Vec<Vec<f64>>,
        stds: Vec<Vec<f64>>,
        weights: Vec<Vec<f64>>,
    ) -> Result<Self> {
        Self::new(Parameterization::Mixmod { means, stds, weights })
    }

    pub fn interp(xvals: Vec<f64>, yvals: Vec<Vec<f64>>) -> Result<Self> {
        Self::new(Parameterization::Interp { xvals, yvals })
    }

    pub fn hist(bins: Vec<f64>, pdfs: Vec<Vec<f64>>) -> Result<Self> {
        Self::new(Parameterization::Hist { bins, pdfs })
    }

    pub fn quant(quants: Vec<f64>, locs: Vec<Vec<f64>>) -> Result<Self> {
        Self::new(Parameterization::Quant { quants, locs })
    }

    /// Rebuild an ensemble from its tabular form (inverse of `build_tables`).
    pub fn from_tables(tables: &EnsembleTables) -> Result<Self> {
        let dist_type = tables.meta.dist_type()?;
        let column = |name: &str| -> Result<Vec<Vec<f64>>> {
            tables
                .data
                .column(name)
                .map(|c| c.to_vec())
                .ok_or_else(|| Error::Validation(format!("missing data column '{}'", name)))
        };
        let axis = |name: &str| -> Result<Vec<f64>> {
            tables
                .meta
                .axis(name)
                .map(|a| a.to_vec())
                .ok_or_else(|| Error::Validation(format!("missing metadata axis '{}'", name)))
        };
        let scalar = |name: &str| -> Result<Vec<f64>> {
            column(name)?
                .into_iter()
                .enumerate()
                .map(|(i, row)| match row.as_slice() {
                    [v] => Ok(*v),
                    _ => Err(Error::Validation(format!(
                        "{}[{}] must hold exactly one value, got {}",
                        name,
                        i,
                        row.len()
                    ))),
                })
                .collect()
        };

        match dist_type {
            DistType::Norm => Self::norm(scalar("loc")?, scalar("scale")?),
            DistType::Mixmod => Self::mixmod(column("means")?, column("stds")?, column("weights")?),
            DistType::Interp => Self::interp(axis("xvals")?, column("yvals")?),
            DistType::Hist => Self::hist(axis("bins")?, column("pdfs")?),
            DistType::Quant => Self::quant(axis("quants")?, column("locs")?),
        }
    }

    pub fn params(&self) -> &Parameterization {
        &self.params
    }

    pub fn dist_type(&self) -> DistType {
        self.params.dist_type()
    }

    /// PDF of object `obj` at `x`.
    pub fn pdf(&self, obj: usize, x: f64) -> Result<f64> {
        self.object(obj)?.pdf(x)
    }

    /// CDF of object `obj` at `x`.
    pub fn cdf(&self, obj: usize, x: f64) -> Result<f64> {
        self.object(obj)?.cdf(x)
    }

    /// Quantile of object `obj` at level `q`.
    pub fn ppf(&self, obj: usize, q: f64) -> Result<f64> {
        self.object(obj)?.ppf(q)
    }

    fn object(&self, obj: usize) -> Result<ObjectDist<'_>> {
        let n = self.params.npdf();
        if obj >= n {
            return Err(Error::Validation(format!(
                "object index {} out of range for ensemble of {}",
                obj, n
            )));
        }
        Ok(match &self.params {
            Parameterization::Norm { loc, scale } => {
                ObjectDist::Normal { mu: loc[obj], sigma: scale[obj] }
            }
            Parameterization::Mixmod { means, stds, weights } => ObjectDist::Mixture {
                means: &means[obj],
                stds: &stds[obj],
                weights: &weights[obj],
            },
            Parameterization::Interp { xvals, yvals } => ObjectDist::Grid {
                xvals,
                yvals: &yvals[obj],
                cdf: PiecewiseCdf::from_grid(xvals, &yvals[obj]),
            },
            Parameterization::Hist { bins, pdfs } => {
                ObjectDist::Steps(PiecewiseCdf::from_density_steps(bins, &pdfs[obj]))
            }
            Parameterization::Quant { quants, locs } => {
                ObjectDist::Steps(PiecewiseCdf::from_quantiles(&locs[obj], quants))
            }
        })
    }

    fn moments(&self) -> Result<Vec<(f64, f64)>> {
        (0..self.npdf()).map(|i| self.object(i)?.moments()).collect()
    }

    /// Objects with no mass inside `bins` get an all-zero row; the others are normalized.
    fn to_hist(&self, bins: &[f64]) -> Result<Self> {
        check_increasing_axis("bins", bins, 2)?;
        let mut pdfs = Vec::with_capacity(self.npdf());
        for i in 0..self.npdf() {
            let obj = self.object(i)?;
            let cdfs = bins.iter().map(|&b| obj.cdf(b)).collect::<Result<Vec<f64>>>()?;
            let mass = cdfs[cdfs.len() - 1] - cdfs[0];
            if !(mass > 0.0) {
                let (lo, hi) = (bins[0], bins[bins.len() - 1]);
                log::warn!("object {} has no probability mass inside [{}, {}]", i, lo, hi);
                pdfs.push(vec![0.0; bins.len() - 1]);
                continue;
            }
            pdfs.push(
                bins.windows(2)
                    .zip(cdfs.windows(2))
                    .map(|(b, c)| (c[1] - c[0]) / (b[1] - b[0]) / mass)
                    .collect(),
            );
        }
        Ok(Self { params: Parameterization::Hist { bins: bins.to_vec(), pdfs } })
    }

    /// Objects with no density on `xvals` get an all-NaN row; the others are normalized.
    fn to_interp(&self, xvals: &[f64]) -> Result<Self> {
        check_increasing_axis("xvals", xvals, 2)?;
        let mut yvals = Vec::with_capacity(self.npdf());
        for i in 0..self.npdf() {
            let obj = self.object(i)?;
            let row = xvals.iter().map(|&x| obj.pdf(x)).collect::<Result<Vec<f64>>>()?;
            let mass = grid::trapezoid(xvals, &row);
            if !(mass > 0.0) {
                let (lo, hi) = (xvals[0], xvals[xvals.len() - 1]);
                log::debug!("object {} has no density on [{}, {}]", i, lo, hi);
                yvals.push(vec![f64::NAN; xvals.len()]);
                continue;
            }
            yvals.push(row.into_iter().map(|y| y / mass).collect());
        }
        Ok(Self { params: Parameterization::Interp { xvals: xvals.to_vec(), yvals } })
    }

    fn to_quant(&self, quants: &[f64]) -> Result<Self> {
        check_increasing_axis("quants", quants, 1)?;
        let mut locs = Vec::with_capacity(self.npdf());
        for i in 0..self.npdf() {
            let obj = self.object(i)?;
            let row = quants.iter().map(|&q| obj.ppf(q)).collect::<Result<Vec<f64>>>()?;
            if row.iter().any(|v| !v.is_finite()) {
                return Err(Error::Computation(format!("object {}: non-finite quantile", i)));
            }
            if row.windows(2).any(|w| w[1] <= w[0]) {
                return Err(Error::Computation(format!(
                    "object {}: quantile locations are not strictly increasing",
                    i
                )));
            }
            locs.push(row);
        }
        Self::quant(quants.to_vec(), locs)
    }
}

fn singletons(values: &[f64]) -> Vec<Vec<f64>> {
    values.iter().map(|&v| vec![v]).collect()
}

impl Ensemble for PdfEnsemble {
    fn npdf(&self) -> usize {
        self.params.npdf()
    }

    fn build_tables(&self) -> Result<EnsembleTables> {
        let mut data = EnsembleData::default();
        let meta = match &self.params {
            Parameterization::Norm { loc, scale } => {
                data.push("loc", singletons(loc));
                data.push("scale", singletons(scale));
                EnsembleMeta::new(DistType::Norm)
            }
            Parameterization::Mixmod { means, stds, weights } => {
                data.push("means", means.clone());
                data.push("stds", stds.clone());
                data.push("weights", weights.clone());
                EnsembleMeta::new(DistType::Mixmod)
            }
            Parameterization::Interp { xvals, yvals } => {
                data.push("yvals", yvals.clone());
                EnsembleMeta::with_axis(DistType::Interp, "xvals", xvals.clone())
            }
            Parameterization::Hist { bins, pdfs } => {
                data.push("pdfs", pdfs.clone());
                EnsembleMeta::with_axis(DistType::Hist, "bins", bins.clone())
            }
            Parameterization::Quant { quants, locs } => {
                data.push("locs", locs.clone());
                EnsembleMeta::with_axis(DistType::Quant, "quants", quants.clone())
            }
        };
        Ok(EnsembleTables { meta, data })
    }

    fn convert_to(&self, target: &ConversionTarget) -> Result<Self> {
        match target {
            ConversionTarget::Hist { bins } => self.to_hist(bins),
            ConversionTarget::Quant { quants } => self.to_quant(quants),
            ConversionTarget::Interp { xvals } => self.to_interp(xvals),
        }
    }

    fn mean(&self) -> Result<Vec<f64>> {
        Ok(self.moments()?.into_iter().map(|(m, _)| m).collect())
    }

    fn std(&self) -> Result<Vec<f64>> {
        Ok(self.moments()?.into_iter().map(|(_, v)| v.sqrt()).collect())
    }

    fn from_norm(loc: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        Self::norm(loc, scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn two_normals() -> PdfEnsemble {
        PdfEnsemble::norm(vec![0.1, 0.5], vec![0.05, 0.1]).unwrap()
    }

    #[test]
    fn test_norm_tables() {
        let tables = two_normals().build_tables().unwrap();
        assert_eq!(tables.meta.pdf_name, "norm");
        assert!(tables.meta.axes.is_empty());
        assert_eq!(tables.data.columns[0].0, "loc");
        assert_eq!(tables.data.column("loc").unwrap(), &[vec![0.1], vec![0.5]]);
        assert_eq!(tables.data.column("scale").unwrap(), &[vec![0.05], vec![0.1]]);
    }

    #[test]
    fn test_norm_rejects_bad_scale() {
        assert!(PdfEnsemble::norm(vec![0.1], vec![0.0]).is_err());
        assert!(PdfEnsemble::norm(vec![0.1, 0.2], vec![0.1]).is_err());
    }

    #[test]
    fn test_object_count_mismatch_message() {
        let err = PdfEnsemble::mixmod(vec![vec![0.3], vec![0.7]], vec![vec![0.1], vec![0.1]], vec![vec![1.0]])
            .unwrap_err();
        assert!(matches!(&err, Error::Validation(msg) if msg == "weights has 1 objects, expected 2"), "{}", err);
    }

    #[test]
    fn test_hist_is_normalized() {
        let ens = PdfEnsemble::hist(vec![0.0, 1.0, 3.0], vec![vec![2.0, 1.0]]).unwrap();
        let Parameterization::Hist { pdfs, .. } = ens.params() else { panic!("expected hist") };
        // mass = 2*1 + 1*2 = 4
        assert_abs_diff_eq!(pdfs[0][0], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(pdfs[0][1], 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(ens.cdf(0, 1.0).unwrap(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_hist_shape_mismatch() {
        assert!(PdfEnsemble::hist(vec![0.0, 1.0, 2.0], vec![vec![1.0, 1.0, 1.0]]).is_err());
        assert!(PdfEnsemble::hist(vec![0.0, 1.0], vec![vec![0.0]]).is_err());
    }

    #[test]
    fn test_norm_to_hist() {
        let bins = grid::linspace(0.0, 3.0, 301);
        let hist = two_normals().convert_to(&ConversionTarget::Hist { bins: bins.clone() }).unwrap();
        assert_eq!(hist.dist_type(), DistType::Hist);
        let tables = hist.build_tables().unwrap();
        assert_eq!(tables.meta.axis("bins").unwrap().len(), 301);
        for row in tables.data.column("pdfs").unwrap() {
            assert_eq!(row.len(), 300);
            let mass: f64 = row.iter().map(|p| p * 0.01).sum();
            assert_abs_diff_eq!(mass, 1.0, epsilon = 1e-9);
        }
        let means = hist.mean().unwrap();
        assert_abs_diff_eq!(means[1], 0.5, epsilon = 1e-3);
    }

    #[test]
    fn test_norm_to_interp_and_back_to_moments() {
        let xvals = grid::linspace(0.0, 3.0, 301);
        let interp = two_normals().convert_to(&ConversionTarget::Interp { xvals }).unwrap();
        assert_eq!(interp.dist_type(), DistType::Interp);
        let mean = interp.mean().unwrap();
        let std = interp.std().unwrap();
        assert_abs_diff_eq!(mean[1], 0.5, epsilon = 1e-3);
        assert_abs_diff_eq!(std[1], 0.1, epsilon = 2e-3);
        // First object is truncated at 0, so its mean shifts up slightly.
        assert!(mean[0] > 0.1);
    }

    #[test]
    fn test_norm_to_quant() {
        let quants = grid::linspace(0.01, 0.99, 5);
        let q = two_normals().convert_to(&ConversionTarget::Quant { quants }).unwrap();
        let Parameterization::Quant { locs, .. } = q.params() else { panic!("expected quant") };
        assert_eq!(locs[0].len(), 5);
        assert_abs_diff_eq!(locs[1][2], 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_interp_to_quant_matches_normal() {
        let xvals = grid::linspace(0.0, 3.0, 301);
        let interp = two_normals().convert_to(&ConversionTarget::Interp { xvals }).unwrap();
        let quants = grid::linspace(0.01, 0.99, 20);
        let q = interp.convert_to(&ConversionTarget::Quant { quants: quants.clone() }).unwrap();
        let median = q.ppf(1, 0.5).unwrap();
        assert_abs_diff_eq!(median, 0.5, epsilon = 5e-3);
    }

    #[test]
    fn test_hist_outside_support_gives_zero_row() {
        let ens = PdfEnsemble::norm(vec![0.5, 10.0], vec![0.2, 0.01]).unwrap();
        let hist = ens.convert_to(&ConversionTarget::Hist { bins: vec![0.0, 0.5, 1.0] }).unwrap();
        let Parameterization::Hist { pdfs, .. } = hist.params() else { panic!("expected hist") };
        assert_eq!(pdfs[1], vec![0.0, 0.0]);
        assert_abs_diff_eq!(pdfs[0][0] * 0.5 + pdfs[0][1] * 0.5, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_interp_outside_support_gives_nan_row() {
        let ens = PdfEnsemble::norm(vec![0.5, 40.0], vec![0.2, 0.1]).unwrap();
        let xvals = grid::linspace(0.0, 1.0, 11);
        let interp = ens.convert_to(&ConversionTarget::Interp { xvals: xvals.clone() }).unwrap();
        let Parameterization::Interp { yvals, .. } = interp.params() else {
            panic!("expected interp")
        };
        assert!(yvals[1].iter().all(|y| y.is_nan()));
        assert_abs_diff_eq!(grid::trapezoid(&xvals, &yvals[0]), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mixmod_roundtrip_through_tables() {
        let ens = PdfEnsemble::mixmod(
            vec![vec![0.2, 0.8]],
            vec![vec![0.05, 0.1]],
            vec![vec![3.0, 1.0]],
        )
        .unwrap();
        let tables = ens.build_tables().unwrap();
        assert_eq!(tables.data.column("weights").unwrap()[0], vec![0.75, 0.25]);
        let back = PdfEnsemble::from_tables(&tables).unwrap();
        assert_eq!(back, ens);
        assert_abs_diff_eq!(ens.mean().unwrap()[0], 0.35, epsilon = 1e-12);
    }

    #[test]
    fn test_from_tables_unknown_type() {
        let mut tables = two_normals().build_tables().unwrap();
        tables.meta.pdf_name = "spline".to_string();
        assert!(matches!(
            PdfEnsemble::from_tables(&tables),
            Err(Error::UnsupportedDistType(_))
        ));
    }

    #[test]
    fn test_quant_requires_increasing_locs() {
        assert!(PdfEnsemble::quant(vec![0.25, 0.75], vec![vec![0.3, 0.2]]).is_err());
        assert!(PdfEnsemble::quant(vec![0.25, 1.5], vec![vec![0.1, 0.2]]).is_err());
        let q = PdfEnsemble::quant(vec![0.25, 0.75], vec![vec![0.1, 0.3]]).unwrap();
        assert_abs_diff_eq!(q.mean().unwrap()[0], 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_object_out_of_range() {
        assert!(two_normals().pdf(2, 0.0).is_err());
    }
}
