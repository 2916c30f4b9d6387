//! Core traits for qpnest
//!
//! Reshaping code only depends on [`Ensemble`], never on a concrete
//! probability backend. `qn-prob` provides the default implementation.

use crate::{ConversionTarget, EnsembleTables, Result};

/// A collection of per-object PDFs sharing one parameterization.
///
/// Implementations are read-only from the caller's perspective: every
/// operation either inspects the ensemble or builds a new one.
pub trait Ensemble: Sized {
    /// Number of objects
    fn npdf(&self) -> usize;

    /// Metadata/data split used for reshaping
    fn build_tables(&self) -> Result<EnsembleTables>;

    /// Re-express the same distributions under another parameterization
    fn convert_to(&self, target: &ConversionTarget) -> Result<Self>;

    /// Per-object mean
    fn mean(&self) -> Result<Vec<f64>>;

    /// Per-object standard deviation
    fn std(&self) -> Result<Vec<f64>>;

    /// Build a normal ensemble from per-object `loc`/`scale`
    fn from_norm(loc: Vec<f64>, scale: Vec<f64>) -> Result<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DistType, EnsembleData, EnsembleMeta, Error};

    struct DummyEnsemble {
        loc: Vec<f64>,
    }

    impl Ensemble for DummyEnsemble {
        fn npdf(&self) -> usize {
            self.loc.len()
        }

        fn build_tables(&self) -> Result<EnsembleTables> {
            let mut data = EnsembleData::default();
            data.push("loc", self.loc.iter().map(|&l| vec![l]).collect());
            data.push("scale", vec![vec![1.0]; self.loc.len()]);
            Ok(EnsembleTables { meta: EnsembleMeta::new(DistType::Norm), data })
        }

        fn convert_to(&self, target: &ConversionTarget) -> Result<Self> {
            Err(Error::Computation(format!("cannot convert to {}", target.dist_type())))
        }

        fn mean(&self) -> Result<Vec<f64>> {
            Ok(self.loc.clone())
        }

        fn std(&self) -> Result<Vec<f64>> {
            Ok(vec![1.0; self.loc.len()])
        }

        fn from_norm(loc: Vec<f64>, _scale: Vec<f64>) -> Result<Self> {
            Ok(Self { loc })
        }
    }

    #[test]
    fn test_dummy_ensemble() {
        let ens = DummyEnsemble::from_norm(vec![0.1, 0.2], vec![1.0, 1.0]).unwrap();
        assert_eq!(ens.npdf(), 2);
        let tables = ens.build_tables().unwrap();
        assert_eq!(tables.meta.dist_type().unwrap(), DistType::Norm);
        assert!(ens.convert_to(&ConversionTarget::Hist { bins: vec![0.0, 1.0] }).is_err());
    }
}
