//! # qn-core
//!
//! Core types for qpnest.
//!
//! - [`DistType`]: the closed set of PDF parameterizations an ensemble can carry
//! - [`EnsembleTables`]: the metadata/data split an ensemble exposes for reshaping
//! - [`Ensemble`]: the trait conversion code is written against

#![warn(clippy::all)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::Ensemble;
pub use types::{ConversionTarget, DistType, EnsembleData, EnsembleMeta, EnsembleTables};
