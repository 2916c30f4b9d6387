//! Probability building blocks for qpnest.
//!
//! This crate hosts the probability math behind [`PdfEnsemble`]:
//! - scalar distributions (normal, Gaussian mixture)
//! - grid helpers (linspace, trapezoid integration, linear interpolation)
//! - piecewise-linear CDFs for histogram/quantile/grid parameterizations

pub mod ensemble;
pub mod grid;
pub mod mixture;
pub mod normal;
pub mod piecewise;

pub use ensemble::{Parameterization, PdfEnsemble};
