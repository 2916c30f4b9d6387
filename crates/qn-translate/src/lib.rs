//! # qn-translate
//!
//! Reshape PDF ensembles into nested Arrow tables.
//!
//! - [`nested::flatten`]: one ensemble → one [`NestedTable`] (one outer row per object)
//! - [`convert::convert_ens`]: one ensemble → its identity table plus histogram,
//!   quantile, and interpolated/normal re-expressions, keyed by descriptive names

#![warn(clippy::all)]
#![allow(clippy::needless_range_loop)]

pub mod config;
pub mod convert;
pub mod error;
pub mod nested;

pub use config::ConversionConfig;
pub use convert::{ConvertedEnsembles, convert_ens, convert_ens_with_config, entry_key};
pub use error::{Result, TranslateError};
pub use nested::{NestedTable, flatten, flatten_tables};
