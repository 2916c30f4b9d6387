//! Nested-table representation of PDF ensembles.
//!
//! An ensemble of `N` objects becomes one Arrow batch with `N` rows. Each
//! row carries the object id and a list column holding that object's
//! parameter arrays as rows of a struct, one field per array:
//!
//! | tag      | nested columns                  | rows per object    |
//! |----------|---------------------------------|--------------------|
//! | `norm`   | `loc`, `scale`                  | 1                  |
//! | `mixmod` | `means`, `stds`, `weights`      | components         |
//! | `interp` | `yvals`, `xvals`                | `len(xvals)`       |
//! | `hist`   | `pdfs`, `bins`                  | `len(bins) - 1`    |
//! | `quant`  | `locs`, `quants`                | `len(quants)`      |
//!
//! Histogram rows pair each density with its lower bin edge; the trailing
//! edge is dropped.

pub mod flatten;
pub mod table;

pub use flatten::{flatten, flatten_tables};
pub use table::NestedTable;
