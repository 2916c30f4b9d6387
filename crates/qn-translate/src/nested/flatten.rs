//! Ensemble → nested table.

use arrow::array::Float64Builder;
use qn_core::{DistType, Ensemble, EnsembleTables, Error};

use super::table::NestedTable;
use crate::error::Result;

/// Per-object data columns plus the optional shared axis, resolved for one tag.
struct ColumnLayout<'a> {
    data: Vec<(&'a str, &'a [Vec<f64>])>,
    axis: Option<(&'a str, &'a [f64])>,
}

impl<'a> ColumnLayout<'a> {
    fn resolve(dist_type: DistType, tables: &'a EnsembleTables) -> Result<Self> {
        let mut data = Vec::with_capacity(dist_type.data_columns().len());
        for &name in dist_type.data_columns() {
            let column = tables.data.column(name).ok_or_else(|| {
                Error::Validation(format!("{} ensemble is missing data column '{}'", dist_type, name))
            })?;
            data.push((name, column));
        }

        let n_objects = data[0].1.len();
        if let Some((name, column)) = data.iter().find(|(_, c)| c.len() != n_objects) {
            return Err(Error::Validation(format!(
                "data column '{}' has {} objects, expected {}",
                name,
                column.len(),
                n_objects
            ))
            .into());
        }

        let axis = match dist_type.shared_axis() {
            None => None,
            Some(name) => {
                let values = tables.meta.axis(name).ok_or_else(|| {
                    Error::Validation(format!("{} ensemble is missing metadata '{}'", dist_type, name))
                })?;
                Some((name, values))
            }
        };

        Ok(Self { data, axis })
    }

    fn n_objects(&self) -> usize {
        self.data[0].1.len()
    }

    fn column_names(&self) -> Vec<String> {
        self.data
            .iter()
            .map(|(name, _)| *name)
            .chain(self.axis.map(|(name, _)| name))
            .map(str::to_string)
            .collect()
    }

    /// Nested row count of object `obj`, checked against every column.
    fn object_len(&self, dist_type: DistType, obj: usize) -> Result<usize> {
        let n = self.data[0].1[obj].len();
        for (name, column) in &self.data[1..] {
            if column[obj].len() != n {
                return Err(Error::Validation(format!(
                    "object {}: column '{}' has length {}, expected {}",
                    obj,
                    name,
                    column[obj].len(),
                    n
                ))
                .into());
            }
        }
        if let Some((name, values)) = self.axis {
            // Bin edges bracket the densities, so there is one more edge than density.
            let expected = if dist_type == DistType::Hist { n + 1 } else { n };
            if values.len() != expected {
                return Err(Error::Validation(format!(
                    "object {}: '{}' has length {}, expected {}",
                    obj,
                    name,
                    values.len(),
                    expected
                ))
                .into());
            }
        }
        Ok(n)
    }
}

/// Flatten an ensemble into a nested table keyed by object id.
pub fn flatten<E: Ensemble>(ens: &E) -> Result<NestedTable> {
    let tables = ens.build_tables()?;
    flatten_tables(&tables)
}

/// Flatten already-built ensemble tables.
///
/// Each object contributes one nested row per index of its first data
/// column; shared axes are read in place rather than replicated per object.
/// Rows whose first data value is NaN are skipped.
pub fn flatten_tables(tables: &EnsembleTables) -> Result<NestedTable> {
    let dist_type = tables.meta.dist_type()?;
    let layout = ColumnLayout::resolve(dist_type, tables)?;
    let n_objects = layout.n_objects();

    let n_columns = layout.data.len() + usize::from(layout.axis.is_some());
    let mut builders: Vec<Float64Builder> = (0..n_columns).map(|_| Float64Builder::new()).collect();
    let mut lengths = Vec::with_capacity(n_objects);

    for obj in 0..n_objects {
        let n = layout.object_len(dist_type, obj)?;
        let first = &layout.data[0].1[obj];
        let mut kept = 0;
        for i in 0..n {
            if first[i].is_nan() {
                continue;
            }
            for (builder, (_, column)) in builders.iter_mut().zip(&layout.data) {
                builder.append_value(column[obj][i]);
            }
            if let Some((_, values)) = layout.axis {
                // i < n, so a histogram's trailing edge is never emitted.
                builders[n_columns - 1].append_value(values[i]);
            }
            kept += 1;
        }
        lengths.push(kept);
    }

    let values = builders.iter_mut().map(|b| b.finish()).collect();
    NestedTable::from_columns(dist_type, layout.column_names(), values, &lengths)
}
