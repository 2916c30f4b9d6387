//! Arrow-backed nested table.
//!
//! Schema of the backing [`RecordBatch`]:
//!
//! | Column        | Type                              | Description                    |
//! |---------------|-----------------------------------|--------------------------------|
//! | `object_id`   | `UInt64`                          | position of the object in the ensemble |
//! | `{tag}_data`  | `List<Struct<col: Float64, ...>>` | that object's flat rows        |

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray, Float64Array, ListArray, StructArray, UInt64Array};
use arrow::buffer::OffsetBuffer;
use arrow::datatypes::{DataType, Field, Fields, Float64Type, Schema};
use arrow::record_batch::RecordBatch;
use qn_core::DistType;

use crate::error::{Result, TranslateError};

/// One outer row per object, with that object's parameter arrays as nested columns.
#[derive(Debug, Clone, PartialEq)]
pub struct NestedTable {
    name: String,
    dist_type: DistType,
    columns: Vec<String>,
    batch: RecordBatch,
}

impl NestedTable {
    /// Assemble a table from flat column values and per-object row counts.
    ///
    /// `values[c]` holds column `c` for all objects back to back; `lengths[o]`
    /// is the number of nested rows of object `o`.
    pub(crate) fn from_columns(
        dist_type: DistType,
        columns: Vec<String>,
        values: Vec<Float64Array>,
        lengths: &[usize],
    ) -> Result<Self> {
        let name = format!("{}_data", dist_type);
        let fields: Fields =
            columns.iter().map(|c| Field::new(c.as_str(), DataType::Float64, false)).collect();
        let arrays: Vec<ArrayRef> = values.into_iter().map(|v| Arc::new(v) as ArrayRef).collect();
        let rows = StructArray::try_new(fields.clone(), arrays, None)?;

        let item = Arc::new(Field::new_list_field(DataType::Struct(fields), false));
        let nested = ListArray::try_new(
            item.clone(),
            OffsetBuffer::<i32>::from_lengths(lengths.iter().copied()),
            Arc::new(rows) as ArrayRef,
            None,
        )?;
        let object_id = UInt64Array::from_iter_values(0..lengths.len() as u64);

        let schema = Arc::new(Schema::new(vec![
            Field::new("object_id", DataType::UInt64, false),
            Field::new(name.as_str(), DataType::List(item), false),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![Arc::new(object_id) as ArrayRef, Arc::new(nested) as ArrayRef],
        )?;

        Ok(Self { name, dist_type, columns, batch })
    }

    /// `"{tag}_data"`, also the name of the nested column.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dist_type(&self) -> DistType {
        self.dist_type
    }

    /// Names of the nested (array-valued) columns, in order.
    pub fn nested_columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of outer rows (objects).
    pub fn n_objects(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn object_ids(&self) -> Vec<u64> {
        self.batch.column(0).as_primitive::<arrow::datatypes::UInt64Type>().values().to_vec()
    }

    /// Backing Arrow batch.
    pub fn record_batch(&self) -> &RecordBatch {
        &self.batch
    }

    fn nested(&self) -> &ListArray {
        self.batch.column(1).as_list::<i32>()
    }

    fn check_object(&self, index: usize) -> Result<()> {
        let n_objects = self.n_objects();
        if index >= n_objects {
            return Err(TranslateError::ObjectOutOfRange { index, n_objects });
        }
        Ok(())
    }

    /// Number of nested rows of object `index`.
    pub fn nested_len(&self, index: usize) -> Result<usize> {
        self.check_object(index)?;
        Ok(self.nested().value_length(index) as usize)
    }

    /// Values of nested column `column` for object `index`.
    pub fn nested_values(&self, index: usize, column: &str) -> Result<Vec<f64>> {
        self.check_object(index)?;
        let col = self
            .columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| TranslateError::MissingNestedColumn(column.to_string()))?;
        let nested = self.nested();
        let offsets = nested.value_offsets();
        let (start, end) = (offsets[index] as usize, offsets[index + 1] as usize);
        let values = nested.values().as_struct().column(col).as_primitive::<Float64Type>();
        Ok(values.values()[start..end].to_vec())
    }

    /// Flat view: one row per (object, nested row), `object_id` repeated.
    pub fn to_flat(&self) -> Result<RecordBatch> {
        let nested = self.nested();
        let offsets = nested.value_offsets();
        let first = offsets[0] as usize;
        let total = offsets[offsets.len() - 1] as usize - first;

        let mut ids = Vec::with_capacity(total);
        for (id, w) in self.object_ids().into_iter().zip(offsets.windows(2)) {
            ids.extend(std::iter::repeat_n(id, (w[1] - w[0]) as usize));
        }

        let rows = nested.values().as_struct();
        let mut fields = vec![Field::new("object_id", DataType::UInt64, false)];
        let mut arrays: Vec<ArrayRef> = vec![Arc::new(UInt64Array::from(ids))];
        for (name, column) in self.columns.iter().zip(rows.columns()) {
            fields.push(Field::new(name.as_str(), DataType::Float64, false));
            arrays.push(column.slice(first, total));
        }
        Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?)
    }
}
