// SPDX-License-Identifier: Apache-2.0

//! Batch construction helpers shared by this crate's and downstream crates'
//! tests. Not part of the public data-model API proper.

use std::sync::Arc;

use arrow_array::{Int64Array, RecordBatch};
use arrow_schema::{DataType, Field, Schema};

use crate::Batch;

/// Schema used throughout the test suite: a single `id` column.
#[must_use]
pub fn id_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![Field::new("id", DataType::Int64, false)]))
}

/// Builds a batch whose single `id` column holds the given row ids, in
/// order. An empty slice yields the EOF sentinel.
#[must_use]
pub fn id_batch(ids: &[i64]) -> Batch {
    let schema = id_schema();
    let array = Arc::new(Int64Array::from(ids.to_vec()));
    let record_batch = RecordBatch::try_new(schema, vec![array]).expect("schema matches column");
    Batch::new(record_batch)
}

/// Reads the `id` column back out of a batch built by [`id_batch`].
#[must_use]
pub fn row_ids(batch: &Batch) -> Vec<i64> {
    batch
        .as_record_batch()
        .column(0)
        .as_any()
        .downcast_ref::<Int64Array>()
        .expect("id column is Int64Array")
        .values()
        .to_vec()
}
