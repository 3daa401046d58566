// SPDX-License-Identifier: Apache-2.0

//! The batch data model shared by every channel in the pipeline.
//!
//! A [`Batch`] is an immutable, typed row-set backed by an Arrow
//! [`RecordBatch`](arrow_array::RecordBatch). It can be split into a
//! prefix/suffix by row count in constant time (Arrow slices share the
//! underlying buffers), and a zero-row batch is the canonical EOF sentinel on
//! any channel in this pipeline.

use arrow_array::RecordBatch;
use arrow_schema::SchemaRef;

pub mod testing;

/// An immutable, row-addressable chunk of events.
///
/// Cloning a `Batch` is cheap (it clones the underlying `Arc`-backed Arrow
/// arrays, not the data). Splitting is likewise cheap: [`Batch::split_at`]
/// never copies row data.
#[derive(Clone, Debug)]
pub struct Batch(RecordBatch);

impl Batch {
    /// Wraps an existing Arrow record batch.
    #[must_use]
    pub fn new(record_batch: RecordBatch) -> Self {
        Batch(record_batch)
    }

    /// The canonical EOF sentinel for a channel carrying batches with this
    /// schema: a record batch with zero rows.
    #[must_use]
    pub fn eof(schema: SchemaRef) -> Self {
        Batch(RecordBatch::new_empty(schema))
    }

    /// Number of rows in this batch.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.0.num_rows()
    }

    /// `true` if this batch is the zero-row EOF sentinel.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.row_count() == 0
    }

    /// This batch's schema.
    #[must_use]
    pub fn schema(&self) -> SchemaRef {
        self.0.schema()
    }

    /// Splits this batch into a prefix of `at` rows and the remaining
    /// suffix. `at` is clamped to the batch's row count, so splitting at or
    /// beyond the end yields an empty suffix rather than panicking.
    ///
    /// Both halves share the same underlying Arrow buffers as `self`; no row
    /// data is copied.
    #[must_use]
    pub fn split_at(&self, at: usize) -> (Batch, Batch) {
        let at = at.min(self.row_count());
        let head = self.0.slice(0, at);
        let tail = self.0.slice(at, self.row_count() - at);
        (Batch(head), Batch(tail))
    }

    /// Borrows the underlying Arrow record batch.
    #[must_use]
    pub fn as_record_batch(&self) -> &RecordBatch {
        &self.0
    }

    /// Unwraps into the underlying Arrow record batch.
    #[must_use]
    pub fn into_record_batch(self) -> RecordBatch {
        self.0
    }
}

impl From<RecordBatch> for Batch {
    fn from(record_batch: RecordBatch) -> Self {
        Batch::new(record_batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::id_batch;
    use pretty_assertions::assert_eq;

    #[test]
    fn split_preserves_all_rows() {
        let batch = id_batch(&[1, 2, 3, 4, 5]);
        let (head, tail) = batch.split_at(2);
        assert_eq!(testing::row_ids(&head), vec![1, 2]);
        assert_eq!(testing::row_ids(&tail), vec![3, 4, 5]);
    }

    #[test]
    fn split_beyond_len_yields_empty_suffix() {
        let batch = id_batch(&[1, 2]);
        let (head, tail) = batch.split_at(10);
        assert_eq!(testing::row_ids(&head), vec![1, 2]);
        assert!(tail.is_eof());
    }

    #[test]
    fn zero_row_batch_is_eof() {
        let batch = id_batch(&[]);
        assert!(batch.is_eof());
    }
}
