//! Batch accumulation
//!
//! Rows are grouped by parent count, not row count: a batch closes after every
//! tenth parent and after the last parent, however many rows that is.

use crate::domain::OutputRow;

/// Parents per output file
pub const PARENTS_PER_BATCH: usize = 10;

/// Rows for a run of consecutive parents, ready to be written to one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Sequence number, starting at 1
    pub number: usize,

    /// Rows in parent order
    pub rows: Vec<OutputRow>,

    /// Number of parents whose rows are in this batch
    pub parent_count: usize,
}

/// Accumulates rows parent by parent and hands them out as numbered batches
#[derive(Debug)]
pub struct BatchAccumulator {
    rows: Vec<OutputRow>,
    parents_in_batch: usize,
    next_batch_number: usize,
}

impl BatchAccumulator {
    /// Create an empty accumulator; the first batch is number 1
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            parents_in_batch: 0,
            next_batch_number: 1,
        }
    }

    /// Add all rows of one parent to the current batch
    pub fn append(&mut self, rows: Vec<OutputRow>) {
        self.rows.extend(rows);
        self.parents_in_batch += 1;
    }

    /// Whether the batch must be flushed after the parent at `parent_index`
    ///
    /// `parent_index` is 1-based.
    pub fn should_flush(&self, parent_index: usize, total_parents: usize) -> bool {
        parent_index != 0
            && (parent_index % PARENTS_PER_BATCH == 0 || parent_index == total_parents)
    }

    /// Take the current batch and start the next one
    pub fn take_batch(&mut self) -> Batch {
        let batch = Batch {
            number: self.next_batch_number,
            rows: std::mem::take(&mut self.rows),
            parent_count: self.parents_in_batch,
        };
        self.parents_in_batch = 0;
        self.next_batch_number += 1;
        batch
    }

    /// Rows waiting in the current batch
    pub fn pending_rows(&self) -> usize {
        self.rows.len()
    }

    /// Parents waiting in the current batch
    pub fn pending_parents(&self) -> usize {
        self.parents_in_batch
    }

    /// Number the next batch will get
    pub fn next_batch_number(&self) -> usize {
        self.next_batch_number
    }
}

impl Default for BatchAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
