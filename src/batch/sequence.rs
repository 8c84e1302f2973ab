// src/batch/sequence.rs
use std::iter::FusedIterator;

use super::single::Batch;
use crate::db::{Record, RowStore};
use crate::Result;

/// Ordered batches plus a total row count computed once, up front.
///
/// `total` only drives progress display. Rows deleted between the count and
/// the fetch simply make the sequence yield fewer rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSequence<R> {
    batches: Vec<Batch<R>>,
    total: u64,
}

impl<R> Default for BatchSequence<R> {
    fn default() -> Self {
        BatchSequence {
            batches: Vec::new(),
            total: 0,
        }
    }
}

impl<R: Record + Clone> BatchSequence<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appended as-is: no de-duplication, no overlap check
    pub fn add_batch(&mut self, batch: Batch<R>) -> &mut Self {
        self.batches.push(batch);
        self
    }

    pub fn set_total(&mut self, total: u64) -> &mut Self {
        self.total = total;
        self
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// True iff the total is zero; batch contents are not inspected
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn batches(&self) -> &[Batch<R>] {
        &self.batches
    }

    /// Flattened rows of every batch, in insertion order. Each call starts a
    /// fresh pass; query-backed batches are fetched as the cursor reaches them.
    pub fn items<'a, S: RowStore>(&'a self, store: &'a S) -> Items<'a, R, S> {
        Items {
            batches: &self.batches,
            store,
            next_batch: 0,
            rows: Vec::new().into_iter(),
            failed: false,
        }
    }
}

/// Cursor over a [`BatchSequence`]: the index of the next batch to fetch and
/// the remaining rows of the current one.
///
/// A fetch error is yielded once and ends the iteration.
pub struct Items<'a, R, S> {
    batches: &'a [Batch<R>],
    store: &'a S,
    next_batch: usize,
    rows: std::vec::IntoIter<R>,
    failed: bool,
}

impl<R: Record + Clone, S: RowStore> Iterator for Items<'_, R, S> {
    type Item = Result<R>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(row) = self.rows.next() {
                return Some(Ok(row));
            }
            if self.failed {
                return None;
            }
            let batch = self.batches.get(self.next_batch)?;
            self.next_batch += 1;
            match batch.rows(self.store) {
                Ok(rows) => self.rows = rows.into_iter(),
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

impl<R: Record + Clone, S: RowStore> FusedIterator for Items<'_, R, S> {}
