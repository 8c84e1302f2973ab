// src/batch/planner.rs
//! Builds a [`BatchSequence`] from an explicit ID list or a full-table scan

use tracing::{debug, info};

use super::{Batch, BatchSequence};
use crate::consts::MAX_IDS_PER_QUERY;
use crate::db::{Predicate, Record, RowStore, Window};
use crate::error::CoreError;
use crate::Result;

/// Split `[0, total)` into `ceil(total / batch_size)` contiguous windows.
///
/// The last window's `end` is clipped to `total - 1`; its `size` is not.
pub fn windows(total: u64, batch_size: u64) -> Result<Vec<Window>> {
    if batch_size == 0 {
        return Err(CoreError::InvalidBatchSize);
    }
    let count = total.div_ceil(batch_size);
    Ok((0..count)
        .map(|i| {
            let start = i * batch_size;
            Window {
                start,
                end: ((i + 1) * batch_size).min(total) - 1,
                size: batch_size,
            }
        })
        .collect())
}

/// Every row whose group column is in `ids` and whose secret is non-null,
/// captured in a single pre-loaded batch.
///
/// An empty `ids` (or no matching rows) gives `total = 0` and no batches.
/// Lists longer than [`MAX_IDS_PER_QUERY`] are looked up in several queries;
/// the merged rows keep identity order.
pub fn plan_by_ids<R, S>(store: &S, ids: &[i64]) -> Result<BatchSequence<R>>
where
    R: Record + Clone,
    S: RowStore,
{
    let mut sequence = BatchSequence::new();
    if ids.is_empty() {
        return Ok(sequence);
    }

    let mut unique = ids.to_vec();
    unique.sort_unstable();
    unique.dedup();

    let mut rows: Vec<R> = Vec::new();
    for chunk in unique.chunks(MAX_IDS_PER_QUERY) {
        rows.extend(store.select::<R>(&Predicate::GroupIn(chunk.to_vec()), None)?);
    }
    if unique.len() > MAX_IDS_PER_QUERY {
        rows.sort_by_key(R::id);
    }
    info!(table = R::TABLE, requested = ids.len(), found = rows.len(), "planned explicit ID list");
    if rows.is_empty() {
        return Ok(sequence);
    }

    sequence
        .set_total(rows.len() as u64)
        .add_batch(Batch::loaded(rows));
    Ok(sequence)
}

/// One COUNT under `SecretNotNull`, then one lazy query-backed batch per
/// window of `batch_size` rows.
pub fn plan_full_scan<R, S>(store: &S, batch_size: u64) -> Result<BatchSequence<R>>
where
    R: Record + Clone,
    S: RowStore,
{
    if batch_size == 0 {
        return Err(CoreError::InvalidBatchSize);
    }

    let predicate = Predicate::SecretNotNull;
    let total = store.count::<R>(&predicate)?;
    let mut sequence = BatchSequence::new();
    sequence.set_total(total);

    for window in windows(total, batch_size)? {
        debug!(start = window.start, end = window.end, "planned window");
        sequence.add_batch(Batch::query(predicate.clone(), window));
    }

    info!(
        table = R::TABLE,
        total,
        batches = sequence.batches().len(),
        batch_size,
        "planned full-table scan"
    );
    Ok(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_cover_total_without_gaps() {
        for (total, size) in [(0, 3), (1, 1), (9, 3), (10, 3), (11, 4), (7, 100)] {
            let ws = windows(total, size).unwrap();
            assert_eq!(ws.len() as u64, total.div_ceil(size));
            let mut next = 0;
            for w in &ws {
                assert_eq!(w.start, next);
                assert!(w.end >= w.start);
                assert_eq!(w.size, size);
                next = w.end + 1;
            }
            assert_eq!(next, total);
        }
    }

    #[test]
    fn windows_match_large_table_scenario() {
        let ws = windows(120_001, 50_000).unwrap();
        let bounds: Vec<(u64, u64)> = ws.iter().map(|w| (w.start, w.end)).collect();
        assert_eq!(
            bounds,
            vec![(0, 49_999), (50_000, 99_999), (100_000, 120_000)]
        );
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        assert!(matches!(windows(10, 0), Err(CoreError::InvalidBatchSize)));
    }
}
