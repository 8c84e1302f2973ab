// src/commands/order.rs
use tracing::info;

use crate::batch::{plan_by_ids, plan_full_scan, BatchSequence};
use crate::crypto::Encryptor;
use crate::db::{OrderPayment, Record, RowStore};
use crate::error::CoreError;
use crate::reencrypt::{Reencryptor, RowReport, RunSummary};
use crate::Result;

/// Re-encrypt stored payment numbers: the orders in `ids`, or every order
/// with a non-null value when `ids` is empty.
///
/// `on_plan` sees the sequence before any row is touched.
pub fn order_reencrypt<E, S, P, F>(
    engine: &Reencryptor<E>,
    store: &S,
    ids: &[i64],
    batch_size: u64,
    on_plan: P,
    observe: F,
) -> Result<RunSummary>
where
    E: Encryptor,
    S: RowStore,
    P: FnOnce(&BatchSequence<OrderPayment>),
    F: FnMut(&RowReport),
{
    let sequence: BatchSequence<OrderPayment> = if ids.is_empty() {
        info!("re-encrypting all orders with a non-null encrypted value");
        let sequence = plan_full_scan(store, batch_size)?;
        if sequence.is_empty() {
            return Err(CoreError::NothingFound(format!(
                "no orders with non-null {} found",
                OrderPayment::SECRET_COLUMN
            )));
        }
        sequence
    } else {
        let sequence = plan_by_ids(store, ids)?;
        if sequence.is_empty() {
            return Err(CoreError::NothingFound(
                "no orders with specified ids found".into(),
            ));
        }
        let found = found_order_ids(store, &sequence)?;
        info!(
            "re-encrypting orders with ids: {}",
            found
                .iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(",")
        );
        sequence
    };

    on_plan(&sequence);
    engine.run_records(store, &sequence, observe)
}

fn found_order_ids<S: RowStore>(
    store: &S,
    sequence: &BatchSequence<OrderPayment>,
) -> Result<Vec<i64>> {
    sequence
        .items(store)
        .map(|row| row.map(|payment| payment.group_id()))
        .collect()
}
