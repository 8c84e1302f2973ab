// src/batch/single.rs
use crate::db::{Predicate, Record, RowStore, Window};
use crate::Result;

/// One bounded slice of rows.
///
/// `Query` fetches its window when asked, never at construction. `Loaded`
/// replays rows captured up front, which saves a second query when the row
/// set is already known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Batch<R> {
    Query { predicate: Predicate, window: Window },
    Loaded(Vec<R>),
}

impl<R: Record + Clone> Batch<R> {
    pub fn query(predicate: Predicate, window: Window) -> Self {
        Batch::Query { predicate, window }
    }

    pub fn loaded(rows: Vec<R>) -> Self {
        Batch::Loaded(rows)
    }

    /// Produce this batch's rows. A query-backed batch runs exactly one
    /// SELECT per call.
    pub fn rows<S: RowStore>(&self, store: &S) -> Result<Vec<R>> {
        match self {
            Batch::Query { predicate, window } => store.select(predicate, Some(window)),
            Batch::Loaded(rows) => Ok(rows.clone()),
        }
    }

    pub fn window(&self) -> Option<&Window> {
        match self {
            Batch::Query { window, .. } => Some(window),
            Batch::Loaded(_) => None,
        }
    }
}
