// src/db/row_store.rs
//! Generic SELECT / COUNT / point UPDATE over one [`Record`] table

use rusqlite::{params, params_from_iter, Connection};
use tracing::debug;

use super::record::Record;
use crate::Result;

/// Which rows belong to a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Secret column is non-null
    SecretNotNull,
    /// Group column in the given set, secret column non-null
    GroupIn(Vec<i64>),
}

impl Predicate {
    fn where_clause<R: Record>(&self) -> String {
        match self {
            Predicate::SecretNotNull => format!("{} IS NOT NULL", R::SECRET_COLUMN),
            Predicate::GroupIn(ids) => {
                let placeholders = vec!["?"; ids.len()].join(", ");
                format!(
                    "{} IN ({placeholders}) AND {} IS NOT NULL",
                    R::GROUP_COLUMN,
                    R::SECRET_COLUMN
                )
            }
        }
    }

    fn params(&self) -> &[i64] {
        match self {
            Predicate::SecretNotNull => &[],
            Predicate::GroupIn(ids) => ids,
        }
    }
}

/// Offset window over a predicate-filtered row set.
///
/// `end` is inclusive and only informative; the query always asks for
/// `LIMIT size OFFSET start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: u64,
    pub end: u64,
    pub size: u64,
}

pub trait RowStore {
    fn count<R: Record>(&self, predicate: &Predicate) -> Result<u64>;

    /// Rows matching `predicate` with a non-null identity, ordered by identity.
    /// `None` means unbounded.
    fn select<R: Record>(&self, predicate: &Predicate, window: Option<&Window>) -> Result<Vec<R>>;

    /// Point UPDATE of the secret column, keyed by identity
    fn update_secret<R: Record>(&self, id: i64, value: &str) -> Result<()>;
}

impl<S: RowStore + ?Sized> RowStore for &S {
    fn count<R: Record>(&self, predicate: &Predicate) -> Result<u64> {
        (**self).count::<R>(predicate)
    }

    fn select<R: Record>(&self, predicate: &Predicate, window: Option<&Window>) -> Result<Vec<R>> {
        (**self).select(predicate, window)
    }

    fn update_secret<R: Record>(&self, id: i64, value: &str) -> Result<()> {
        (**self).update_secret::<R>(id, value)
    }
}

fn to_sql_int(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

impl RowStore for Connection {
    fn count<R: Record>(&self, predicate: &Predicate) -> Result<u64> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {}",
            R::TABLE,
            predicate.where_clause::<R>()
        );
        let count: i64 = self.query_row(&sql, params_from_iter(predicate.params()), |row| {
            row.get(0)
        })?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    fn select<R: Record>(&self, predicate: &Predicate, window: Option<&Window>) -> Result<Vec<R>> {
        let mut sql = format!(
            "SELECT {} FROM {} WHERE {} AND {id} IS NOT NULL ORDER BY {id}",
            R::COLUMNS.join(", "),
            R::TABLE,
            predicate.where_clause::<R>(),
            id = R::ID_COLUMN,
        );
        let mut bound = predicate.params().to_vec();
        if let Some(window) = window {
            sql.push_str(" LIMIT ? OFFSET ?");
            bound.push(to_sql_int(window.size));
            bound.push(to_sql_int(window.start));
        }
        debug!(table = R::TABLE, ?window, "selecting rows");

        let mut stmt = self.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(bound.iter()), |row| R::from_row(row))?
            .collect::<rusqlite::Result<Vec<R>>>()?;
        Ok(rows)
    }

    fn update_secret<R: Record>(&self, id: i64, value: &str) -> Result<()> {
        let sql = format!(
            "UPDATE {} SET {} = ?1 WHERE {} = ?2",
            R::TABLE,
            R::SECRET_COLUMN,
            R::ID_COLUMN
        );
        self.execute(&sql, params![value, id])?;
        Ok(())
    }
}
