// src/db/record.rs
//! Typed rows
//!
//! A [`Record`] names its table and the handful of columns the pipeline
//! touches, so a missing column is a compile error rather than a failed
//! lookup halfway through a run.

use rusqlite::Row;

use crate::consts::ORDER_PAYMENT_TABLE;

pub trait Record: Sized {
    const TABLE: &'static str;
    /// Unique key used for the point UPDATE
    const ID_COLUMN: &'static str;
    /// Column an explicit ID list filters on
    const GROUP_COLUMN: &'static str;
    /// Column holding the ciphertext
    const SECRET_COLUMN: &'static str;
    /// Columns selected, in the order `from_row` reads them
    const COLUMNS: &'static [&'static str];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    fn id(&self) -> i64;

    fn group_id(&self) -> i64;

    fn secret(&self) -> Option<&str>;

    /// Human-readable identity for reports
    fn label(&self) -> String {
        format!("{} {}", Self::ID_COLUMN, self.id())
    }
}

/// One stored order payment; `parent_id` is the order ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPayment {
    pub entity_id: i64,
    pub parent_id: i64,
    pub cc_number_enc: Option<String>,
}

impl Record for OrderPayment {
    const TABLE: &'static str = ORDER_PAYMENT_TABLE;
    const ID_COLUMN: &'static str = "entity_id";
    const GROUP_COLUMN: &'static str = "parent_id";
    const SECRET_COLUMN: &'static str = "cc_number_enc";
    const COLUMNS: &'static [&'static str] = &["entity_id", "parent_id", "cc_number_enc"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(OrderPayment {
            entity_id: row.get(0)?,
            parent_id: row.get(1)?,
            cc_number_enc: row.get(2)?,
        })
    }

    fn id(&self) -> i64 {
        self.entity_id
    }

    fn group_id(&self) -> i64 {
        self.parent_id
    }

    fn secret(&self) -> Option<&str> {
        self.cc_number_enc.as_deref()
    }

    fn label(&self) -> String {
        format!("order ID {}", self.parent_id)
    }
}
