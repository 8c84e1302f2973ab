// src/db/mod.rs
//! Row store gateways
//!
//! Two narrow views over the relational store: [`RowStore`] for typed
//! [`Record`] tables scanned in windows, and [`ConfigStore`] for configuration
//! values addressed by path. Both are implemented for `rusqlite::Connection`.

pub mod config_store;
pub mod conn;
pub mod record;
pub mod row_store;

pub use config_store::{ConfigStore, ConfigValue};
pub use conn::{ensure_schema, open_db};
pub use record::{OrderPayment, Record};
pub use row_store::{Predicate, RowStore, Window};
