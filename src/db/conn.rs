// src/db/conn.rs
use std::time::Duration;
use std::{fs, path::Path};

use rusqlite::Connection;
use tracing::debug;

use crate::Result;

/// Open the store at `db_path`, creating parent directories as needed
pub fn open_db<P: AsRef<Path>>(db_path: P) -> Result<Connection> {
    let db_path = db_path.as_ref();

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    debug!(path = %db_path.display(), "opening database");
    let conn = Connection::open(db_path)?;
    conn.busy_timeout(Duration::from_secs(5))?;
    ensure_schema(&conn)?;

    Ok(conn)
}

/// Create the two tables this crate reads and writes, if absent
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS core_config_data (
            config_id INTEGER PRIMARY KEY AUTOINCREMENT,
            scope     TEXT NOT NULL DEFAULT 'default',
            scope_id  INTEGER NOT NULL DEFAULT 0,
            path      TEXT NOT NULL,
            value     TEXT,
            UNIQUE (scope, scope_id, path)
        );

        CREATE INDEX IF NOT EXISTS idx_core_config_data_path ON core_config_data(path);

        CREATE TABLE IF NOT EXISTS sales_order_payment (
            entity_id     INTEGER PRIMARY KEY AUTOINCREMENT,
            parent_id     INTEGER NOT NULL,
            method        TEXT,
            cc_last_4     TEXT,
            cc_number_enc TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_sales_order_payment_parent ON sales_order_payment(parent_id);
        "#,
    )?;
    Ok(())
}
