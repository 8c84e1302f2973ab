// tests/support.rs
//! Test fixtures: in-memory store, deterministic cipher, query-counting gateway
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use rusqlite::{params, Connection};
use secret_reencrypt::db::{ensure_schema, Predicate, Record, RowStore, Window};
use secret_reencrypt::{CoreError, Encryptor, PlainText, Result};

/// Fresh in-memory database with both tables
pub struct TestStore {
    pub conn: Connection,
}

impl TestStore {
    pub fn new() -> Self {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        ensure_schema(&conn).expect("create schema");
        Self { conn }
    }

    pub fn insert_payment(&self, parent_id: i64, cc_number_enc: Option<&str>) -> i64 {
        self.conn
            .execute(
                "INSERT INTO sales_order_payment (parent_id, method, cc_number_enc) VALUES (?1, 'ccsave', ?2)",
                params![parent_id, cc_number_enc],
            )
            .expect("insert payment");
        self.conn.last_insert_rowid()
    }

    pub fn payment_secret(&self, entity_id: i64) -> Option<String> {
        self.conn
            .query_row(
                "SELECT cc_number_enc FROM sales_order_payment WHERE entity_id = ?1",
                [entity_id],
                |r| r.get(0),
            )
            .expect("read payment")
    }

    pub fn insert_config(&self, path: &str, scope_id: i64, value: Option<&str>) -> i64 {
        self.conn
            .execute(
                "INSERT INTO core_config_data (scope, scope_id, path, value) VALUES (?1, ?2, ?3, ?4)",
                params![
                    if scope_id == 0 { "default" } else { "stores" },
                    scope_id,
                    path,
                    value
                ],
            )
            .expect("insert config");
        self.conn.last_insert_rowid()
    }

    pub fn config_value(&self, config_id: i64) -> Option<String> {
        self.conn
            .query_row(
                "SELECT value FROM core_config_data WHERE config_id = ?1",
                [config_id],
                |r| r.get(0),
            )
            .expect("read config")
    }
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic stand-in for a real provider.
///
/// Ciphertext is `<key version>:<hex plaintext>`. Versions above the active
/// one decrypt to "" like a real provider facing an unknown key. Encrypting
/// any plaintext listed in `explode_on` fails.
pub struct FakeCipher {
    pub active: Cell<usize>,
    pub explode_on: RefCell<HashSet<String>>,
}

impl FakeCipher {
    pub fn new(active: usize) -> Self {
        Self {
            active: Cell::new(active),
            explode_on: RefCell::new(HashSet::new()),
        }
    }

    pub fn seal(version: usize, plaintext: &str) -> String {
        format!("{version}:{}", hex::encode(plaintext))
    }

    pub fn explode_on(&self, plaintext: &str) {
        self.explode_on.borrow_mut().insert(plaintext.to_owned());
    }
}

impl Encryptor for FakeCipher {
    fn decrypt(&self, ciphertext: &str) -> Result<PlainText> {
        let plain = ciphertext
            .split_once(':')
            .and_then(|(v, payload)| {
                let version: usize = v.parse().ok()?;
                (version <= self.active.get()).then_some(payload)
            })
            .and_then(|payload| hex::decode(payload).ok())
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .unwrap_or_default();
        Ok(PlainText::new(plain))
    }

    fn encrypt(&self, plaintext: &str) -> Result<String> {
        if self.explode_on.borrow().contains(plaintext) {
            return Err(CoreError::InvalidKey("provider exploded".into()));
        }
        Ok(Self::seal(self.active.get(), plaintext))
    }
}

/// Wraps a connection and counts gateway calls
pub struct CountingStore<'a> {
    pub inner: &'a Connection,
    pub counts: Cell<usize>,
    pub selects: Cell<usize>,
    pub windows: RefCell<Vec<Window>>,
}

impl<'a> CountingStore<'a> {
    pub fn new(inner: &'a Connection) -> Self {
        Self {
            inner,
            counts: Cell::new(0),
            selects: Cell::new(0),
            windows: RefCell::new(Vec::new()),
        }
    }
}

impl RowStore for CountingStore<'_> {
    fn count<R: Record>(&self, predicate: &Predicate) -> Result<u64> {
        self.counts.set(self.counts.get() + 1);
        self.inner.count::<R>(predicate)
    }

    fn select<R: Record>(&self, predicate: &Predicate, window: Option<&Window>) -> Result<Vec<R>> {
        self.selects.set(self.selects.get() + 1);
        if let Some(w) = window {
            self.windows.borrow_mut().push(*w);
        }
        self.inner.select(predicate, window)
    }

    fn update_secret<R: Record>(&self, id: i64, value: &str) -> Result<()> {
        self.inner.update_secret::<R>(id, value)
    }
}
