// src/lib.rs
//! secret-reencrypt: re-encrypts at-rest secrets after a key rotation
//!
//! Features:
//! - Versioned key ring, AES Crypt v3 payloads
//! - Memory-bounded windowed scans over large tables
//! - Per-row fault isolation: one bad row never stops a run
//! - Deployment-file key rotation

pub mod aliases;
pub mod batch;
pub mod commands;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod db;
pub mod env_config;
pub mod error;
pub mod reencrypt;
pub mod report;
pub mod schema;

pub type Result<T> = std::result::Result<T, CoreError>;

// Re-export everything users need at the crate root
pub use aliases::{KeyMaterial, PlainText};
pub use batch::{plan_by_ids, plan_full_scan, Batch, BatchSequence};
pub use config::Settings;
pub use crypto::{Encryptor, KeyRing};
pub use db::{open_db, ConfigStore, OrderPayment, Record, RowStore};
pub use env_config::EnvironmentConfig;
pub use error::CoreError;
pub use reencrypt::{Outcome, Reencryptor, RowReport, RunSummary};
pub use schema::{EncryptedPathSource, FieldSchema};
