// src/consts.rs
//! Shared constants: defaults and storage layout

/// Default window size for full-table scans.
// Higher = faster but more memory per window
pub const DEFAULT_BATCH_SIZE: u64 = 50_000;

/// Crypt version tag written into every ciphertext this crate produces
pub const CRYPT_VERSION_AESCRYPT_V3: u32 = 3;

/// KDF iterations for AES Crypt streams keyed by random 256-bit material
pub const RANDOM_KEY_KDF_ITERATIONS: u32 = 1;

/// Backend model marking a configuration field as encrypted
pub const ENCRYPTED_BACKEND_MODEL: &str = "encrypted";

/// Deployment-file path holding the newline-separated key ring
pub const CRYPT_KEY_PATH: &str = "crypt.key";

/// Admin configuration table
pub const CONFIG_TABLE: &str = "core_config_data";

/// Order payment table
pub const ORDER_PAYMENT_TABLE: &str = "sales_order_payment";

/// Failing rows kept with identity and cause in a run summary; the rest are
/// only counted
pub const MAX_REPORTED_FAILURES: usize = 1_000;

/// Explicit IDs bound per lookup query, well under SQLite's variable limit
pub const MAX_IDS_PER_QUERY: usize = 10_000;
