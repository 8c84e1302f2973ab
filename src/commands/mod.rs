// src/commands/mod.rs
//! The four operator workflows
//!
//! Each returns a [`RunSummary`](crate::reencrypt::RunSummary) (or the added
//! key) on success. "Nothing to do" is a planning error:
//! [`CoreError::NothingFound`](crate::error::CoreError::NothingFound), no rows touched.

pub mod config;
pub mod key;
pub mod order;

pub use config::{config_reencrypt_all, config_reencrypt_path};
pub use key::{key_add, KeyAdded};
pub use order::order_reencrypt;
