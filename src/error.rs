// src/error.rs
//! Public error type for the entire crate

use std::path::PathBuf;

use aescrypt_rs::AescryptError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Crypto operation failed: {0}")]
    Crypto(AescryptError),

    #[error("Database error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("Invalid TOML: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Could not serialize TOML: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Window size of zero passed to the planner
    #[error("batch size must be greater than zero")]
    InvalidBatchSize,

    #[error("invalid encryption key: {0}")]
    InvalidKey(String),

    #[error("no encryption key with version {0}")]
    UnknownKeyVersion(usize),

    #[error("ciphertext is not in <version>:<crypt>:<payload> form")]
    MalformedCiphertext,

    /// Planning produced nothing to work on
    #[error("nothing found: {0}")]
    NothingFound(String),

    #[error("deployment configuration file is not writable: {}", .0.display())]
    NotWritable(PathBuf),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<AescryptError> for CoreError {
    fn from(err: AescryptError) -> Self {
        CoreError::Crypto(err)
    }
}
