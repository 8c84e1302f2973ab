// src/crypto/encrypt.rs
use aescrypt_rs::aliases::Password;
use aescrypt_rs::encrypt;
use std::io::Cursor;

use crate::consts::RANDOM_KEY_KDF_ITERATIONS;
use crate::error::CoreError;
use crate::Result;

/// Encrypt plaintext → AES Crypt v3 stream (in-memory)
///
/// Uses `RANDOM_KEY_KDF_ITERATIONS = 1`: keys are random 256-bit material,
/// not human passwords.
pub fn encrypt_to_vec(plaintext: &[u8], password: &Password) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encrypt(
        Cursor::new(plaintext),
        &mut out,
        password,
        RANDOM_KEY_KDF_ITERATIONS,
    )
    .map_err(CoreError::Crypto)?;
    Ok(out)
}
