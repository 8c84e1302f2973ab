// src/crypto/decrypt.rs
use aescrypt_rs::aliases::Password;
use aescrypt_rs::decrypt;
use std::io::Cursor;

use crate::error::CoreError;
use crate::Result;

/// Decrypt an AES Crypt stream → plaintext bytes (in-memory)
pub fn decrypt_to_vec(ciphertext: &[u8], password: &Password) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    decrypt(Cursor::new(ciphertext), &mut out, password).map_err(CoreError::Crypto)?;
    Ok(out)
}
