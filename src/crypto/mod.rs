// src/crypto/mod.rs
//! Encryption provider seam
//!
//! The re-encryption engine only ever talks to [`Encryptor`]. [`KeyRing`] is
//! the bundled implementation: versioned keys, AES Crypt v3 payloads.

pub mod decrypt;
pub mod encrypt;
pub mod keyring;

pub use decrypt::decrypt_to_vec;
pub use encrypt::encrypt_to_vec;
pub use keyring::KeyRing;

use crate::aliases::PlainText;
use crate::Result;

/// Decrypts with any known key, encrypts with the active one.
pub trait Encryptor {
    /// Routine corruption (unknown key, tampered payload) yields an empty
    /// plaintext rather than an error. `Err` is reserved for unexpected faults.
    fn decrypt(&self, ciphertext: &str) -> Result<PlainText>;

    /// Always encrypts under the currently active key.
    fn encrypt(&self, plaintext: &str) -> Result<String>;
}

impl<E: Encryptor + ?Sized> Encryptor for &E {
    fn decrypt(&self, ciphertext: &str) -> Result<PlainText> {
        (**self).decrypt(ciphertext)
    }

    fn encrypt(&self, plaintext: &str) -> Result<String> {
        (**self).encrypt(plaintext)
    }
}
