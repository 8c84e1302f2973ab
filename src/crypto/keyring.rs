// src/crypto/keyring.rs
//! Versioned key ring
//!
//! Key version = position in the ring. The last key is the active key; every
//! earlier key stays available for decryption only. Ciphertext layout:
//!
//! ```text
//! <key version>:<crypt version>:<base64 AES Crypt v3 stream>
//! ```
//!
//! Values without the prefix are read as key version 0.

use std::fmt;

use aescrypt_rs::aliases::Password;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::debug;

use super::{decrypt_to_vec, encrypt_to_vec, Encryptor};
use crate::aliases::{KeyBytes32, KeyMaterial, PlainText, SecureRandomExt};
use crate::consts::CRYPT_VERSION_AESCRYPT_V3;
use crate::error::CoreError;
use crate::Result;

#[derive(Clone)]
pub struct KeyRing {
    keys: Vec<KeyMaterial>,
}

impl fmt::Debug for KeyRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyRing")
            .field("keys", &self.keys.len())
            .field("active_version", &self.active_version())
            .finish()
    }
}

/// Generate a fresh key: 256 random bits, hex encoded
pub fn generate_key() -> KeyMaterial {
    let bytes = KeyBytes32::random();
    KeyMaterial::new(hex::encode(bytes.expose_secret()))
}

/// Short BLAKE3 fingerprint, safe to log in place of the key itself
pub fn fingerprint(key: &str) -> String {
    blake3::hash(key.as_bytes()).to_hex().as_str()[..16].to_string()
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CoreError::InvalidKey("key is empty".into()));
    }
    if key.chars().any(char::is_whitespace) {
        return Err(CoreError::InvalidKey("key contains whitespace".into()));
    }
    Ok(())
}

impl KeyRing {
    pub fn new(first_key: &str) -> Result<Self> {
        validate_key(first_key)?;
        Ok(KeyRing {
            keys: vec![KeyMaterial::new(first_key.to_owned())],
        })
    }

    /// Parse the newline-separated form produced by [`KeyRing::export_keys`]
    pub fn from_exported(exported: &str) -> Result<Self> {
        let mut lines = exported.lines().map(str::trim).filter(|l| !l.is_empty());
        let first = lines
            .next()
            .ok_or_else(|| CoreError::InvalidKey("no keys configured".into()))?;
        let mut ring = KeyRing::new(first)?;
        for key in lines {
            ring.add_key(key)?;
        }
        Ok(ring)
    }

    /// Append a key and make it the active one. Returns its version.
    pub fn add_key(&mut self, key: &str) -> Result<usize> {
        validate_key(key)?;
        if self.keys.iter().any(|k| k.expose_secret() == key) {
            return Err(CoreError::InvalidKey("key is already in the ring".into()));
        }
        self.keys.push(KeyMaterial::new(key.to_owned()));
        Ok(self.active_version())
    }

    pub fn export_keys(&self) -> String {
        self.keys
            .iter()
            .map(|k| k.expose_secret().as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn active_version(&self) -> usize {
        self.keys.len() - 1
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn password(&self, version: usize) -> Result<Password> {
        self.keys
            .get(version)
            .map(|k| Password::new(k.expose_secret().clone()))
            .ok_or(CoreError::UnknownKeyVersion(version))
    }

    fn try_decrypt(&self, ciphertext: &str) -> Result<String> {
        let (version, crypt_version, payload) = split_ciphertext(ciphertext)?;
        if crypt_version != CRYPT_VERSION_AESCRYPT_V3 {
            return Err(CoreError::MalformedCiphertext);
        }
        let stream = STANDARD.decode(payload)?;
        let plain = decrypt_to_vec(&stream, &self.password(version)?)?;
        String::from_utf8(plain).map_err(|_| CoreError::MalformedCiphertext)
    }
}

/// `<key version>:<crypt version>:<payload>`, or a bare payload under key 0
pub fn split_ciphertext(value: &str) -> Result<(usize, u32, &str)> {
    let mut parts = value.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(version), Some(crypt), Some(payload)) => {
            let version = version
                .parse()
                .map_err(|_| CoreError::MalformedCiphertext)?;
            let crypt = crypt.parse().map_err(|_| CoreError::MalformedCiphertext)?;
            Ok((version, crypt, payload))
        }
        (Some(payload), None, None) => Ok((0, CRYPT_VERSION_AESCRYPT_V3, payload)),
        _ => Err(CoreError::MalformedCiphertext),
    }
}

impl Encryptor for KeyRing {
    fn decrypt(&self, ciphertext: &str) -> Result<PlainText> {
        match self.try_decrypt(ciphertext) {
            Ok(plain) => Ok(PlainText::new(plain)),
            Err(err) => {
                debug!(error = %err, "decryption failed, returning empty plaintext");
                Ok(PlainText::new(String::new()))
            }
        }
    }

    fn encrypt(&self, plaintext: &str) -> Result<String> {
        let version = self.active_version();
        let stream = encrypt_to_vec(plaintext.as_bytes(), &self.password(version)?)?;
        Ok(format!(
            "{version}:{CRYPT_VERSION_AESCRYPT_V3}:{}",
            STANDARD.encode(stream)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_accepts_prefixed_and_bare_values() {
        assert_eq!(split_ciphertext("2:3:QUJD").unwrap(), (2, 3, "QUJD"));
        assert_eq!(split_ciphertext("QUJD").unwrap(), (0, 3, "QUJD"));
        assert!(split_ciphertext("x:3:QUJD").is_err());
        assert!(split_ciphertext("1:QUJD").is_err());
    }

    #[test]
    fn export_round_trips_through_from_exported() {
        let mut ring = KeyRing::new("first").unwrap();
        ring.add_key("second").unwrap();
        let restored = KeyRing::from_exported(&ring.export_keys()).unwrap();
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.active_version(), 1);
        assert_eq!(restored.export_keys(), "first\nsecond");
    }

    #[test]
    fn rejects_bad_keys() {
        let mut ring = KeyRing::new("k0").unwrap();
        assert!(matches!(ring.add_key(""), Err(CoreError::InvalidKey(_))));
        assert!(matches!(ring.add_key("a b"), Err(CoreError::InvalidKey(_))));
        assert!(matches!(ring.add_key("k0"), Err(CoreError::InvalidKey(_))));
        assert!(KeyRing::from_exported("\n  \n").is_err());
    }

    #[test]
    fn generated_keys_are_64_hex_chars_and_distinct() {
        let a = generate_key();
        let b = generate_key();
        assert_eq!(a.expose_secret().len(), 64);
        assert!(a.expose_secret().chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a.expose_secret(), b.expose_secret());
        assert_eq!(fingerprint(a.expose_secret()).len(), 16);
    }
}
