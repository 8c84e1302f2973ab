// src/commands/key.rs
use tracing::info;

use crate::aliases::KeyMaterial;
use crate::consts::CRYPT_KEY_PATH;
use crate::crypto::keyring::{fingerprint, generate_key};
use crate::crypto::KeyRing;
use crate::env_config::EnvironmentConfig;
use crate::Result;

/// Result of adding a key to the deployment's key ring
pub struct KeyAdded {
    /// Version the new key is stored under
    pub version: usize,
    pub fingerprint: String,
    /// Set only when the key was generated here, so it can be shown once
    pub generated: Option<KeyMaterial>,
}

/// Add `key` (or a freshly generated one) as the active key and persist the
/// whole ring at `crypt.key`.
pub fn key_add(env: &mut EnvironmentConfig, key: Option<&str>) -> Result<KeyAdded> {
    let generated = key.is_none().then(generate_key);
    let key: &str = match &generated {
        Some(g) => g.expose_secret().as_str(),
        None => key.unwrap_or_default(),
    };

    let (ring, version) = match env.key_ring()? {
        Some(mut ring) => {
            let version = ring.add_key(key)?;
            (ring, version)
        }
        None => (KeyRing::new(key)?, 0),
    };

    env.set(CRYPT_KEY_PATH, ring.export_keys()).save()?;

    let key_fingerprint = fingerprint(key);
    info!(version, fingerprint = %key_fingerprint, keys = ring.len(), "encryption key added");

    Ok(KeyAdded {
        version,
        fingerprint: key_fingerprint,
        generated,
    })
}
