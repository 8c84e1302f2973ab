// tests/keyring_tests.rs
//! Versioned AES Crypt key ring used as the production encryptor

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use secret_reencrypt::crypto::{decrypt_to_vec, encrypt_to_vec};
use secret_reencrypt::{Encryptor, KeyRing};

#[test]
fn encrypt_then_decrypt_under_the_active_key() {
    let ring = KeyRing::new("k0").unwrap();
    let sealed = ring.encrypt("4111111111111111").unwrap();

    assert!(sealed.starts_with("0:3:"));
    assert_eq!(
        ring.decrypt(&sealed).unwrap().expose_secret(),
        "4111111111111111"
    );
    // Randomized: same plaintext, different ciphertext
    assert_ne!(ring.encrypt("4111111111111111").unwrap(), sealed);
}

#[test]
fn older_keys_still_decrypt_after_rotation() {
    let mut ring = KeyRing::new("k0").unwrap();
    let old = ring.encrypt("secret").unwrap();

    assert_eq!(ring.add_key("k1").unwrap(), 1);
    let new = ring.encrypt("secret").unwrap();

    assert!(new.starts_with("1:3:"));
    assert_eq!(ring.decrypt(&old).unwrap().expose_secret(), "secret");
    assert_eq!(ring.decrypt(&new).unwrap().expose_secret(), "secret");
}

#[test]
fn undecryptable_values_come_back_empty() {
    let mut newer = KeyRing::new("k0").unwrap();
    newer.add_key("k1").unwrap();
    let from_newer = newer.encrypt("secret").unwrap();

    let older = KeyRing::new("k0").unwrap();
    // Unknown key version
    assert_eq!(older.decrypt(&from_newer).unwrap().expose_secret(), "");

    let other = KeyRing::new("someone-else").unwrap();
    let foreign = other.encrypt("secret").unwrap();
    // Wrong key for version 0
    assert_eq!(older.decrypt(&foreign).unwrap().expose_secret(), "");

    // Garbage in every position
    for bad in ["", "0:3:!!not-base64!!", "0:9:QUJD", "x:3:QUJD", "0:3:QUJD"] {
        assert_eq!(older.decrypt(bad).unwrap().expose_secret(), "", "{bad}");
    }
}

#[test]
fn bare_payload_is_read_under_key_zero() {
    let mut ring = KeyRing::new("k0").unwrap();
    ring.add_key("k1").unwrap();

    let password = aescrypt_rs::aliases::Password::new("k0".to_string());
    let stream = encrypt_to_vec(b"legacy value", &password).unwrap();
    let bare = STANDARD.encode(&stream);

    assert_eq!(ring.decrypt(&bare).unwrap().expose_secret(), "legacy value");
    assert_eq!(decrypt_to_vec(&stream, &password).unwrap(), b"legacy value");
}
