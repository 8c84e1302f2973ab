// tests/env_config_tests.rs
mod common;

use std::fs;

use secret_reencrypt::{CoreError, EnvironmentConfig};
use tempfile::tempdir;

#[test]
fn save_merges_into_existing_file() {
    common::setup();
    let dir = tempdir().unwrap();
    let path = dir.path().join("env.toml");
    fs::write(
        &path,
        r#"
        [db.connection]
        host = "localhost"

        [crypt]
        key = "old"
        cipher = "aescrypt"
        "#,
    )
    .unwrap();

    let mut env = EnvironmentConfig::open(&path);
    env.set("crypt.key", "old\nnew").set("cache.backend", "redis");
    assert_eq!(env.pending(), 2);
    // Staged values are invisible until saved
    assert_eq!(env.get("crypt.key").unwrap().as_deref(), Some("old"));

    env.save().unwrap();
    assert_eq!(env.pending(), 0);

    assert_eq!(env.get("crypt.key").unwrap().as_deref(), Some("old\nnew"));
    assert_eq!(env.get("crypt.cipher").unwrap().as_deref(), Some("aescrypt"));
    assert_eq!(
        env.get("db.connection.host").unwrap().as_deref(),
        Some("localhost")
    );
    assert_eq!(env.get("cache.backend").unwrap().as_deref(), Some("redis"));
    assert_eq!(env.get("cache.missing").unwrap(), None);
}

#[test]
fn save_creates_a_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("env.toml");

    let mut env = EnvironmentConfig::open(&path);
    assert!(env.key_ring().unwrap().is_none());
    env.set("crypt.key", "k0").save().unwrap();

    assert!(path.exists());
    let ring = env.key_ring().unwrap().unwrap();
    assert_eq!(ring.len(), 1);
    assert_eq!(ring.active_version(), 0);
}

#[test]
fn missing_directory_is_not_writable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("env.toml");

    let mut env = EnvironmentConfig::open(&path);
    let result = env.set("crypt.key", "k0").save();

    match result {
        Err(CoreError::NotWritable(p)) => assert_eq!(p, path),
        other => panic!("expected NotWritable, got {other:?}"),
    }
    assert_eq!(env.pending(), 1, "failed save keeps staged changes");
}

#[test]
fn readonly_file_is_not_writable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("env.toml");
    fs::write(&path, "[crypt]\nkey = \"k0\"\n").unwrap();

    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_readonly(true);
    fs::set_permissions(&path, perms).unwrap();

    let mut env = EnvironmentConfig::open(&path);
    let result = env.set("crypt.key", "k0\nk1").save();
    assert!(matches!(result, Err(CoreError::NotWritable(_))));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[crypt]\nkey = \"k0\"\n"
    );

    #[allow(clippy::permissions_set_readonly_false)]
    {
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_readonly(false);
        fs::set_permissions(&path, perms).unwrap();
    }
}

#[test]
fn scalar_in_the_way_of_a_table_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("env.toml");
    fs::write(&path, "crypt = \"flat\"\n").unwrap();

    let mut env = EnvironmentConfig::open(&path);
    let result = env.set("crypt.key", "k0").save();
    assert!(matches!(result, Err(CoreError::Config(_))));
    assert_eq!(fs::read_to_string(&path).unwrap(), "crypt = \"flat\"\n");
}

#[cfg(unix)]
#[test]
fn save_keeps_the_file_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let path = dir.path().join("env.toml");
    fs::write(&path, "[crypt]\nkey = \"k0\"\n").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

    let mut env = EnvironmentConfig::open(&path);
    env.set("crypt.key", "k0\nk1").save().unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o644);
    assert_eq!(env.get("crypt.key").unwrap().as_deref(), Some("k0\nk1"));
}
