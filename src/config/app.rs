// src/config/app.rs
use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use super::defaults::*;
use crate::error::CoreError;
use crate::Result;

pub const CONFIG_ENV_VAR: &str = "REENCRYPT_CONFIG";
pub const DATABASE_ENV_VAR: &str = "REENCRYPT_DB";
pub const ENV_FILE_ENV_VAR: &str = "REENCRYPT_ENV_FILE";
pub const BATCH_SIZE_ENV_VAR: &str = "REENCRYPT_BATCH_SIZE";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    #[serde(default = "default_database")]
    pub database: Database,
    #[serde(default = "default_deployment")]
    pub deployment: Deployment,
    #[serde(default = "default_reencrypt")]
    pub reencrypt: Reencrypt,
    #[serde(default = "default_schema")]
    pub schema: Schema,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Database {
    pub path: PathBuf,
}

/// Deployment file that carries the key ring
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Deployment {
    pub env_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Reencrypt {
    pub batch_size: u64,
}

/// Field schema used to discover encrypted configuration paths
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Schema {
    pub file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database: default_database(),
            deployment: default_deployment(),
            reencrypt: default_reencrypt(),
            schema: default_schema(),
        }
    }
}

/// `<config dir>/secret-reencrypt/config.toml`, or a relative `config.toml`
/// when the platform has no config dir
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("secret-reencrypt").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

impl Settings {
    /// Load settings: explicit path, then `REENCRYPT_CONFIG`, then the default
    /// location. A missing file means built-in defaults; env overrides apply last.
    pub fn load(explicit: Option<&Path>) -> Result<Settings> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => env::var_os(CONFIG_ENV_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(default_config_path),
        };

        let mut settings = if path.exists() {
            debug!(path = %path.display(), "loading settings");
            Self::from_toml(&std::fs::read_to_string(&path)?)?
        } else {
            warn!(path = %path.display(), "settings file not found, using built-in defaults");
            Settings::default()
        };

        settings.apply_env_overrides()?;
        Ok(settings)
    }

    pub fn from_toml(content: &str) -> Result<Settings> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(db) = env::var_os(DATABASE_ENV_VAR) {
            self.database.path = PathBuf::from(db);
        }
        if let Some(env_file) = env::var_os(ENV_FILE_ENV_VAR) {
            self.deployment.env_file = PathBuf::from(env_file);
        }
        if let Ok(raw) = env::var(BATCH_SIZE_ENV_VAR) {
            self.reencrypt.batch_size = raw.trim().parse().map_err(|_| {
                CoreError::Config(format!("{BATCH_SIZE_ENV_VAR} is not a number: {raw:?}"))
            })?;
        }
        Ok(())
    }
}
