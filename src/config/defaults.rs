// src/config/defaults.rs
use crate::config::app::{Database, Deployment, Reencrypt, Schema};
use crate::consts::DEFAULT_BATCH_SIZE;

pub const DEFAULT_DATABASE_PATH: &str = "var/store.db";
pub const DEFAULT_ENV_FILE: &str = "app/etc/env.toml";
pub const DEFAULT_SCHEMA_FILE: &str = "app/etc/system.toml";

pub fn default_database() -> Database {
    Database {
        path: DEFAULT_DATABASE_PATH.into(),
    }
}

pub fn default_deployment() -> Deployment {
    Deployment {
        env_file: DEFAULT_ENV_FILE.into(),
    }
}

pub fn default_reencrypt() -> Reencrypt {
    Reencrypt {
        batch_size: DEFAULT_BATCH_SIZE,
    }
}

pub fn default_schema() -> Schema {
    Schema {
        file: DEFAULT_SCHEMA_FILE.into(),
    }
}
