// src/config/mod.rs
//! Configuration system for secret-reencrypt
//!
//! TOML settings file + env overrides, falling back to built-in defaults.

pub use app::{default_config_path, Database, Deployment, Reencrypt, Schema, Settings};

mod app;
mod defaults;
