// src/env_config.rs
//! Deployment configuration writer
//!
//! Changes are staged with [`EnvironmentConfig::set`] and written by
//! [`EnvironmentConfig::save`] into a TOML file, merged with whatever the file
//! already holds. Dotted paths address nested tables (`crypt.key`).

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use toml::{Table, Value};
use tracing::info;

use crate::consts::CRYPT_KEY_PATH;
use crate::crypto::KeyRing;
use crate::error::CoreError;
use crate::Result;

#[derive(Debug)]
pub struct EnvironmentConfig {
    path: PathBuf,
    changes: BTreeMap<String, String>,
}

impl EnvironmentConfig {
    pub fn open<P: Into<PathBuf>>(path: P) -> Self {
        EnvironmentConfig {
            path: path.into(),
            changes: BTreeMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stage a value; nothing touches disk until [`save`](Self::save)
    pub fn set(&mut self, dotted: &str, value: impl Into<String>) -> &mut Self {
        self.changes.insert(dotted.to_owned(), value.into());
        self
    }

    pub fn pending(&self) -> usize {
        self.changes.len()
    }

    /// Read the file as saved on disk (staged changes excluded)
    pub fn read(&self) -> Result<Table> {
        if !self.path.exists() {
            return Ok(Table::new());
        }
        Ok(fs::read_to_string(&self.path)?.parse::<Table>()?)
    }

    pub fn get(&self, dotted: &str) -> Result<Option<String>> {
        let table = self.read()?;
        let mut segments = dotted.split('.').peekable();
        let mut cursor = &table;
        while let Some(segment) = segments.next() {
            let Some(value) = cursor.get(segment) else {
                return Ok(None);
            };
            if segments.peek().is_none() {
                return Ok(value.as_str().map(str::to_owned));
            }
            match value.as_table() {
                Some(inner) => cursor = inner,
                None => return Ok(None),
            }
        }
        Ok(None)
    }

    fn check_writable(&self) -> Result<()> {
        let not_writable = || CoreError::NotWritable(self.path.clone());
        if self.path.exists() {
            if fs::metadata(&self.path)?.permissions().readonly() {
                return Err(not_writable());
            }
            return Ok(());
        }
        match self.parent_dir() {
            dir if dir.is_dir() => {
                if fs::metadata(dir)?.permissions().readonly() {
                    return Err(not_writable());
                }
                Ok(())
            }
            _ => Err(not_writable()),
        }
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }

    /// Merge staged changes into the file and write it atomically
    pub fn save(&mut self) -> Result<()> {
        self.check_writable()?;

        let mut table = self.read()?;
        for (dotted, value) in &self.changes {
            set_dotted(&mut table, dotted, Value::String(value.clone()))?;
        }

        let mut tmp = NamedTempFile::new_in(self.parent_dir())?;
        tmp.write_all(toml::to_string_pretty(&table)?.as_bytes())?;
        // Replacement keeps the existing file's mode
        if self.path.exists() {
            fs::set_permissions(tmp.path(), fs::metadata(&self.path)?.permissions())?;
        }
        tmp.persist(&self.path).map_err(|e| CoreError::Io(e.error))?;

        info!(path = %self.path.display(), changes = self.changes.len(), "deployment configuration saved");
        self.changes.clear();
        Ok(())
    }

    /// Key ring stored at `crypt.key`
    pub fn key_ring(&self) -> Result<Option<KeyRing>> {
        self.get(CRYPT_KEY_PATH)?
            .map(|exported| KeyRing::from_exported(&exported))
            .transpose()
    }
}

fn set_dotted(table: &mut Table, dotted: &str, value: Value) -> Result<()> {
    let mut segments: Vec<&str> = dotted.split('.').collect();
    let leaf = match segments.pop() {
        Some(leaf) if !leaf.is_empty() => leaf,
        _ => return Err(CoreError::Config(format!("invalid config path {dotted:?}"))),
    };

    let mut cursor = table;
    for segment in segments {
        let entry = cursor
            .entry(segment.to_owned())
            .or_insert_with(|| Value::Table(Table::new()));
        cursor = match entry {
            Value::Table(inner) => inner,
            _ => {
                return Err(CoreError::Config(format!(
                    "{segment:?} in {dotted:?} is not a table"
                )))
            }
        };
    }
    cursor.insert(leaf.to_owned(), value);
    Ok(())
}
