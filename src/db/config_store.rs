// src/db/config_store.rs
//! Path-oriented view of the admin configuration table

use rusqlite::{params, Connection};

use crate::consts::CONFIG_TABLE;
use crate::Result;

/// One stored configuration value (any scope) for a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValue {
    pub config_id: i64,
    pub value: Option<String>,
}

pub trait ConfigStore {
    /// Every stored value for `path`, ordered by `config_id`
    fn values_by_path(&self, path: &str) -> Result<Vec<ConfigValue>>;

    fn set_value_by_id(&self, config_id: i64, value: &str) -> Result<()>;
}

impl<S: ConfigStore + ?Sized> ConfigStore for &S {
    fn values_by_path(&self, path: &str) -> Result<Vec<ConfigValue>> {
        (**self).values_by_path(path)
    }

    fn set_value_by_id(&self, config_id: i64, value: &str) -> Result<()> {
        (**self).set_value_by_id(config_id, value)
    }
}

impl ConfigStore for Connection {
    fn values_by_path(&self, path: &str) -> Result<Vec<ConfigValue>> {
        let mut stmt = self.prepare(&format!(
            "SELECT config_id, value FROM {CONFIG_TABLE} WHERE path = ?1 ORDER BY config_id"
        ))?;
        let values = stmt
            .query_map([path], |row| {
                Ok(ConfigValue {
                    config_id: row.get(0)?,
                    value: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(values)
    }

    fn set_value_by_id(&self, config_id: i64, value: &str) -> Result<()> {
        self.execute(
            &format!("UPDATE {CONFIG_TABLE} SET value = ?1 WHERE config_id = ?2"),
            params![value, config_id],
        )?;
        Ok(())
    }
}
