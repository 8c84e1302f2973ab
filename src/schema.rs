// src/schema.rs
//! Discovery of encrypted configuration paths
//!
//! The field schema is a TOML file of `[[field]]` tables. Each has a `path`
//! plus arbitrary string attributes:
//!
//! ```toml
//! [[field]]
//! path = "payment/gateway/api_key"
//! backend_model = "encrypted"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::consts::ENCRYPTED_BACKEND_MODEL;
use crate::Result;

/// Source of the configuration paths whose values are stored encrypted
pub trait EncryptedPathSource {
    fn encrypted_paths(&self) -> Result<Vec<String>>;
}

impl EncryptedPathSource for Vec<String> {
    fn encrypted_paths(&self) -> Result<Vec<String>> {
        Ok(self.clone())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldSchema {
    #[serde(default, rename = "field")]
    fields: Vec<FieldDef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldDef {
    pub path: String,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, toml::Value>,
}

impl FieldSchema {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading field schema");
        Self::from_toml(&std::fs::read_to_string(path)?)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Paths of fields whose `attribute` equals `value`, in file order,
    /// first occurrence wins
    pub fn field_paths_by_attribute(&self, attribute: &str, value: &str) -> Vec<String> {
        let mut paths: Vec<String> = Vec::new();
        for field in &self.fields {
            let matches = field
                .attributes
                .get(attribute)
                .and_then(toml::Value::as_str)
                == Some(value);
            if matches && !paths.contains(&field.path) {
                paths.push(field.path.clone());
            }
        }
        paths
    }
}

impl EncryptedPathSource for FieldSchema {
    fn encrypted_paths(&self) -> Result<Vec<String>> {
        Ok(self.field_paths_by_attribute("backend_model", ENCRYPTED_BACKEND_MODEL))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"
        [[field]]
        path = "payment/gateway/api_key"
        backend_model = "encrypted"

        [[field]]
        path = "general/store/name"

        [[field]]
        path = "carriers/ups/password"
        backend_model = "encrypted"
        scope = "website"

        [[field]]
        path = "payment/gateway/api_key"
        backend_model = "encrypted"
    "#;

    #[test]
    fn finds_encrypted_paths_in_order_without_duplicates() {
        let schema = FieldSchema::from_toml(SCHEMA).unwrap();
        assert_eq!(schema.fields().len(), 4);
        assert_eq!(
            schema.encrypted_paths().unwrap(),
            vec!["payment/gateway/api_key", "carriers/ups/password"]
        );
        assert_eq!(
            schema.field_paths_by_attribute("scope", "website"),
            vec!["carriers/ups/password"]
        );
    }

    #[test]
    fn empty_schema_has_no_paths() {
        let schema = FieldSchema::from_toml("").unwrap();
        assert!(schema.encrypted_paths().unwrap().is_empty());
    }
}
