use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Result, SupplyError};

/// Whole-value key-value storage: every `set` replaces the stored JSON.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>>;
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
}

/// A JSON object file; each key is a top-level field.
///
/// Every `set` reads the file, replaces one key and writes it back.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(SupplyError::InvalidInput(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        let mut all = self.read_all()?;
        all.insert(key.to_string(), value);
        let json = serde_json::to_string_pretty(&Value::Object(all))?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), key, "wrote store");
        Ok(())
    }
}

/// In-memory store for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_store_roundtrip_keeps_other_keys() {
        let file = NamedTempFile::new().unwrap();
        let mut store = FileStore::new(file.path());

        // empty file reads as an empty object
        assert_eq!(store.get("a").unwrap(), None);

        store.set("a", json!({"x": 1})).unwrap();
        store.set("b", json!([1, 2])).unwrap();
        store.set("a", json!({"x": 2})).unwrap();

        assert_eq!(store.get("a").unwrap(), Some(json!({"x": 2})));
        assert_eq!(store.get("b").unwrap(), Some(json!([1, 2])));
    }

    #[test]
    fn test_file_store_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nope.json"));
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn test_file_store_rejects_non_object() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "[1, 2, 3]").unwrap();
        let store = FileStore::new(file.path());
        assert!(store.get("a").is_err());
    }
}
