//! # Key-Value Storage Implementations
//!
//! - [`FileStorage`]: one JSON file per key inside the data directory,
//!   written atomically (temp file, then rename)
//! - [`MemoryStorage`]: an in-process map for tests and throwaway sessions
//!
//! ## File Structure
//!
//! ```text
//! Expense Tracker/
//! ├── config.yaml
//! ├── expenses.json          ← key "expenses"
//! └── expenses.corrupt.json  ← only after an unreadable load
//! ```

use anyhow::{anyhow, Context, Result};
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Mutex;

use super::connection::FileConnection;
use super::traits::KeyValueStorage;

/// File-backed key-value storage
#[derive(Debug, Clone)]
pub struct FileStorage {
    connection: FileConnection,
}

impl FileStorage {
    pub fn new(connection: FileConnection) -> Self {
        Self { connection }
    }

    fn read_bytes(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        match fs::read(path) {
            Ok(bytes) => {
                debug!("Read {} bytes from {:?}", bytes.len(), path);
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {:?}", path)),
        }
    }

    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        let base_dir = self.connection.base_directory();
        if !base_dir.exists() {
            fs::create_dir_all(base_dir)
                .with_context(|| format!("Failed to create data directory {:?}", base_dir))?;
        }

        // Use atomic write pattern: write to temp file, then rename
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, bytes).with_context(|| format!("Failed to write {:?}", temp_path))?;
        fs::rename(&temp_path, path).with_context(|| format!("Failed to replace {:?}", path))?;

        debug!("Saved {} bytes to {:?}", bytes.len(), path);
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.connection.key_file_path(key);
        match self.read_bytes(&path)? {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| anyhow!("{:?} is not valid UTF-8: {}", path, e)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.connection.key_file_path(key);
        self.write_bytes(&path, value.as_bytes())
    }

    fn copy_value(&self, from: &str, to: &str) -> Result<bool> {
        let source = self.connection.key_file_path(from);
        match self.read_bytes(&source)? {
            Some(bytes) => {
                self.write_bytes(&self.connection.key_file_path(to), &bytes)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// In-memory key-value storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing content, e.g. a value left by an older version
    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::new();
        if let Ok(mut values) = storage.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        storage
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|e| anyhow!("Memory storage lock poisoned: {}", e))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| anyhow!("Memory storage lock poisoned: {}", e))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn copy_value(&self, from: &str, to: &str) -> Result<bool> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| anyhow!("Memory storage lock poisoned: {}", e))?;
        match values.get(from).cloned() {
            Some(value) => {
                values.insert(to.to_string(), value);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
