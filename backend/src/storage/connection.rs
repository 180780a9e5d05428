use anyhow::{anyhow, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the data folder created inside the user's Documents directory
pub const DEFAULT_DATA_FOLDER: &str = "Expense Tracker";

/// FileConnection manages the data directory and the file path of each key
#[derive(Debug, Clone)]
pub struct FileConnection {
    base_directory: PathBuf,
}

impl FileConnection {
    /// Create a new connection with a base directory, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("📁 Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a new connection in the default data directory
    /// (~/Documents/Expense Tracker, or ~/Expense Tracker without a Documents folder)
    pub fn new_default() -> Result<Self> {
        Self::new(Self::default_data_directory()?)
    }

    pub fn default_data_directory() -> Result<PathBuf> {
        let parent = dirs::document_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| anyhow!("Could not determine home directory"))?;
        Ok(parent.join(DEFAULT_DATA_FOLDER))
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// File holding the value of `key`
    pub fn key_file_path(&self, key: &str) -> PathBuf {
        self.base_directory.join(format!("{}.json", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");

        let connection = FileConnection::new(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(connection.base_directory(), nested.as_path());
    }

    #[test]
    fn test_key_file_path() {
        let temp_dir = TempDir::new().unwrap();
        let connection = FileConnection::new(temp_dir.path()).unwrap();
        assert_eq!(
            connection.key_file_path("expenses"),
            temp_dir.path().join("expenses.json")
        );
    }
}
