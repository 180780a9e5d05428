//! Test utilities providing a temporary data directory that is removed when
//! the environment is dropped, even if the test panics.

use anyhow::Result;
use chrono::FixedOffset;
use tempfile::TempDir;

use super::connection::FileConnection;
use super::key_value::FileStorage;

/// India Standard Time, the default target timezone
pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(5 * 3600 + 30 * 60).expect("valid offset")
}

pub struct TestEnvironment {
    pub connection: FileConnection,
    /// Base directory path for manual inspection if needed
    pub base_path: std::path::PathBuf,
    _temp_dir: TempDir, // Keep alive to prevent cleanup
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = FileConnection::new(temp_dir.path())?;
        Ok(Self {
            connection,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }

    /// A fresh storage handle onto the same directory, as after a restart
    pub fn file_storage(&self) -> FileStorage {
        FileStorage::new(self.connection.clone())
    }
}
