use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

use crate::error::TestError;

/// File name of the channel document inside the test directory.
pub const CHANNELS_FILE: &str = "channels.json";

/// File name of the admin document inside the test directory.
pub const ADMINS_FILE: &str = "admin.json";

/// Test context holding a temporary directory with seeded config documents.
///
/// The directory and everything in it is removed when the context is dropped, so keep the
/// context alive for as long as the stores under test are in use.
pub struct TestContext {
    /// Temporary directory owning the document files.
    dir: TempDir,
}

impl TestContext {
    /// Wraps an already-populated temporary directory.
    pub fn new(dir: TempDir) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the channel document.
    pub fn channels_path(&self) -> PathBuf {
        self.dir.path().join(CHANNELS_FILE)
    }

    /// Path of the admin allow-list document.
    pub fn admins_path(&self) -> PathBuf {
        self.dir.path().join(ADMINS_FILE)
    }

    /// Reads the channel document back as raw JSON.
    ///
    /// Useful to assert on exactly what the bot persisted, independent of its own types.
    ///
    /// # Returns
    /// - `Ok(Value)` - Parsed document
    /// - `Err(TestError)` - File missing or not valid JSON
    pub fn read_channels(&self) -> Result<Value, TestError> {
        read_json(&self.channels_path())
    }

    /// Reads the admin document back as raw JSON.
    pub fn read_admins(&self) -> Result<Value, TestError> {
        read_json(&self.admins_path())
    }
}

fn read_json(path: &Path) -> Result<Value, TestError> {
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}
