use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;

use crate::error::AppError;

/// JSON document persisted wholesale in a single file.
///
/// Every mutation goes through `update`, which holds the store's write lock for the whole
/// load → modify → save sequence. Concurrent writers are therefore serialized and never
/// overwrite each other's changes, regardless of which fields they touch.
pub struct JsonStore<T> {
    /// Location of the document on disk.
    path: PathBuf,
    /// Serializes read-modify-write sequences.
    write_lock: Mutex<()>,
    _document: PhantomData<fn() -> T>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Creates a store backed by the file at `path`.
    ///
    /// The file does not need to exist; it is created on the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            _document: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the document.
    ///
    /// # Returns
    /// - `Ok(T)` - Parsed document, or `T::default()` if the file is missing or empty
    /// - `Err(AppError::IoErr)` - File exists but could not be read
    /// - `Err(AppError::JsonErr)` - File content is not a valid document
    pub async fn load(&self) -> Result<T, AppError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
            Err(e) => return Err(e.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(T::default());
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Saves the document, replacing the file atomically.
    ///
    /// Writes to a sibling temporary file and renames it over the target so a crash never
    /// leaves a truncated document behind.
    ///
    /// # Returns
    /// - `Ok(())` - Document written
    /// - `Err(AppError)` - Serialization or filesystem error
    pub async fn save(&self, document: &T) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        self.write(document).await
    }

    /// Applies `mutate` to the current document and saves the result.
    ///
    /// # Arguments
    /// - `mutate` - Closure changing the document in place; its return value is passed through
    ///
    /// # Returns
    /// - `Ok(R)` - Value returned by `mutate`, after the document was saved
    /// - `Err(AppError)` - Document could not be loaded or saved
    pub async fn update<R>(&self, mutate: impl FnOnce(&mut T) -> R) -> Result<R, AppError> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.load().await?;
        let result = mutate(&mut document);
        self.write(&document).await?;

        Ok(result)
    }

    async fn write(&self, document: &T) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(document)?;
        let tmp_path = self.path.with_extension("json.tmp");

        tokio::fs::write(&tmp_path, bytes).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        Ok(())
    }
}
