//! Filesystem draft store.

use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::{Result, SlideFormsError};
use crate::storage::DraftStore;

/// Draft store that keeps one file per key under a base directory.
///
/// The base directory is created on first write. Keys are used as file
/// names with a `.draft` extension.
///
/// # Example
///
/// ```rust,no_run
/// use slide_forms::FsDraftStore;
///
/// let store = FsDraftStore::new("/home/me/.local/share/slide-forms");
/// ```
pub struct FsDraftStore {
    base_dir: PathBuf,
}

impl FsDraftStore {
    /// Create a new `FsDraftStore` rooted at the given directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.draft"))
    }
}

impl DraftStore for FsDraftStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SlideFormsError::Storage(Box::new(e))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| SlideFormsError::Storage(Box::new(e)))?;

        let path = self.path_for(key);
        tokio::fs::write(&path, value)
            .await
            .map_err(|e| SlideFormsError::Storage(Box::new(e)))?;

        tracing::debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SlideFormsError::Storage(Box::new(e))),
        }
    }
}
