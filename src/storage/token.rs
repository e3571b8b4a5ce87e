//! Token store implementations.
//!
//! [`FileTokenStore`] keeps the token in a small versioned JSON document and
//! writes it atomically (write-to-temp + rename) so a crash never leaves a
//! truncated file behind.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "token": "eyJhbGciOi..."
//! }
//! ```

use crate::domain::error::{Result, RosterError};
use crate::storage::backend::TokenStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenFile {
    version: u32,
    #[serde(default)]
    token: Option<String>,
}

impl Default for TokenFile {
    fn default() -> Self {
        Self {
            version: 1,
            token: None,
        }
    }
}

/// JSON file token store.
///
/// The token is cached in memory after the initial load; every mutation is
/// persisted immediately.
#[derive(Debug)]
pub struct FileTokenStore {
    file_path: PathBuf,
    data: TokenFile,
}

impl FileTokenStore {
    /// Opens or creates a token store at `file_path`.
    ///
    /// Parent directories are created automatically. A missing file is an
    /// empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or an
    /// existing file cannot be read or parsed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use zroster::storage::{FileTokenStore, TokenStore};
    /// use std::path::PathBuf;
    ///
    /// let store = FileTokenStore::new(PathBuf::from("/tmp/zroster/token.json"))?;
    /// let token = store.load()?;
    /// # Ok::<(), zroster::RosterError>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening token store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::read(&file_path)?
        } else {
            TokenFile::default()
        };

        tracing::debug!(has_token = data.token.is_some(), "token store opened");
        Ok(Self { file_path, data })
    }

    fn read(path: &Path) -> Result<TokenFile> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| RosterError::Storage(format!("failed to parse token file: {e}")))
    }

    fn write(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)?;
        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing token file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.data.token.clone())
    }

    fn save(&mut self, token: &str) -> Result<()> {
        let _span = tracing::debug_span!("token_store_save").entered();
        self.data.token = Some(token.to_string());
        self.write()
    }

    fn clear(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("token_store_clear").entered();
        if self.data.token.is_none() {
            return Ok(());
        }
        self.data.token = None;
        self.write()
    }
}

/// Token store that lives only as long as the plugin instance.
///
/// Used when the data directory is not writable.
#[derive(Debug, Default, Clone)]
pub struct MemoryTokenStore {
    token: Option<String>,
}

impl MemoryTokenStore {
    #[must_use]
    pub const fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.token.clone())
    }

    fn save(&mut self, token: &str) -> Result<()> {
        self.token = Some(token.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.token = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("token.json")).unwrap();

        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn token_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");

        let mut store = FileTokenStore::new(path.clone()).unwrap();
        store.save("secret-token").unwrap();
        drop(store);

        let reopened = FileTokenStore::new(path.clone()).unwrap();
        assert_eq!(reopened.load().unwrap().as_deref(), Some("secret-token"));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn clear_removes_token_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");

        let mut store = FileTokenStore::new(path.clone()).unwrap();
        store.save("secret-token").unwrap();
        store.clear().unwrap();

        let reopened = FileTokenStore::new(path).unwrap();
        assert_eq!(reopened.load().unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileTokenStore::new(path).unwrap_err();
        assert!(matches!(err, RosterError::Storage(_)));
    }

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryTokenStore::default();
        store.save("abc").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("abc"));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
