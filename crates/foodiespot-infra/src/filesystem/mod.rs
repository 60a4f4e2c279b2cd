//! Filesystem adapters for the FoodieSpot chat client.
//!
//! Implements the `SessionStore` trait from `foodiespot-core` on top of a
//! single file in the data directory, and resolves where that directory
//! lives.

use std::path::{Path, PathBuf};

use foodiespot_core::session::store::SessionStore;
use foodiespot_types::chat::SessionId;
use foodiespot_types::error::SessionStoreError;

/// File name holding the current session id inside the data directory.
const SESSION_FILE: &str = "session";

/// File-backed session id store.
///
/// One file maps the local device to its single active conversation id;
/// absence of the file means "no active session, bootstrap a new one".
/// Writes go through a sibling temp file followed by a rename so a
/// partially written id is never observable.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store rooted at `{data_dir}/session`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SESSION_FILE),
        }
    }

    /// The file this store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .unwrap_or_default()
            .to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<SessionId>, SessionStoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                let trimmed = content.trim();
                if trimmed.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(SessionId::from(trimmed)))
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, session_id: &SessionId) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        // Write-then-rename keeps the visible file whole at all times.
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, session_id.as_str()).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `FOODIESPOT_DATA_DIR` environment variable
/// 2. Platform home directory (`~/.foodiespot`)
/// 3. Current directory fallback (`./.foodiespot`)
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("FOODIESPOT_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".foodiespot");
    }

    PathBuf::from(".foodiespot")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_load_missing_file_is_absent() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        store.save(&SessionId::from("s-123")).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(SessionId::from("s-123")));
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_id() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        store.save(&SessionId::from("first")).await.unwrap();
        store.save(&SessionId::from("second")).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(SessionId::from("second")));
    }

    #[tokio::test]
    async fn test_save_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        store.save(&SessionId::from("s-1")).await.unwrap();
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn test_save_creates_data_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("does").join("not").join("exist");
        let store = FileSessionStore::new(&nested);

        store.save(&SessionId::from("s-1")).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(SessionId::from("s-1")));
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        store.save(&SessionId::from("s-1")).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        // Clearing again is not an error.
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_whitespace_and_empty_read_as_absent() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        tokio::fs::write(store.path(), "  \n").await.unwrap();
        assert!(store.load().await.unwrap().is_none());

        tokio::fs::write(store.path(), "\n s-9 \n").await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(SessionId::from("s-9")));
    }

    #[test]
    fn test_resolve_data_dir_from_env() {
        // SAFETY: This test is single-threaded and restores the env var immediately.
        unsafe {
            std::env::set_var("FOODIESPOT_DATA_DIR", "/tmp/test-foodiespot");
        }
        let dir = resolve_data_dir();
        assert_eq!(dir, PathBuf::from("/tmp/test-foodiespot"));
        unsafe {
            std::env::remove_var("FOODIESPOT_DATA_DIR");
        }
    }
}
