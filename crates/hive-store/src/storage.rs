//! Durable session storage backends.
//!
//! The session store persists the full [`Session`] as one record under a
//! fixed storage key after every successful mutation, and rehydrates it at
//! initialization. Two backends are provided: a single-file JSON store for
//! real use and an in-memory slot for tests and ephemeral sessions.

use async_trait::async_trait;
use hive_core::{Error, Result, Session};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Fixed identifier the session record is stored under.
pub const STORAGE_KEY: &str = "auth-storage";

/// Durable storage for the serialized session, readable/writable as a unit.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Loads the persisted session, or `None` if nothing was stored.
    async fn load(&self) -> Result<Option<Session>>;

    /// Persists the full session, replacing any previous record.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Removes the persisted record, if any.
    async fn clear(&self) -> Result<()>;
}

#[async_trait]
impl<S: SessionStorage + ?Sized> SessionStorage for std::sync::Arc<S> {
    async fn load(&self) -> Result<Option<Session>> {
        (**self).load().await
    }

    async fn save(&self, session: &Session) -> Result<()> {
        (**self).save(session).await
    }

    async fn clear(&self) -> Result<()> {
        (**self).clear().await
    }
}

// ============================================================================
// FileSessionStorage
// ============================================================================

/// Session storage backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    /// Creates a file-backed storage at an explicit path.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Creates a file-backed storage under `dir`, using the fixed storage
    /// key as the file name.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            path: dir.as_ref().join(format!("{STORAGE_KEY}.json")),
        }
    }

    /// The file this storage reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStorage for FileSessionStorage {
    async fn load(&self) -> Result<Option<Session>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let session = serde_json::from_slice(&bytes).map_err(|e| {
            Error::storage(format!(
                "corrupt session record at {}: {e}",
                self.path.display()
            ))
        })?;
        Ok(Some(session))
    }

    async fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(session)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// MemorySessionStorage
// ============================================================================

/// In-memory session storage, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    slot: Mutex<Option<Session>>,
}

impl MemorySessionStorage {
    /// Creates an empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an in-memory storage pre-seeded with a session, as if a
    /// previous process had persisted it.
    pub fn with_session(session: Session) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }
}

#[async_trait]
impl SessionStorage for MemorySessionStorage {
    async fn load(&self) -> Result<Option<Session>> {
        Ok(self.slot.lock().await.clone())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        *self.slot.lock().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.slot.lock().await = None;
        Ok(())
    }
}
