//! Process-wide ID-token cache.
//!
//! The store holds the most recently minted session token so the HTTP client
//! does not have to await the identity provider on every call. It is written
//! only by the session manager and read by the HTTP client.

use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::warn;

/// Fixed storage key for the persisted token.
const TOKEN_STORAGE_KEY: &str = "id_token";

/// Durable storage behind the in-memory cache.
///
/// I/O failures never propagate to callers; the store degrades to
/// in-memory-only and logs a warning.
#[cfg_attr(test, mockall::automock)]
pub trait TokenPersistence: Send + Sync {
    fn load(&self) -> io::Result<Option<String>>;
    fn save(&self, token: &str) -> io::Result<()>;
    fn remove(&self) -> io::Result<()>;
}

/// File-backed persistence: the token lives in a single file named after the
/// fixed storage key inside the given directory.
pub struct FilePersistence {
    path: PathBuf,
}

impl FilePersistence {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(TOKEN_STORAGE_KEY),
        }
    }
}

impl TokenPersistence for FilePersistence {
    fn load(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(token) => Ok(Some(token)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)
    }

    fn remove(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// In-memory token cache with optional durable persistence.
///
/// All operations are synchronous; `clear` in particular must be callable
/// from the logout path before any navigation happens.
pub struct TokenStore {
    cached: Mutex<Option<String>>,
    persistence: Option<Box<dyn TokenPersistence>>,
}

impl TokenStore {
    /// Store without durable persistence.
    pub fn in_memory() -> Self {
        Self {
            cached: Mutex::new(None),
            persistence: None,
        }
    }

    /// Store backed by a token file in `dir`. A previously persisted token is
    /// restored into the cache, matching a client that reloads mid-session.
    pub fn on_disk(dir: impl Into<PathBuf>) -> Self {
        Self::with_persistence(Box::new(FilePersistence::new(dir)))
    }

    /// Store backed by an arbitrary persistence layer.
    pub fn with_persistence(persistence: Box<dyn TokenPersistence>) -> Self {
        let restored = match persistence.load() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "failed to restore persisted token");
                None
            }
        };
        Self {
            cached: Mutex::new(restored),
            persistence: Some(persistence),
        }
    }

    /// Overwrite the cached token and persist it.
    pub fn set(&self, token: &str) {
        *self.cached.lock().unwrap() = Some(token.to_string());
        if let Some(persistence) = &self.persistence {
            if let Err(e) = persistence.save(token) {
                warn!(error = %e, "failed to persist token, keeping in-memory copy");
            }
        }
    }

    /// Current token, or `None` when never set or cleared.
    pub fn get(&self) -> Option<String> {
        self.cached.lock().unwrap().clone()
    }

    /// Drop the cached token and its persisted copy.
    pub fn clear(&self) {
        *self.cached.lock().unwrap() = None;
        if let Some(persistence) = &self.persistence {
            if let Err(e) = persistence.remove() {
                warn!(error = %e, "failed to remove persisted token");
            }
        }
    }
}
