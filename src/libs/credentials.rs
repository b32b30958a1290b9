//! Persistent storage for the session credential.
//!
//! The bearer token is the only piece of session state that survives a
//! restart. It is kept under a fixed key (the `.token` file in the
//! application data directory) and read back by the API client on every
//! request, so a token written after the client was built is still honoured.

use super::data_storage::DataStorage;
use anyhow::Result;
use parking_lot::Mutex;
use std::fmt::Debug;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Fixed key under which the token is persisted.
pub const TOKEN_KEY: &str = ".token";

/// Key-value slot holding the bearer token.
///
/// Reads never fail: an unreadable or empty slot is treated as "no
/// credential", which leaves requests unauthenticated and lets the server
/// answer with 401.
pub trait CredentialStore: Debug + Send + Sync {
    fn load(&self) -> Option<String>;

    fn save(&self, token: &str) -> Result<()>;

    /// Removes the token. Clearing an empty store is not an error.
    fn clear(&self) -> Result<()>;
}

/// Token persisted as a file in the application data directory.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(storage: &DataStorage) -> Result<Self> {
        Ok(Self {
            path: storage.get_path(TOKEN_KEY)?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Option<String> {
        let token = fs::read_to_string(&self.path).ok()?;
        let token = token.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::OpenOptions::new().write(true).create(true).truncate(true).open(&self.path)?;
        file.write_all(token.as_bytes())?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-process token slot, used when nothing should touch the disk.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<String> {
        self.token.lock().clone().filter(|token| !token.is_empty())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.token.lock() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.token.lock() = None;
        Ok(())
    }
}
