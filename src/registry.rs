//! Registry of sessions that belong to running specialist subagents.
//!
//! The file-backed store is read, modified and rewritten whole on every
//! start/stop. There is no locking: overlapping hook processes race with
//! last-writer-wins, which is acceptable because entries form an idempotent
//! set.

use crate::error::RegistryError;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Storage for the subagent session set.
pub trait RegistryStore {
    /// Current sessions. Unreadable or corrupt storage reads as empty.
    fn read(&self) -> BTreeSet<String>;

    /// Replace the stored sessions.
    fn write(&self, sessions: &BTreeSet<String>) -> Result<(), RegistryError>;

    fn contains(&self, session_id: &str) -> bool {
        self.read().contains(session_id)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    sessions: BTreeSet<String>,
}

/// JSON file store: `{"sessions": [...]}`
#[derive(Debug, Clone)]
pub struct FileRegistry {
    path: PathBuf,
}

impl FileRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RegistryStore for FileRegistry {
    fn read(&self) -> BTreeSet<String> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                debug!("Registry {:?} not readable ({}), treating as empty", self.path, e);
                return BTreeSet::new();
            }
        };

        match serde_json::from_str::<RegistryFile>(&content) {
            Ok(file) => file.sessions,
            Err(e) => {
                warn!("Corrupt registry {:?} ({}), treating as empty", self.path, e);
                BTreeSet::new()
            }
        }
    }

    fn write(&self, sessions: &BTreeSet<String>) -> Result<(), RegistryError> {
        let io_err = |source: std::io::Error| RegistryError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let body = serde_json::to_string_pretty(&RegistryFile {
            sessions: sessions.clone(),
        })?;
        fs::write(&self.path, body).map_err(io_err)
    }
}

/// In-memory store for tests and embedders
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    sessions: RefCell<BTreeSet<String>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sessions<I, S>(sessions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sessions: RefCell::new(sessions.into_iter().map(Into::into).collect()),
        }
    }
}

impl RegistryStore for MemoryRegistry {
    fn read(&self) -> BTreeSet<String> {
        self.sessions.borrow().clone()
    }

    fn write(&self, sessions: &BTreeSet<String>) -> Result<(), RegistryError> {
        *self.sessions.borrow_mut() = sessions.clone();
        Ok(())
    }
}

/// Add `session_id`. Returns whether the set changed; adding a present id
/// writes nothing.
pub fn register_start<R: RegistryStore + ?Sized>(
    store: &R,
    session_id: &str,
) -> Result<bool, RegistryError> {
    let mut sessions = store.read();
    if !sessions.insert(session_id.to_string()) {
        return Ok(false);
    }
    store.write(&sessions)?;
    debug!("Registered subagent session {}", session_id);
    Ok(true)
}

/// Remove `session_id`. Returns whether the set changed; removing an absent
/// id writes nothing.
pub fn register_stop<R: RegistryStore + ?Sized>(
    store: &R,
    session_id: &str,
) -> Result<bool, RegistryError> {
    let mut sessions = store.read();
    if !sessions.remove(session_id) {
        return Ok(false);
    }
    store.write(&sessions)?;
    debug!("Unregistered subagent session {}", session_id);
    Ok(true)
}
