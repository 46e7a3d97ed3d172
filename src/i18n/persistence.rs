//! Durable storage for the selected language.
//!
//! The preference is stored as a single JSON record under the key
//! [`STORAGE_KEY`]:
//!
//! ```json
//! {"state":{"currentLanguage":"ko"},"version":0}
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::debug;

/// Fixed key of the persisted preference record.
pub const STORAGE_KEY: &str = "language-storage";

/// Version written into new preference records.
const STATE_VERSION: u32 = 0;

/// Errors raised by a [`PreferenceStorage`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access preference storage at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode preference record")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedLanguage {
    pub current_language: String,
}

/// The persisted record, wrapping the state with a format version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    pub state: PersistedLanguage,
    #[serde(default)]
    pub version: u32,
}

impl PersistedState {
    pub fn new(code: &str) -> Self {
        Self {
            state: PersistedLanguage {
                current_language: code.to_string(),
            },
            version: STATE_VERSION,
        }
    }

    /// Parse a raw record. Malformed content yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(state) => Some(state),
            Err(e) => {
                debug!("Ignoring malformed preference record: {}", e);
                None
            }
        }
    }

    pub fn encode(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Key-value storage that survives restarts.
pub trait PreferenceStorage: Send + Sync {
    /// Read the raw record, `Ok(None)` if nothing was stored yet.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Replace the raw record.
    fn save(&self, raw: &str) -> Result<(), StorageError>;
}

/// Stores the record as `<dir>/language-storage.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", STORAGE_KEY)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save(&self, raw: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&self.path, raw).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// In-process storage, for tests and embedders without a filesystem.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    record: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with a raw record.
    pub fn with_record(raw: impl Into<String>) -> Self {
        Self {
            record: Mutex::new(Some(raw.into())),
        }
    }

    /// Current raw record.
    pub fn record(&self) -> Option<String> {
        self.record.lock().ok().and_then(|record| record.clone())
    }
}

impl PreferenceStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.record())
    }

    fn save(&self, raw: &str) -> Result<(), StorageError> {
        if let Ok(mut record) = self.record.lock() {
            *record = Some(raw.to_string());
        }
        Ok(())
    }
}
