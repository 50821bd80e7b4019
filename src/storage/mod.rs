//! JSON file-backed stores for subscribers, chats, templates and keywords.
//!
//! Every store follows the same contract: load a full snapshot, act on it,
//! write the full document back. There is no locking; under concurrent
//! writers the later write wins. A missing or unparseable file is treated
//! as an empty collection, while any other I/O failure is fatal and
//! propagated to the caller.

pub mod chats;
pub mod keywords;
pub mod subscribers;
pub mod templates;

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Errors surfaced by store operations.
///
/// Parse failures never appear here: a corrupt document is recovered as an
/// empty collection, so only genuine I/O and encoding faults are fatal.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("storage encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Raw persistence seam below the typed stores.
///
/// Production binds this to one JSON file per collection; tests substitute
/// [`MemoryBackend`] to exercise store logic without touching disk.
pub trait StorageBackend: Send + Sync {
    /// Read the raw document for `key`, or `None` if it was never written.
    fn read(&self, key: &str) -> io::Result<Option<String>>;
    /// Overwrite the document for `key` in full.
    fn write(&self, key: &str, contents: &str) -> io::Result<()>;
}

/// File-backed storage: one `<key>.json` document per collection.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, key: &str, contents: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), contents)
    }
}

/// In-memory storage used by tests.
///
/// A freshly constructed backend holds no documents, which reproduces the
/// missing-file ⇒ empty-collection contract of [`FileBackend`].
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a raw document, e.g. to simulate a corrupt file on disk.
    pub fn seed(&self, key: &str, contents: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), contents.to_string());
        }
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "storage mutex poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, contents: &str) -> io::Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "storage mutex poisoned"))?;
        entries.insert(key.to_string(), contents.to_string());
        Ok(())
    }
}

/// Shared handle to a backend, cheap to clone into handlers and services.
pub type Backend = Arc<dyn StorageBackend>;

/// Decode a stored document, falling back to the collection default when the
/// document is absent or corrupt. Only read I/O errors are fatal.
fn load_or_default<T>(backend: &Backend, key: &str) -> Result<T, StorageError>
where
    T: Default + serde::de::DeserializeOwned,
{
    match backend.read(key)? {
        None => Ok(T::default()),
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!("{key} store is corrupt, treating as empty: {e}");
                Ok(T::default())
            }
        },
    }
}

/// Serialize and persist a full collection document.
fn persist<T: serde::Serialize>(backend: &Backend, key: &str, value: &T) -> Result<(), StorageError> {
    let raw = serde_json::to_string_pretty(value)?;
    backend.write(key, &raw)?;
    Ok(())
}
