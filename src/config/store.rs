//! Key-value storage for the configuration record
//!
//! `ConfigStore` is the only thing the rest of the game talks to. It never
//! returns an error: a record that cannot be read or parsed means "nothing
//! saved", and a failed write is logged and dropped.

use super::types::Configuration;
use std::fs;
use std::path::{Path, PathBuf};

/// Fixed key under which the configuration record is stored
pub const STORAGE_KEY: &str = "animalAppConfig";

/// Error types for storage backends
#[derive(Debug)]
pub enum StoreError {
    IoError(std::io::Error),
    SerializationError(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::IoError(e) => write!(f, "IO error: {}", e),
            StoreError::SerializationError(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::IoError(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::SerializationError(err)
    }
}

/// A durable string slot per key
///
/// # Design Pattern: Trait-based Backend
///
/// The game only needs "read the value for a key" and "replace the value for
/// a key", so anything from a directory of files to an in-memory map can
/// hold the record.
pub trait KeyValueStore {
    /// Returns `Ok(None)` when nothing has been stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Stores each key as `<key>.json` inside one directory
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `directory`
    ///
    /// The directory will be created if it doesn't exist.
    pub fn new(directory: impl AsRef<Path>) -> Result<Self, StoreError> {
        let directory = directory.as_ref().to_path_buf();

        if !directory.exists() {
            fs::create_dir_all(&directory)?;
        }

        Ok(FileStore { directory })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        fs::write(&path, value)?;
        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }
}

/// In-memory backend
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    entries: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Loads and saves the `Configuration` record through a backend
pub struct ConfigStore<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> ConfigStore<S> {
    pub fn new(backend: S) -> Self {
        ConfigStore { backend }
    }

    /// Reads the persisted configuration, or the defaults when there is none
    pub fn load(&self) -> Configuration {
        match self.backend.get(STORAGE_KEY) {
            Ok(Some(json)) => {
                let config = Configuration::from_json_lossy(&json);
                tracing::info!(
                    "Loaded configuration: {} animal(s), food '{}', random {}",
                    config.active_animals.len(),
                    config.food_type,
                    config.is_random
                );
                config
            }
            Ok(None) => {
                tracing::info!("No saved configuration, using defaults");
                Configuration::default()
            }
            Err(e) => {
                tracing::warn!("Could not read saved configuration: {}", e);
                Configuration::default()
            }
        }
    }

    /// Persists the configuration; failures are logged and swallowed
    pub fn save(&mut self, config: &Configuration) {
        if let Err(e) = self.write(config) {
            tracing::warn!("Could not save configuration: {}", e);
        }
    }

    fn write(&mut self, config: &Configuration) -> Result<(), StoreError> {
        let json = config.to_json()?;
        self.backend.set(STORAGE_KEY, &json)
    }

    #[cfg(test)]
    pub fn backend(&self) -> &S {
        &self.backend
    }
}

/// Directory used for the configuration file
///
/// `<platform data dir>/feed-the-animals`, or `./saves` when the platform
/// has no data directory.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|p| p.join("feed-the-animals"))
        .unwrap_or_else(|| PathBuf::from("./saves"))
}
