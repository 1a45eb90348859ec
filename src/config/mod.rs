//! Persisted game configuration
//!
//! This module provides:
//! - JSON-based configuration record (human-readable, debuggable)
//! - Field-by-field merge onto defaults when loading older or damaged records
//! - A trait-based key-value backend so the storage location can be swapped
//!
//! # Architecture
//!
//! - `types`: the `Configuration` record, defaults and normalization
//! - `store`: `KeyValueStore` backends and the `ConfigStore` wrapper
//!
//! # Example Usage
//!
//! ```ignore
//! let backend = FileStore::new(default_data_dir())?;
//! let mut store = ConfigStore::new(backend);
//!
//! let mut config = store.load();   // never fails, falls back to defaults
//! config.food_type = "apple".to_string();
//! store.save(&config);             // failures are logged, not returned
//! ```

pub mod store;
pub mod types;

pub use store::{default_data_dir, ConfigStore, FileStore, KeyValueStore};
#[cfg(test)]
pub use store::{MemoryStore, STORAGE_KEY};
pub use types::Configuration;
