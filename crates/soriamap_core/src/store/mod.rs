//! Local persistence boundary.
//!
//! # Responsibility
//! - Define the key-value string capability the core persists through.
//! - Provide SQLite-backed and in-memory implementations.
//! - Encode the POI collection as one JSON document under one key.
//!
//! # Invariants
//! - Writes are whole-document overwrites; there are no partial writes.
//! - A corrupt stored document is recovered as an empty collection, never
//!   surfaced as a user-facing error.

use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod poi_store;
mod sqlite;

pub use poi_store::{PoiStore, POI_STORAGE_KEY};
pub use sqlite::SqliteKeyValueStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence-layer error.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    /// The on-disk schema is newer than this binary supports.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// The collection could not be serialized for writing.
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "store schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Serialize(err) => write!(f, "failed to serialize poi collection: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Key-value string store capability.
///
/// Mirrors the browser-local storage contract: `get` returns the stored
/// string or nothing, `set` overwrites unconditionally.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

/// Key-value store backed by a plain map, for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
