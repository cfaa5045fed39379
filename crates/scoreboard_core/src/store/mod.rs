//! Persistent store adapter.
//!
//! # Responsibility
//! - Define the key-value contract the core persists through.
//! - Map boards and settings to their stored text representations.
//!
//! # Invariants
//! - Store failures never alter in-memory state; callers log and continue.
//! - Values are UTF-8 text; structure lives in the adapter, not the backend.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory_kv;
mod scoreboard_store;
mod sqlite_kv;

pub use memory_kv::MemoryKvStore;
pub use scoreboard_store::{
    ScoreboardStore, BOARDS_KEY, DARK_MODE_KEY, POINT_LABEL_KEY,
};
pub use sqlite_kv::SqliteKvStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failure raised by key-value backends or payload mapping.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    /// The store file was written by a newer build.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
    Serialization(serde_json::Error),
    InvalidData(String),
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite store error: {err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "store schema version {found} is newer than supported {supported}"
            ),
            Self::Serialization(err) => write!(f, "store payload serialization failed: {err}"),
            Self::InvalidData(message) => write!(f, "invalid stored data: {message}"),
            Self::Unavailable(message) => write!(f, "store unavailable: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Durable local key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }
}
