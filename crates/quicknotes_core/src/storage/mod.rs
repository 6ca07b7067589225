//! Storage slot backends and the note persistence adapter.
//!
//! # Responsibility
//! - Define the `KeyValueStore` seam that holds serialized values by key.
//! - Provide in-memory and SQLite-backed slot implementations.
//! - Load/save the full note list through `NoteStorage`.
//!
//! # Invariants
//! - A `set` either replaces the whole value or leaves the previous one.
//! - `NoteStorage::load`/`save` never return errors to callers.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod adapter;
mod memory;
mod sqlite;

pub use adapter::{LoadError, NoteStorage, SaveError, DEFAULT_STORAGE_KEY};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reported by a slot backend.
#[derive(Debug)]
pub enum StoreError {
    /// SQLite transport or bootstrap failure.
    Db(DbError),
    /// The value does not fit in the backend's remaining capacity.
    QuotaExceeded {
        key: String,
        bytes: usize,
        quota: usize,
    },
    /// The backend is disabled or cannot be reached.
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::QuotaExceeded { key, bytes, quota } => write!(
                f,
                "storage quota exceeded for `{key}`: {bytes} bytes over quota of {quota}"
            ),
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::QuotaExceeded { .. } | Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Named slots holding one serialized string value each.
pub trait KeyValueStore {
    /// Reads the value stored under `key`, `None` when the slot is empty.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    /// Replaces the value stored under `key` in a single write.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }
}
