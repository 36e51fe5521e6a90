//! Key-value persistence adapter.
//!
//! # Responsibility
//! - Define the `load/save/delete` contract the service mirrors registries to.
//! - Provide SQLite-backed and in-memory implementations.
//!
//! # Invariants
//! - Values are opaque text blobs; the store never inspects them.
//! - `save` overwrites (last writer wins); `delete` of a missing key is a no-op.

use crate::db::DbError;
use thiserror::Error;

mod memory;
mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

/// Key holding the serialized subject registry.
pub const SUBJECTS_KEY: &str = "timetable_subjects";
/// Key holding the serialized slot registry.
pub const SLOTS_KEY: &str = "timetable_slots";

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("invalid store key: `{0}`")]
    InvalidKey(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key-value storage contract used for registry write-through.
pub trait KeyValueStore {
    fn load(&self, key: &str) -> StoreResult<Option<String>>;
    fn save(&self, key: &str, blob: &str) -> StoreResult<()>;
    fn delete(&self, key: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, blob: &str) -> StoreResult<()> {
        (**self).save(key, blob)
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        (**self).delete(key)
    }
}

fn ensure_key(key: &str) -> StoreResult<()> {
    if key.trim().is_empty() {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}
