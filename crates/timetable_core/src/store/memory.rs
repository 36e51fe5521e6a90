//! In-memory store for tests and ephemeral shells.

use super::{ensure_key, KeyValueStore, StoreResult};
use std::cell::RefCell;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        ensure_key(key)?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, blob: &str) -> StoreResult<()> {
        ensure_key(key)?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        ensure_key(key)?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
