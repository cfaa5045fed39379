//! Volatile key-value store used by tests and degraded sessions.

use super::{KeyValueStore, StoreError, StoreResult};
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct MemoryKvStore {
    entries: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail with `StoreError::Unavailable`.
    ///
    /// Reads keep working so a session can observe what was last stored.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        if self.fail_writes {
            return Err(StoreError::Unavailable(format!("write to `{key}` rejected")));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
