use std::collections::HashMap;

use crate::error::{Result, UserdexError};

use super::KeyValueStore;

/// Volatile backend, mostly for tests. Can be told to fail reads or writes to
/// simulate an unavailable or full storage backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `get` fail.
    pub fn fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Make every subsequent `set`/`remove` fail.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Stored text for a full (already namespaced) key, bypassing failure injection.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads {
            return Err(UserdexError::Storage("storage unavailable".to_string()));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(UserdexError::Storage("quota exceeded".to_string()));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.fail_writes {
            return Err(UserdexError::Storage("quota exceeded".to_string()));
        }
        self.entries.remove(key);
        Ok(())
    }
}
