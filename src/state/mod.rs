//! Durable scalar state that survives restarts.
//!
//! The listing persists its current page and gender filter so that a new
//! session picks up where the last one left off. Persistence is best-effort:
//! read failures fall back to defaults, write failures are logged and
//! swallowed, and the in-memory value stays authoritative for the session.

mod file;
mod memory;

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Result, UserdexError};

pub use file::FileStore;
pub use memory::MemoryStore;

/// Namespace prepended to every persisted key.
pub const KEY_PREFIX: &str = "user_listing_filter_";

/// Key for the current listing page.
pub const PAGE_KEY: &str = "page";

/// Key for the active gender filter.
pub const GENDER_KEY: &str = "gender";

/// A string-keyed backend for persisted values.
pub trait KeyValueStore {
    /// Raw stored text for `key`, or `None` when nothing was stored.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Forget `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Full storage key for a short key name.
pub fn namespaced(key: &str) -> String {
    format!("{KEY_PREFIX}{key}")
}

/// Read and deserialize the value stored under `key`.
///
/// Returns `default` when the key is absent, the backend fails, or the stored
/// text does not deserialize. Failures are logged, never raised.
pub fn read<K, T>(store: &K, key: &str, default: T) -> T
where
    K: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let storage_key = namespaced(key);
    match store.get(&storage_key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Error reading stored key \"{storage_key}\": {e}");
                default
            }
        },
        Ok(None) => default,
        Err(e) => {
            tracing::warn!("Error reading stored key \"{storage_key}\": {e}");
            default
        }
    }
}

/// Serialize `value` and store it under `key`.
///
/// Returns whether the value reached storage. Failures are logged, never raised.
pub fn write<K, T>(store: &mut K, key: &str, value: &T) -> bool
where
    K: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let storage_key = namespaced(key);
    let result = serde_json::to_string(value)
        .map_err(UserdexError::from)
        .and_then(|raw| store.set(&storage_key, &raw));

    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Error setting stored key \"{storage_key}\": {e}");
            false
        }
    }
}

/// Forget the value stored under `key`. Failures are logged, never raised.
pub fn forget<K>(store: &mut K, key: &str)
where
    K: KeyValueStore + ?Sized,
{
    let storage_key = namespaced(key);
    if let Err(e) = store.remove(&storage_key) {
        tracing::warn!("Error removing stored key \"{storage_key}\": {e}");
    }
}

/// An in-memory value mirrored to a [`KeyValueStore`] on every change.
#[derive(Clone, PartialEq)]
pub struct Persisted<T> {
    key: &'static str,
    value: T,
}

impl<T> Persisted<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Initialize from storage, falling back to `default`.
    pub fn load<K: KeyValueStore + ?Sized>(store: &K, key: &'static str, default: T) -> Self {
        let value = read(store, key, default);
        Persisted { key, value }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Replace the value and write it through. The new value is kept even if
    /// the write fails.
    pub fn set<K: KeyValueStore + ?Sized>(&mut self, store: &mut K, value: T) {
        self.value = value;
        write(store, self.key, &self.value);
    }
}

impl<T: fmt::Debug> fmt::Debug for Persisted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Persisted")
            .field("key", &namespaced(self.key))
            .field("value", &self.value)
            .finish()
    }
}
