//! Small key-value stores for page preferences
//!
//! Two scopes exist:
//!
//! - **Durable**: survives across sessions. Backed by sled ([`SledStore`]).
//! - **Session**: lives as long as the controller. Backed by [`MemoryStore`].
//!
//! Writes are full overwrites of a key. Callers treat every failure as
//! "feature unavailable" and fall back to defaults; nothing here is meant to
//! reach the visitor.

pub mod error;
pub mod sled_store;

pub use error::StorageError;
pub use sled_store::SledStore;

use std::cell::RefCell;
use std::collections::HashMap;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// String key-value store
pub trait KeyValueStore {
    /// Read a value
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable or the stored bytes are corrupt.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a value
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable or rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable.
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory store used for session-scoped values
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Store standing in for a disabled backend; every call fails
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(StorageError::Unavailable)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(StorageError::Unavailable)
    }

    fn remove(&self, _key: &str) -> Result<()> {
        Err(StorageError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_overwrites() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_unavailable_store_always_fails() {
        let store = UnavailableStore;
        assert!(matches!(store.get("k"), Err(StorageError::Unavailable)));
        assert!(store.set("k", "v").is_err());
        assert!(store.remove("k").is_err());
    }
}
