//! Durable store on top of sled
//!
//! Values live in a dedicated `preferences` tree as bincode-encoded strings.

use super::{KeyValueStore, Result};
use sled::{Db, Tree};
use std::path::Path;

/// Durable key-value store
///
/// Clones share the same database handle.
#[derive(Clone)]
pub struct SledStore {
    db: Db,
    tree: Tree,
}

impl SledStore {
    /// Opens or creates a store at the specified directory
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the database or its tree cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(path)?;
        let tree = db.open_tree("preferences")?;
        Ok(Self { db, tree })
    }

    /// Write pending changes to disk
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if flushing fails.
    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }

    /// Store raw bytes under a key, bypassing encoding
    #[cfg(test)]
    pub(crate) fn set_raw(&self, key: &str, bytes: &[u8]) -> Result<()> {
        self.tree.insert(key.as_bytes(), bytes)?;
        Ok(())
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self.tree.get(key.as_bytes())? {
            Some(bytes) => {
                let (value, _): (String, usize) =
                    bincode::decode_from_slice(&bytes, bincode::config::standard())?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let bytes = bincode::encode_to_vec(value, bincode::config::standard())?;
        self.tree.insert(key.as_bytes(), bytes)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.tree.remove(key.as_bytes())?;
        Ok(())
    }
}
