//! MemoryBlobStore: a HashMap-backed store for tests and local runs.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::StoreError;

use super::traits::BlobStore;

/// In-memory blob store.
///
/// Interior mutability via `parking_lot::RwLock`, so a single instance can
/// be shared across threads behind an `Arc`.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }

    /// All stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.blobs.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl BlobStore for MemoryBlobStore {
    fn save(&self, key: &str, data: &[u8]) -> Result<(), StoreError> {
        tracing::trace!(key, size = data.len(), "memory store save");
        self.blobs.write().insert(key.to_string(), data.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        self.blobs
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                key: key.to_string(),
            })
    }
}
