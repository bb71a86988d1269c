//! The blob store contract the codecs rely on.

use crate::error::StoreError;

/// Minimal key → bytes store holding externalized payload envelopes.
///
/// The codecs only ever write fresh keys and read them back; no update,
/// delete or listing is required. Implementations must be safe to call
/// concurrently from independent encode/decode calls.
pub trait BlobStore: Send + Sync {
    /// Store `data` under `key`.
    fn save(&self, key: &str, data: &[u8]) -> Result<(), StoreError>;

    /// Fetch the bytes stored under `key`.
    ///
    /// Returns `StoreError::NotFound` when no blob exists for `key`.
    fn get(&self, key: &str) -> Result<Vec<u8>, StoreError>;
}
