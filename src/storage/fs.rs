//! FsBlobStore: one file per blob under a root directory.
//!
//! Keys contain `/` and a `blob://` scheme, so they are flattened into a
//! safe file name. A short SHA-256 suffix of the original key keeps two
//! keys that flatten to the same text in separate files. The flattened part
//! is capped so deep or long scopes stay under file system name limits.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use sha2::{Digest, Sha256};

use crate::error::StoreError;

use super::traits::BlobStore;

/// Hex characters of the key digest appended to each file name.
const KEY_DIGEST_HEX_LEN: usize = 16;

/// Longest flattened key prefix kept in a file name, in bytes.
const MAX_FLAT_NAME_LEN: usize = 128;

fn unsafe_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9._-]").expect("valid regex"))
}

/// Map a storage key to a flat file name.
pub fn file_name_for_key(key: &str) -> String {
    let flat = unsafe_chars().replace_all(key, "_");
    let mut cut = flat.len().min(MAX_FLAT_NAME_LEN);
    while !flat.is_char_boundary(cut) {
        cut -= 1;
    }
    let flat = &flat[..cut];
    let digest = hex::encode(Sha256::digest(key.as_bytes()));
    format!("{}-{}", flat, &digest[..KEY_DIGEST_HEX_LEN])
}

/// Durable blob store backed by a local directory.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    dir: PathBuf,
}

impl FsBlobStore {
    /// The directory is created lazily on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(file_name_for_key(key))
    }
}

impl BlobStore for FsBlobStore {
    fn save(&self, key: &str, data: &[u8]) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            key: key.to_string(),
            source,
        })?;

        let path = self.path_for(key);
        tracing::debug!(key, path = %path.display(), size = data.len(), "saving blob");
        std::fs::write(&path, data).map_err(|source| StoreError::Io {
            key: key.to_string(),
            source,
        })
    }

    fn get(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.path_for(key);
        tracing::debug!(key, path = %path.display(), "reading blob");
        std::fs::read(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => StoreError::NotFound {
                key: key.to_string(),
            },
            _ => StoreError::Io {
                key: key.to_string(),
                source,
            },
        })
    }
}
