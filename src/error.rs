use thiserror::Error;

/// Coarse classification of a [`StoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// No blob exists under the requested key.
    NotFound,
    /// Any other backend failure.
    Other,
}

/// Failure reported by a blob store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Blob not found: {key}")]
    NotFound { key: String },

    #[error("Blob store I/O error for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::NotFound { .. } => StoreErrorKind::NotFound,
            _ => StoreErrorKind::Other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == StoreErrorKind::NotFound
    }
}

/// Failure of an encode or decode call.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Invalid scope: {0}")]
    InvalidScope(String),

    #[error("Unknown codec endpoint: {0}")]
    UnknownEndpoint(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodecError {
    /// Store kind, if this error came from the blob store.
    pub fn store_kind(&self) -> Option<StoreErrorKind> {
        match self {
            CodecError::Storage(e) => Some(e.kind()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_kind_is_distinguishable() {
        let err = StoreError::NotFound {
            key: "blob://mybucket/t/missing".to_string(),
        };
        assert_eq!(err.kind(), StoreErrorKind::NotFound);
        assert!(err.is_not_found());

        let io = StoreError::Io {
            key: "k".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(io.kind(), StoreErrorKind::Other);
    }

    #[test]
    fn codec_error_exposes_store_kind() {
        let err: CodecError = StoreError::NotFound {
            key: "k".to_string(),
        }
        .into();
        assert_eq!(err.store_kind(), Some(StoreErrorKind::NotFound));
        assert_eq!(
            CodecError::Serialization("bad".to_string()).store_kind(),
            None
        );
    }

    #[test]
    fn display_includes_key() {
        let err = StoreError::NotFound {
            key: "blob://mybucket/a/b".to_string(),
        };
        assert_eq!(err.to_string(), "Blob not found: blob://mybucket/a/b");
    }
}
