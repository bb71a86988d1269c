//! SqliteBlobStore: blobs kept in a single SQLite table.

use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::StoreError;

use super::traits::BlobStore;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS blobs (
    key TEXT PRIMARY KEY NOT NULL,
    data BLOB NOT NULL,
    created_at TEXT NOT NULL
)";

/// Durable blob store backed by SQLite.
///
/// The connection is guarded by a `parking_lot::Mutex` so the store is
/// `Send + Sync` and can be shared by concurrent codec calls.
pub struct SqliteBlobStore {
    conn: Mutex<Connection>,
}

impl SqliteBlobStore {
    /// Open (or create) a database file and ensure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Number of stored blobs.
    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .lock()
            .query_row("SELECT COUNT(*) FROM blobs", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl BlobStore for SqliteBlobStore {
    fn save(&self, key: &str, data: &[u8]) -> Result<(), StoreError> {
        let created_at = chrono::Utc::now().to_rfc3339();
        tracing::debug!(key, size = data.len(), "saving blob");
        self.conn.lock().execute(
            "INSERT OR REPLACE INTO blobs (key, data, created_at) VALUES (?1, ?2, ?3)",
            params![key, data, created_at],
        )?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        tracing::debug!(key, "reading blob");
        self.conn
            .lock()
            .query_row(
                "SELECT data FROM blobs WHERE key = ?1",
                params![key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?
            .ok_or_else(|| StoreError::NotFound {
                key: key.to_string(),
            })
    }
}
