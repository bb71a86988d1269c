pub mod fs;
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod traits;

pub use fs::FsBlobStore;
pub use memory::MemoryBlobStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteBlobStore;
pub use traits::BlobStore;
