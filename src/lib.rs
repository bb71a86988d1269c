//! Payload offloading: keeps large payloads out of call histories.
//!
//! Payloads produced by the default serializer pass through a codec chain.
//! When the call carries a [`Scope`], payloads whose serialized envelope
//! reaches the configured threshold are written to a [`BlobStore`] and
//! replaced by a small reference payload (`encoding: blobstore/plain`, data =
//! storage key). Decoding resolves references from their key alone, so it
//! never needs a scope.

pub mod codec;
pub mod codec_server;
pub mod config;
pub mod converter;
pub mod envelope;
pub mod error;
pub mod propagation;
pub mod storage;
pub mod types;

pub use codec::{BaseCodec, CodecChain, PayloadCodec, ScopedCodec};
pub use codec_server::{CodecOperation, CodecServer};
pub use config::{OffloadConfig, DEFAULT_BUCKET, DEFAULT_THRESHOLD};
pub use converter::{DataConverter, JsonPayloadConverter, PayloadConverter};
pub use envelope::{decode_envelope, encode_envelope};
pub use error::{CodecError, Result, StoreError, StoreErrorKind};
pub use propagation::{ScopePropagator, PROPAGATION_HEADER_FIELD};
#[cfg(feature = "sqlite")]
pub use storage::SqliteBlobStore;
pub use storage::{BlobStore, FsBlobStore, MemoryBlobStore};
pub use types::{
    EncodingTag, Header, Payload, Scope, METADATA_ENCODING_BLOBSTORE_PLAIN,
    METADATA_ENCODING_KEY, METADATA_ENCODING_PLAIN,
};
