//! Payload codecs and their composition.
//!
//! A codec maps a payload sequence to a new sequence of the same length and
//! order. Codecs never return a partially transformed sequence: either every
//! eligible payload is transformed or the call fails and the caller keeps its
//! original input.

pub mod base;
pub mod chain;
pub mod scoped;

pub use base::BaseCodec;
pub use chain::CodecChain;
pub use scoped::ScopedCodec;

use crate::envelope::decode_envelope;
use crate::error::{CodecError, Result};
use crate::storage::BlobStore;
use crate::types::{EncodingTag, Payload};

/// One transform stage of the conversion pipeline.
pub trait PayloadCodec: Send + Sync {
    fn encode(&self, payloads: &[Payload]) -> Result<Vec<Payload>>;

    fn decode(&self, payloads: &[Payload]) -> Result<Vec<Payload>>;
}

/// Resolve blob store references back into the payloads they replaced.
///
/// References carry the fully qualified key, so no scope is needed. Payloads
/// with any other encoding are returned as they are.
pub(crate) fn resolve_references(
    store: &dyn BlobStore,
    payloads: &[Payload],
) -> Result<Vec<Payload>> {
    payloads
        .iter()
        .map(|p| {
            if p.encoding_tag() != Some(EncodingTag::ExternalReference) {
                return Ok(p.clone());
            }

            let key = std::str::from_utf8(p.data()).map_err(|e| {
                CodecError::Serialization(format!("blob reference is not valid UTF-8: {}", e))
            })?;
            tracing::debug!(key, "resolving blob reference");
            let raw = store.get(key)?;
            decode_envelope(&raw)
        })
        .collect()
}
