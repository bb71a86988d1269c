//! BaseCodec: the codec used when no scope is attached to a call.

use std::sync::Arc;

use crate::error::Result;
use crate::storage::BlobStore;
use crate::types::Payload;

use super::{resolve_references, PayloadCodec};

/// Scope-agnostic codec.
///
/// Without a scope there is nowhere to put a blob, so `encode` passes every
/// payload through untouched regardless of size. This also lets tooling send
/// plain payloads through the same pipeline. `decode` works unconditionally
/// because references carry their full storage key.
///
/// Prefer `ScopedCodec` whenever a scope is available.
pub struct BaseCodec {
    store: Arc<dyn BlobStore>,
}

impl BaseCodec {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }
}

impl PayloadCodec for BaseCodec {
    fn encode(&self, payloads: &[Payload]) -> Result<Vec<Payload>> {
        tracing::trace!(count = payloads.len(), "no scope, passing payloads through");
        Ok(payloads.to_vec())
    }

    fn decode(&self, payloads: &[Payload]) -> Result<Vec<Payload>> {
        resolve_references(self.store.as_ref(), payloads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::encode_envelope;
    use crate::error::{CodecError, StoreErrorKind};
    use crate::storage::MemoryBlobStore;
    use crate::types::METADATA_ENCODING_BLOBSTORE_PLAIN;

    fn setup() -> (Arc<MemoryBlobStore>, BaseCodec) {
        let store = Arc::new(MemoryBlobStore::new());
        let codec = BaseCodec::new(store.clone());
        (store, codec)
    }

    #[test]
    fn encode_passes_through_every_size() {
        let (store, codec) = setup();
        for size in [0usize, 10, 32, 33, 100, 10_000] {
            let input = vec![Payload::from_data(vec![7u8; size])];
            let output = codec.encode(&input).unwrap();
            assert_eq!(output, input, "size {}", size);
        }
        assert!(store.is_empty());
    }

    #[test]
    fn decode_resolves_reference_without_scope() {
        let (store, codec) = setup();
        let original = Payload::with_encoding("json/plain", vec![b'a'; 100]);
        store
            .save("blob://mybucket/t1/x", &encode_envelope(&original).unwrap())
            .unwrap();

        let reference = Payload::with_encoding(
            METADATA_ENCODING_BLOBSTORE_PLAIN,
            b"blob://mybucket/t1/x".to_vec(),
        );
        let decoded = codec.decode(&[reference]).unwrap();
        assert_eq!(decoded, vec![original]);
    }

    #[test]
    fn decode_leaves_foreign_encodings_alone() {
        let (_store, codec) = setup();
        let input = vec![
            Payload::with_encoding("json/plain", b"\"hi\"".to_vec()),
            Payload::with_encoding("binary/encrypted", vec![1, 2, 3]),
            Payload::from_data(b"raw".to_vec()),
        ];
        assert_eq!(codec.decode(&input).unwrap(), input);
    }

    #[test]
    fn decode_missing_blob_fails_whole_call() {
        let (_store, codec) = setup();
        let input = vec![
            Payload::from_data(b"inline".to_vec()),
            Payload::with_encoding(
                METADATA_ENCODING_BLOBSTORE_PLAIN,
                b"bucket/tenantA/missing".to_vec(),
            ),
        ];
        let err = codec.decode(&input).unwrap_err();
        assert_eq!(err.store_kind(), Some(StoreErrorKind::NotFound));
        assert!(matches!(err, CodecError::Storage(_)));
    }

    #[test]
    fn decode_rejects_non_utf8_reference() {
        let (_store, codec) = setup();
        let input = vec![Payload::with_encoding(
            METADATA_ENCODING_BLOBSTORE_PLAIN,
            vec![0xff, 0xfe],
        )];
        assert!(matches!(
            codec.decode(&input).unwrap_err(),
            CodecError::Serialization(_)
        ));
    }
}
