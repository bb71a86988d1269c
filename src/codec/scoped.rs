//! ScopedCodec: offloads large payloads into the blob store under keys
//! derived from the current scope.
//!
//! Encode, per payload:
//! envelope → CBOR → size check → (key derivation → save → reference)
//!
//! Key grammar: `<bucket>/<scope root>/<scope path joined by '-'>-<uuid>`

use std::sync::Arc;

use crate::config::OffloadConfig;
use crate::envelope::encode_envelope;
use crate::error::Result;
use crate::storage::BlobStore;
use crate::types::{EncodingTag, Payload, Scope};

use super::{resolve_references, PayloadCodec};

/// Object name used when the scope has no segments past its root.
const PLACEHOLDER_OBJECT_NAME: &str = "unknown";

/// Separator joining scope path segments into an object name.
const OBJECT_NAME_SEPARATOR: &str = "-";

/// Scope-aware codec. Built fresh for each call boundary.
pub struct ScopedCodec {
    store: Arc<dyn BlobStore>,
    bucket: String,
    threshold: usize,
    scope: Scope,
}

impl ScopedCodec {
    pub fn new(store: Arc<dyn BlobStore>, config: &OffloadConfig, scope: Scope) -> Self {
        Self {
            store,
            bucket: config.bucket.clone(),
            threshold: config.threshold,
            scope,
        }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Derive a fresh storage key for this scope.
    ///
    /// The scope alone repeats across calls made from the same instance, so a
    /// random UUID is appended to every name.
    pub fn derive_key(&self) -> String {
        let mut object_name = self.scope.path().join(OBJECT_NAME_SEPARATOR);
        if object_name.is_empty() {
            object_name = PLACEHOLDER_OBJECT_NAME.to_string();
        }
        format!(
            "{}/{}/{}{}{}",
            self.bucket,
            self.scope.root(),
            object_name,
            OBJECT_NAME_SEPARATOR,
            uuid::Uuid::new_v4()
        )
    }

    fn encode_one(&self, payload: &Payload) -> Result<Payload> {
        let raw = encode_envelope(payload)?;
        if raw.len() < self.threshold {
            tracing::trace!(size = raw.len(), threshold = self.threshold, "payload kept inline");
            return Ok(payload.clone());
        }

        let key = self.derive_key();
        self.store.save(&key, &raw)?;
        tracing::debug!(key = %key, size = raw.len(), "payload offloaded to blob store");

        Ok(Payload::with_encoding(
            EncodingTag::ExternalReference.as_str(),
            key.into_bytes(),
        ))
    }
}

impl PayloadCodec for ScopedCodec {
    fn encode(&self, payloads: &[Payload]) -> Result<Vec<Payload>> {
        payloads.iter().map(|p| self.encode_one(p)).collect()
    }

    fn decode(&self, payloads: &[Payload]) -> Result<Vec<Payload>> {
        resolve_references(self.store.as_ref(), payloads)
    }
}
