//! Request handling for a remote codec endpoint.
//!
//! UIs and CLIs that only see stored payloads POST them to `/encode` or
//! `/decode` and get the transformed payloads back. Bodies use the JSON
//! payload format: metadata values and data are standard base64.
//!
//! ```json
//! {"payloads":[{"metadata":{"encoding":"YmxvYnN0b3JlL3BsYWlu"},"data":"..."}]}
//! ```
//!
//! Serving HTTP is left to the caller; this module only maps request bodies
//! to response bodies.

use std::collections::BTreeMap;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::codec::PayloadCodec;
use crate::error::{CodecError, Result};
use crate::types::Payload;

#[derive(Debug, Serialize, Deserialize)]
struct JsonPayload {
    #[serde(default)]
    metadata: BTreeMap<String, String>,
    #[serde(default)]
    data: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonPayloads {
    #[serde(default)]
    payloads: Vec<JsonPayload>,
}

impl JsonPayload {
    fn from_payload(payload: &Payload) -> Self {
        Self {
            metadata: payload
                .metadata()
                .iter()
                .map(|(k, v)| (k.clone(), STANDARD.encode(v)))
                .collect(),
            data: STANDARD.encode(payload.data()),
        }
    }

    fn into_payload(self) -> Result<Payload> {
        let metadata = self
            .metadata
            .into_iter()
            .map(|(k, v)| -> Result<(String, Vec<u8>)> {
                Ok((k, decode_base64(&v)?))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;
        Ok(Payload::new(metadata, decode_base64(&self.data)?))
    }
}

fn decode_base64(text: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(text)
        .map_err(|e| CodecError::Serialization(format!("invalid base64: {}", e)))
}

/// Which codec direction a request path asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecOperation {
    Encode,
    Decode,
}

impl CodecOperation {
    /// Match on the last path segment, so namespaced prefixes such as
    /// `/default/decode` also work.
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/').rsplit('/').next() {
            Some("encode") => Some(CodecOperation::Encode),
            Some("decode") => Some(CodecOperation::Decode),
            _ => None,
        }
    }
}

pub struct CodecServer {
    codec: Arc<dyn PayloadCodec>,
}

impl CodecServer {
    pub fn new(codec: Arc<dyn PayloadCodec>) -> Self {
        Self { codec }
    }

    /// Handle one request body and return the response body.
    pub fn handle(&self, path: &str, body: &[u8]) -> Result<Vec<u8>> {
        let operation = CodecOperation::from_path(path)
            .ok_or_else(|| CodecError::UnknownEndpoint(path.to_string()))?;

        let request: JsonPayloads = serde_json::from_slice(body)?;
        let payloads = request
            .payloads
            .into_iter()
            .map(JsonPayload::into_payload)
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(?operation, count = payloads.len(), "codec request");

        let transformed = match operation {
            CodecOperation::Encode => self.codec.encode(&payloads)?,
            CodecOperation::Decode => self.codec.decode(&payloads)?,
        };

        let response = JsonPayloads {
            payloads: transformed.iter().map(JsonPayload::from_payload).collect(),
        };
        Ok(serde_json::to_vec(&response)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::BaseCodec;
    use crate::envelope::encode_envelope;
    use crate::storage::{BlobStore, MemoryBlobStore};
    use serde_json::{json, Value};

    fn server_with(store: Arc<MemoryBlobStore>) -> CodecServer {
        CodecServer::new(Arc::new(BaseCodec::new(store)))
    }

    #[test]
    fn path_matching() {
        assert_eq!(CodecOperation::from_path("/encode"), Some(CodecOperation::Encode));
        assert_eq!(
            CodecOperation::from_path("/default/decode/"),
            Some(CodecOperation::Decode)
        );
        assert_eq!(CodecOperation::from_path("/health"), None);
    }

    #[test]
    fn decode_resolves_stored_blob() {
        let store = Arc::new(MemoryBlobStore::new());
        let original = Payload::with_encoding("json/plain", b"\"Testing\"".to_vec());
        store
            .save("blob://mybucket/t1/x", &encode_envelope(&original).unwrap())
            .unwrap();

        let request = json!({
            "payloads": [{
                "metadata": { "encoding": STANDARD.encode("blobstore/plain") },
                "data": STANDARD.encode("blob://mybucket/t1/x"),
            }]
        });
        let response = server_with(store)
            .handle("/decode", request.to_string().as_bytes())
            .unwrap();

        let response: Value = serde_json::from_slice(&response).unwrap();
        let payload = &response["payloads"][0];
        assert_eq!(payload["metadata"]["encoding"], STANDARD.encode("json/plain"));
        assert_eq!(payload["data"], STANDARD.encode("\"Testing\""));
    }

    #[test]
    fn encode_is_passthrough_without_scope() {
        let store = Arc::new(MemoryBlobStore::new());
        let request = json!({
            "payloads": [{
                "metadata": { "encoding": STANDARD.encode("json/plain") },
                "data": STANDARD.encode("x".repeat(200)),
            }]
        });
        let body = request.to_string();
        let response = server_with(store.clone())
            .handle("/encode", body.as_bytes())
            .unwrap();
        let response: Value = serde_json::from_slice(&response).unwrap();
        assert_eq!(response, request);
        assert!(store.is_empty());
    }

    #[test]
    fn unknown_endpoint() {
        let err = server_with(Arc::new(MemoryBlobStore::new()))
            .handle("/health", b"{}")
            .unwrap_err();
        assert!(matches!(err, CodecError::UnknownEndpoint(_)));
    }

    #[test]
    fn invalid_base64_rejected() {
        let request = br#"{"payloads":[{"metadata":{},"data":"***"}]}"#;
        let err = server_with(Arc::new(MemoryBlobStore::new()))
            .handle("/decode", request)
            .unwrap_err();
        assert!(matches!(err, CodecError::Serialization(_)));
    }

    #[test]
    fn missing_blob_surfaces_not_found() {
        let request = json!({
            "payloads": [{
                "metadata": { "encoding": STANDARD.encode("blobstore/plain") },
                "data": STANDARD.encode("bucket/tenantA/missing"),
            }]
        });
        let err = server_with(Arc::new(MemoryBlobStore::new()))
            .handle("/decode", request.to_string().as_bytes())
            .unwrap_err();
        assert!(err.store_kind().is_some());
    }
}
