//! Payload envelope CBOR encode/decode.
//!
//! The envelope is what gets written to the blob store: the full payload,
//! metadata included, so decode can restore it byte for byte.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_bytes::ByteBuf;

use crate::error::{CodecError, Result};
use crate::types::Payload;

#[derive(Debug, Serialize, Deserialize)]
struct PayloadEnvelope {
    /// Metadata (key → raw bytes).
    #[serde(default)]
    m: BTreeMap<String, ByteBuf>,
    /// Payload data.
    #[serde(with = "serde_bytes")]
    d: Vec<u8>,
}

/// Encode a Payload as CBOR bytes.
pub fn encode_envelope(payload: &Payload) -> Result<Vec<u8>> {
    let envelope = PayloadEnvelope {
        m: payload
            .metadata()
            .iter()
            .map(|(k, v)| (k.clone(), ByteBuf::from(v.clone())))
            .collect(),
        d: payload.data().to_vec(),
    };
    let mut buf = Vec::new();
    ciborium::into_writer(&envelope, &mut buf)
        .map_err(|e| CodecError::Serialization(format!("CBOR encode: {}", e)))?;
    Ok(buf)
}

/// Decode CBOR bytes into a Payload.
pub fn decode_envelope(data: &[u8]) -> Result<Payload> {
    let envelope: PayloadEnvelope = ciborium::from_reader(data)
        .map_err(|e| CodecError::Serialization(format!("CBOR decode: {}", e)))?;
    let metadata = envelope
        .m
        .into_iter()
        .map(|(k, v)| (k, v.into_vec()))
        .collect();
    Ok(Payload::new(metadata, envelope.d))
}
