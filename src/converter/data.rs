//! DataConverter: default serializer + blob codecs as one pipeline.
//!
//! To payloads: value → JSON payload → codec chain (Scoped or Base)
//! From payloads: codec chain (Base) → JSON payload → value
//!
//! The converter itself holds only immutable state. The scope of the current
//! call is passed into every outbound operation and used to build a fresh
//! chain; nothing call-scoped is cached on the converter.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec::{BaseCodec, CodecChain, PayloadCodec, ScopedCodec};
use crate::config::OffloadConfig;
use crate::error::Result;
use crate::storage::BlobStore;
use crate::types::{Payload, Scope};

use super::payload::{JsonPayloadConverter, PayloadConverter};

pub struct DataConverter {
    payload_converter: Arc<dyn PayloadConverter>,
    store: Arc<dyn BlobStore>,
    config: OffloadConfig,
}

impl DataConverter {
    /// Converter with the default JSON serializer in front of the codecs.
    pub fn new(store: Arc<dyn BlobStore>, config: OffloadConfig) -> Self {
        Self::with_payload_converter(Arc::new(JsonPayloadConverter), store, config)
    }

    pub fn with_payload_converter(
        payload_converter: Arc<dyn PayloadConverter>,
        store: Arc<dyn BlobStore>,
        config: OffloadConfig,
    ) -> Self {
        Self {
            payload_converter,
            store,
            config,
        }
    }

    pub fn config(&self) -> &OffloadConfig {
        &self.config
    }

    /// Codec chain for one call boundary.
    ///
    /// With a scope the chain offloads large payloads under that scope;
    /// without one it falls back to the scope-agnostic codec.
    pub fn codec_chain(&self, scope: Option<&Scope>) -> CodecChain {
        let codec: Arc<dyn PayloadCodec> = match scope {
            Some(scope) => Arc::new(ScopedCodec::new(
                Arc::clone(&self.store),
                &self.config,
                scope.clone(),
            )),
            None => Arc::new(BaseCodec::new(Arc::clone(&self.store))),
        };
        CodecChain::new(vec![codec])
    }

    /// Run already-serialized payloads through the codec chain.
    pub fn encode(&self, scope: Option<&Scope>, payloads: &[Payload]) -> Result<Vec<Payload>> {
        self.codec_chain(scope).encode(payloads)
    }

    /// Resolve any blob references. Needs no scope.
    pub fn decode(&self, payloads: &[Payload]) -> Result<Vec<Payload>> {
        self.codec_chain(None).decode(payloads)
    }

    pub fn to_payload<T: Serialize>(&self, scope: Option<&Scope>, value: &T) -> Result<Payload> {
        let mut payloads = self.to_payloads(scope, std::slice::from_ref(value))?;
        Ok(payloads.remove(0))
    }

    pub fn to_payloads<T: Serialize>(
        &self,
        scope: Option<&Scope>,
        values: &[T],
    ) -> Result<Vec<Payload>> {
        let serialized = values
            .iter()
            .map(|v| -> Result<Payload> {
                let value = serde_json::to_value(v)?;
                self.payload_converter.to_payload(&value)
            })
            .collect::<Result<Vec<_>>>()?;
        self.encode(scope, &serialized)
    }

    pub fn from_payload<T: DeserializeOwned>(&self, payload: &Payload) -> Result<T> {
        let mut values = self.from_payloads(std::slice::from_ref(payload))?;
        Ok(values.remove(0))
    }

    pub fn from_payloads<T: DeserializeOwned>(&self, payloads: &[Payload]) -> Result<Vec<T>> {
        self.decode(payloads)?
            .iter()
            .map(|p| -> Result<T> {
                let value = self.payload_converter.from_payload(p)?;
                Ok(serde_json::from_value(value)?)
            })
            .collect()
    }
}
