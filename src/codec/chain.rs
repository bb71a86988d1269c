//! CodecChain: an ordered list of codecs applied as one.
//!
//! Encode runs the list front to back (outer → inner); decode runs it back
//! to front, so the stage that transformed a payload last on the way out is
//! the first to undo it on the way in.

use std::sync::Arc;

use crate::error::Result;
use crate::types::Payload;

use super::PayloadCodec;

#[derive(Clone, Default)]
pub struct CodecChain {
    codecs: Vec<Arc<dyn PayloadCodec>>,
}

impl CodecChain {
    pub fn new(codecs: Vec<Arc<dyn PayloadCodec>>) -> Self {
        Self { codecs }
    }

    /// Append an innermost stage.
    pub fn push(mut self, codec: Arc<dyn PayloadCodec>) -> Self {
        self.codecs.push(codec);
        self
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

impl PayloadCodec for CodecChain {
    fn encode(&self, payloads: &[Payload]) -> Result<Vec<Payload>> {
        let mut current = payloads.to_vec();
        for codec in &self.codecs {
            current = codec.encode(&current)?;
        }
        Ok(current)
    }

    fn decode(&self, payloads: &[Payload]) -> Result<Vec<Payload>> {
        let mut current = payloads.to_vec();
        for codec in self.codecs.iter().rev() {
            current = codec.decode(&current)?;
        }
        Ok(current)
    }
}
