//! Scope propagation across call boundaries.
//!
//! The outbound side injects the current scope into a call header; the
//! inbound side extracts it again. The value travels as an ordinary JSON
//! payload under [`PROPAGATION_HEADER_FIELD`] and never goes through the blob
//! codecs.

use serde::{Deserialize, Serialize};

use crate::converter::{JsonPayloadConverter, PayloadConverter};
use crate::error::{CodecError, Result};
use crate::types::{Header, Scope};

/// Header field carrying the serialized scope.
pub const PROPAGATION_HEADER_FIELD: &str = "context-propagation";

#[derive(Debug, Serialize, Deserialize)]
struct PropagatedValues {
    /// Blob store path segments.
    bspsegs: Scope,
}

/// Injects and extracts a [`Scope`] through call headers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopePropagator {
    converter: JsonPayloadConverter,
}

impl ScopePropagator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `scope` into `header`. With no scope the header is left as is.
    pub fn inject(&self, scope: Option<&Scope>, header: &mut Header) -> Result<()> {
        let Some(scope) = scope else {
            return Ok(());
        };
        let value = serde_json::to_value(PropagatedValues {
            bspsegs: scope.clone(),
        })?;
        header.set(PROPAGATION_HEADER_FIELD, self.converter.to_payload(&value)?);
        Ok(())
    }

    /// Read the scope carried by `header`, if any.
    ///
    /// A present but malformed value is an error, including a scope with no
    /// segments.
    pub fn extract(&self, header: &Header) -> Result<Option<Scope>> {
        let Some(payload) = header.get(PROPAGATION_HEADER_FIELD) else {
            return Ok(None);
        };
        let value = self.converter.from_payload(payload)?;
        let values: PropagatedValues = serde_json::from_value(value).map_err(|e| {
            CodecError::InvalidScope(format!("failed to extract value from header: {}", e))
        })?;
        Ok(Some(values.bspsegs))
    }
}
