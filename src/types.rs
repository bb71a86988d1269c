//! Core data types: payloads, encoding tags, scopes and call headers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Reserved metadata key naming the stage that produced a payload.
pub const METADATA_ENCODING_KEY: &str = "encoding";

/// Encoding value for a payload that was left inline.
pub const METADATA_ENCODING_PLAIN: &str = "plain";

/// Encoding value for a payload replaced by a blob store reference.
pub const METADATA_ENCODING_BLOBSTORE_PLAIN: &str = "blobstore/plain";

// ============================================================================
// Payload
// ============================================================================

/// One unit of data flowing through the conversion pipeline.
///
/// Payloads are never mutated in place; every codec stage builds new ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    metadata: BTreeMap<String, Vec<u8>>,
    data: Vec<u8>,
}

impl Payload {
    pub fn new(metadata: BTreeMap<String, Vec<u8>>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            metadata,
            data: data.into(),
        }
    }

    /// Payload with no metadata.
    pub fn from_data(data: impl Into<Vec<u8>>) -> Self {
        Self::new(BTreeMap::new(), data)
    }

    /// Payload carrying only an `encoding` tag.
    pub fn with_encoding(encoding: &str, data: impl Into<Vec<u8>>) -> Self {
        let mut metadata = BTreeMap::new();
        metadata.insert(
            METADATA_ENCODING_KEY.to_string(),
            encoding.as_bytes().to_vec(),
        );
        Self::new(metadata, data)
    }

    pub fn metadata(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.metadata
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Raw value of the `encoding` metadata entry, if any.
    pub fn encoding(&self) -> Option<&[u8]> {
        self.metadata
            .get(METADATA_ENCODING_KEY)
            .map(|v| v.as_slice())
    }

    pub fn encoding_tag(&self) -> Option<EncodingTag> {
        self.encoding().and_then(EncodingTag::from_bytes)
    }
}

// ============================================================================
// EncodingTag
// ============================================================================

/// Encodings owned by the blob codecs. Anything else is foreign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingTag {
    Passthrough,
    ExternalReference,
}

impl EncodingTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            EncodingTag::Passthrough => METADATA_ENCODING_PLAIN,
            EncodingTag::ExternalReference => METADATA_ENCODING_BLOBSTORE_PLAIN,
        }
    }

    pub fn from_bytes(raw: &[u8]) -> Option<Self> {
        match raw {
            b"plain" => Some(EncodingTag::Passthrough),
            b"blobstore/plain" => Some(EncodingTag::ExternalReference),
            _ => None,
        }
    }
}

// ============================================================================
// Scope
// ============================================================================

/// Hierarchical namespace for externalized blobs.
///
/// Segment 0 is the storage root (tenant); the rest name the object.
/// Always holds at least one segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Scope {
    segments: Vec<String>,
}

impl Scope {
    pub fn new<I, S>(segments: I) -> Result<Self, CodecError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(CodecError::InvalidScope(
                "scope must have at least one segment".to_string(),
            ));
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// First segment, used as the storage root.
    pub fn root(&self) -> &str {
        &self.segments[0]
    }

    /// Segments after the root.
    pub fn path(&self) -> &[String] {
        &self.segments[1..]
    }
}

impl TryFrom<Vec<String>> for Scope {
    type Error = CodecError;

    fn try_from(segments: Vec<String>) -> Result<Self, Self::Error> {
        Scope::new(segments)
    }
}

impl From<Scope> for Vec<String> {
    fn from(scope: Scope) -> Self {
        scope.segments
    }
}

// ============================================================================
// Header
// ============================================================================

/// Named payload fields attached to a call as it crosses a boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    fields: BTreeMap<String, Payload>,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&Payload> {
        self.fields.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, payload: Payload) {
        self.fields.insert(field.into(), payload);
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
