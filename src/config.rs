//! Codec configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default bucket literal prefixed to every storage key.
pub const DEFAULT_BUCKET: &str = "blob://mybucket";

/// Default externalization threshold in bytes of serialized envelope.
///
/// Proof-of-concept value. Production limits belong just under the
/// transport's message size cap.
pub const DEFAULT_THRESHOLD: usize = 33;

/// Immutable settings shared by every codec a `DataConverter` builds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OffloadConfig {
    /// Bucket literal, first component of every storage key.
    pub bucket: String,
    /// Envelopes of at least this many bytes are stored externally.
    pub threshold: usize,
}

impl Default for OffloadConfig {
    fn default() -> Self {
        Self {
            bucket: DEFAULT_BUCKET.to_string(),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl OffloadConfig {
    /// Parse from JSON; missing fields fall back to the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }
}
