//! Default value ↔ payload serializer that sits in front of the codec chain.

use serde_json::Value;

use crate::error::{CodecError, Result};
use crate::types::Payload;

/// Encoding tag for JSON-serialized values.
pub const METADATA_ENCODING_JSON: &str = "json/plain";

/// Encoding tag for a null value.
pub const METADATA_ENCODING_NULL: &str = "binary/null";

/// Turns values into payloads and back. Knows nothing about blob storage.
pub trait PayloadConverter: Send + Sync {
    fn to_payload(&self, value: &Value) -> Result<Payload>;

    fn from_payload(&self, payload: &Payload) -> Result<Value>;
}

/// JSON converter: `json/plain` for values, `binary/null` with empty data
/// for `null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPayloadConverter;

impl PayloadConverter for JsonPayloadConverter {
    fn to_payload(&self, value: &Value) -> Result<Payload> {
        if value.is_null() {
            return Ok(Payload::with_encoding(METADATA_ENCODING_NULL, Vec::new()));
        }
        let data = serde_json::to_vec(value)?;
        Ok(Payload::with_encoding(METADATA_ENCODING_JSON, data))
    }

    fn from_payload(&self, payload: &Payload) -> Result<Value> {
        match payload.encoding() {
            Some(b"binary/null") => Ok(Value::Null),
            Some(b"json/plain") => Ok(serde_json::from_slice(payload.data())?),
            other => Err(CodecError::Serialization(format!(
                "unsupported payload encoding: {}",
                other
                    .map(|raw| String::from_utf8_lossy(raw).into_owned())
                    .unwrap_or_else(|| "<none>".to_string())
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_round_trip() {
        let converter = JsonPayloadConverter;
        let value = json!({ "name": "Temporal", "n": 3 });
        let payload = converter.to_payload(&value).unwrap();
        assert_eq!(payload.encoding(), Some(&b"json/plain"[..]));
        assert_eq!(converter.from_payload(&payload).unwrap(), value);
    }

    #[test]
    fn string_is_quoted_json() {
        let payload = JsonPayloadConverter.to_payload(&json!("Testing")).unwrap();
        assert_eq!(payload.data(), b"\"Testing\"");
    }

    #[test]
    fn null_uses_binary_null() {
        let payload = JsonPayloadConverter.to_payload(&Value::Null).unwrap();
        assert_eq!(payload.encoding(), Some(&b"binary/null"[..]));
        assert!(payload.data().is_empty());
        assert_eq!(JsonPayloadConverter.from_payload(&payload).unwrap(), Value::Null);
    }

    #[test]
    fn rejects_unknown_encoding() {
        let payload = Payload::with_encoding("blobstore/plain", b"blob://b/t/x".to_vec());
        let err = JsonPayloadConverter.from_payload(&payload).unwrap_err();
        assert!(err.to_string().contains("blobstore/plain"));

        let bare = Payload::from_data(b"{}".to_vec());
        assert!(JsonPayloadConverter.from_payload(&bare).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        let payload = Payload::with_encoding("json/plain", b"{not json".to_vec());
        assert!(matches!(
            JsonPayloadConverter.from_payload(&payload).unwrap_err(),
            CodecError::Json(_)
        ));
    }
}
