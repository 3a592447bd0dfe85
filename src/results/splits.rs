//! Split storage codec
//!
//! Splits are persisted as `{"version": 1, "splits": [...]}`. Rows written
//! before the envelope existed hold a bare JSON array and decode as
//! version 0. Any other version is refused rather than guessed at.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::Split;

/// Current splits document version
pub const SPLITS_VERSION: u64 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct SplitsDocument {
    version: u64,
    splits: Vec<Split>,
}

/// Splits decoding failures
#[derive(Debug, thiserror::Error)]
pub enum SplitsCodecError {
    #[error("unsupported splits document version {0}")]
    UnsupportedVersion(u64),

    #[error("splits document has no version tag")]
    MissingVersion,

    #[error("splits document must be an object or an array")]
    UnexpectedShape,

    #[error("malformed splits document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Encode splits into the current document layout
pub fn encode(splits: &[Split]) -> Value {
    serde_json::json!({
        "version": SPLITS_VERSION,
        "splits": splits,
    })
}

/// Decode a stored splits document
pub fn decode(value: Value) -> Result<Vec<Split>, SplitsCodecError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        Value::Object(ref map) => {
            let version = map
                .get("version")
                .and_then(Value::as_u64)
                .ok_or(SplitsCodecError::MissingVersion)?;
            if version != SPLITS_VERSION {
                return Err(SplitsCodecError::UnsupportedVersion(version));
            }
            let doc: SplitsDocument = serde_json::from_value(value)?;
            Ok(doc.splits)
        }
        _ => Err(SplitsCodecError::UnexpectedShape),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn split(point: &str, time: &str) -> Split {
        Split {
            point: point.to_string(),
            time: time.to_string(),
            pass_time: "08:19:12".to_string(),
            pace: "04:40".to_string(),
        }
    }

    #[test]
    fn test_encode_writes_version_tag() {
        let doc = encode(&[split("5.0km", "00:24:42")]);
        assert_eq!(doc["version"], 1);
        assert_eq!(doc["splits"][0]["point"], "5.0km");
        assert_eq!(doc["splits"][0]["passTime"], "08:19:12");
    }

    #[test]
    fn test_decode_current_document() {
        let splits = vec![split("5.0km", "00:24:42"), split("10.0km", "00:46:45")];
        assert_eq!(decode(encode(&splits)).unwrap(), splits);
    }

    #[test]
    fn test_decode_legacy_bare_array() {
        let legacy = json!([
            { "point": "0.4km", "time": "00:02:34", "passTime": "08:19:12", "pace": "06:05" }
        ]);
        let splits = decode(legacy).unwrap();
        assert_eq!(splits.len(), 1);
        assert_eq!(splits[0].time, "00:02:34");
    }

    #[test]
    fn test_decode_rejects_unknown_version() {
        let future = json!({ "version": 2, "splits": [] });
        assert!(matches!(
            decode(future),
            Err(SplitsCodecError::UnsupportedVersion(2))
        ));
        assert!(matches!(
            decode(json!({ "splits": [] })),
            Err(SplitsCodecError::MissingVersion)
        ));
        assert!(matches!(decode(json!("x")), Err(SplitsCodecError::UnexpectedShape)));
    }
}
