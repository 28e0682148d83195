//! Payload codec for the tool wire protocol.
//!
//! Every execute call carries its input (and receives its result) in one
//! of two encodings:
//!
//! - `json`: the value serialized as UTF-8 JSON text
//! - `binary`: the same JSON text wrapped as an opaque byte sequence
//!
//! The binary channel is a byte-carrier for the identical logical
//! document, not a schema-aware binary format. The codec never inspects
//! semantic content; its only failure mode is payload-is-not-JSON, which
//! callers classify (invalid-argument on the server, parse error on the
//! client). Numbers survive the trip bit-for-bit: serde_json's
//! `float_roundtrip` parser backs that guarantee for every finite f64.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire encoding negotiated per call. The response always uses the
/// request's mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingMode {
    Json,
    Binary,
}

impl fmt::Display for EncodingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingMode::Json => f.write_str("json"),
            EncodingMode::Binary => f.write_str("binary"),
        }
    }
}

/// One encoded payload. The populated variant *is* the mode, so a
/// payload with an ambiguous or absent encoding is unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Json(String),
    Binary(Vec<u8>),
}

impl Payload {
    /// Recover the encoding mode from the populated variant.
    pub fn mode(&self) -> EncodingMode {
        match self {
            Payload::Json(_) => EncodingMode::Json,
            Payload::Binary(_) => EncodingMode::Binary,
        }
    }

    /// Payload size in bytes as it travels on the wire.
    pub fn len(&self) -> usize {
        match self {
            Payload::Json(text) => text.len(),
            Payload::Binary(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Encode a value into the given mode.
pub fn encode(value: &Value, mode: EncodingMode) -> Result<Payload, serde_json::Error> {
    match mode {
        EncodingMode::Json => Ok(Payload::Json(serde_json::to_string(value)?)),
        EncodingMode::Binary => Ok(Payload::Binary(serde_json::to_vec(value)?)),
    }
}

/// Decode a payload back into a value tree.
pub fn decode(payload: &Payload) -> Result<Value, serde_json::Error> {
    match payload {
        Payload::Json(text) => serde_json::from_str(text),
        Payload::Binary(bytes) => serde_json::from_slice(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_encode_json_produces_text() {
        let payload = encode(&json!({"x": 5, "y": 3}), EncodingMode::Json).unwrap();
        match payload {
            Payload::Json(text) => assert_eq!(text, r#"{"x":5,"y":3}"#),
            Payload::Binary(_) => panic!("expected json payload"),
        }
    }

    #[test]
    fn test_binary_carries_the_same_json_text() {
        let value = json!({"order": ["salad", "espresso"], "table": 4});
        let json_payload = encode(&value, EncodingMode::Json).unwrap();
        let binary_payload = encode(&value, EncodingMode::Binary).unwrap();
        let (Payload::Json(text), Payload::Binary(bytes)) = (json_payload, binary_payload) else {
            panic!("modes mixed up");
        };
        assert_eq!(text.as_bytes(), bytes.as_slice());
    }

    #[test]
    fn test_mode_follows_populated_variant() {
        assert_eq!(Payload::Json("{}".into()).mode(), EncodingMode::Json);
        assert_eq!(Payload::Binary(b"{}".to_vec()).mode(), EncodingMode::Binary);
    }

    #[test]
    fn test_decode_rejects_invalid_json_text() {
        let err = decode(&Payload::Json("{not json".into())).unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_decode_rejects_invalid_binary_bytes() {
        // Not UTF-8, let alone JSON.
        assert!(decode(&Payload::Binary(vec![0xff, 0xfe, 0x01])).is_err());
        // UTF-8 but not JSON.
        assert!(decode(&Payload::Binary(b"hello there".to_vec())).is_err());
    }

    #[test]
    fn test_decode_non_object_values() {
        // The codec carries any JSON value; object-ness is the validator's
        // concern, not the codec's.
        assert_eq!(decode(&Payload::Json("8".into())).unwrap(), json!(8));
        assert_eq!(decode(&Payload::Json("null".into())).unwrap(), json!(null));
        assert_eq!(
            decode(&Payload::Binary(b"[1,2,3]".to_vec())).unwrap(),
            json!([1, 2, 3])
        );
    }

    #[test]
    fn test_mode_display_matches_wire_names() {
        assert_eq!(EncodingMode::Json.to_string(), "json");
        assert_eq!(EncodingMode::Binary.to_string(), "binary");
    }

    #[test]
    fn test_round_trip_preserves_extreme_floats() {
        // Shortest decimal renderings of these need correctly rounded
        // parsing to come back bit-identical.
        let extremes = [
            1.5036608931702677e227,
            -1.5036608931702677e227,
            f64::MAX,
            f64::MIN_POSITIVE,
            5e-324,
        ];
        for x in extremes {
            let value = json!({ "a": x });
            for mode in [EncodingMode::Json, EncodingMode::Binary] {
                let payload = encode(&value, mode).unwrap();
                assert_eq!(decode(&payload).unwrap(), value, "mode {}", mode);
            }
        }
    }

    /// Arbitrary JSON value trees: null/bool/integer/float/string leaves,
    /// nested arrays and objects up to depth 3.
    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| Value::Number(n.into())),
            any::<f64>().prop_filter_map("finite floats only", |f| {
                serde_json::Number::from_f64(f).map(Value::Number)
            }),
            "[a-zA-Z0-9 _-]{0,12}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,8}", inner, 0..6)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_round_trip_holds_in_both_modes(value in arb_json()) {
            for mode in [EncodingMode::Json, EncodingMode::Binary] {
                let payload = encode(&value, mode).unwrap();
                prop_assert_eq!(payload.mode(), mode);
                prop_assert_eq!(decode(&payload).unwrap(), value.clone());
            }
        }
    }
}
