//! Projections between [`VdfValue`] and `serde_json::Value`.
//!
//! Timestamps project to integer epoch seconds rather than formatted dates,
//! so a JSON file edited by hand re-encodes to the same bytes. JSON `null`
//! maps to an empty string, the same as the encoder's scalar normalization.

use serde::ser::Error as _;
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::config::DecoderConfig;
use crate::decoder::decode;
use crate::encoder::encode_json;
use crate::error::{Result, VdfError};
use crate::types::{VdfObject, VdfValue};

impl VdfValue {
    /// Project into a JSON value. Object key order is preserved.
    pub fn to_json(&self) -> Value {
        match self {
            VdfValue::Object(obj) => {
                let map: Map<String, Value> = obj
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect();
                Value::Object(map)
            }
            VdfValue::Array(items) => Value::Array(items.iter().map(VdfValue::to_json).collect()),
            VdfValue::String(s) => Value::String(s.clone()),
            VdfValue::Integer(n) => Value::Number(Number::from(*n)),
            VdfValue::Boolean(b) => Value::Bool(*b),
            VdfValue::Timestamp(ts) => Value::Number(Number::from(ts.timestamp())),
        }
    }

    /// Build a value tree from JSON. See the [`TryFrom`] impl for the rules.
    pub fn from_json(value: &Value) -> Result<Self> {
        Self::try_from(value)
    }
}

impl From<&VdfValue> for Value {
    fn from(value: &VdfValue) -> Self {
        value.to_json()
    }
}

/// Objects, arrays, strings and booleans map directly; `null` becomes an
/// empty string; numbers must be integers within the `i32` range.
impl TryFrom<&Value> for VdfValue {
    type Error = VdfError;

    fn try_from(value: &Value) -> Result<Self> {
        Ok(match value {
            Value::Null => VdfValue::String(String::new()),
            Value::Bool(b) => VdfValue::Boolean(*b),
            Value::Number(n) => VdfValue::Integer(json_number_to_i32(n)?),
            Value::String(s) => VdfValue::String(s.clone()),
            Value::Array(items) => VdfValue::Array(
                items
                    .iter()
                    .map(VdfValue::try_from)
                    .collect::<Result<Vec<_>>>()?,
            ),
            Value::Object(map) => {
                let mut obj = VdfObject::new();
                for (key, item) in map {
                    obj.insert(key.clone(), VdfValue::try_from(item)?);
                }
                VdfValue::Object(obj)
            }
        })
    }
}

fn json_number_to_i32(n: &Number) -> Result<i32> {
    n.as_i64()
        .and_then(|i| i32::try_from(i).ok())
        .ok_or_else(|| {
            VdfError::UnsupportedValue(format!("number {n} is not a 32-bit integer"))
        })
}

/// Decode a VDF buffer and render it as pretty-printed JSON (4-space indent).
pub fn vdf_to_json(buffer: &[u8], config: &DecoderConfig) -> Result<String> {
    let value = decode(buffer, config)?;
    to_pretty_json(&value.to_json())
}

/// Parse JSON text and encode it as VDF.
pub fn json_to_vdf(json: &str) -> Result<Vec<u8>> {
    let value: Value = serde_json::from_str(json)?;
    encode_json(&value)
}

fn to_pretty_json(value: &Value) -> Result<String> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(out).map_err(|e| VdfError::JsonParse(serde_json::Error::custom(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use serde_json::json;

    #[test]
    fn timestamp_projects_to_epoch_seconds() {
        let ts = DateTime::from_timestamp(1_600_000_000, 0).unwrap();
        assert_eq!(VdfValue::Timestamp(ts).to_json(), json!(1_600_000_000));
    }

    #[test]
    fn object_order_survives_projection() {
        let obj: VdfObject = [("z", 1), ("a", 2), ("m", 3)].into_iter().collect();
        let json = VdfValue::Object(obj).to_json();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn null_becomes_empty_string() {
        assert_eq!(
            VdfValue::try_from(&Value::Null).unwrap(),
            VdfValue::String(String::new())
        );
    }

    #[test]
    fn non_i32_numbers_are_rejected() {
        for bad in [json!(1.5), json!(4_294_967_296i64), json!(-2_147_483_649i64)] {
            let err = VdfValue::try_from(&bad).unwrap_err();
            assert!(matches!(err, VdfError::UnsupportedValue(_)), "{bad}");
        }
        assert_eq!(
            VdfValue::try_from(&json!(i32::MIN)).unwrap(),
            VdfValue::Integer(i32::MIN)
        );
    }

    #[test]
    fn pretty_json_uses_four_space_indent() {
        let text = to_pretty_json(&json!({"a": 1})).unwrap();
        assert_eq!(text, "{\n    \"a\": 1\n}");
    }

    #[test]
    fn pretty_json_keeps_non_ascii_text() {
        let bytes = b"\x01AppName\x00Caf\xc3\xa9 \xe2\x98\x95\x00";
        let text = vdf_to_json(bytes, &DecoderConfig::default()).unwrap();
        assert_eq!(text, "{\n    \"AppName\": \"Caf\u{e9} \u{2615}\"\n}");
    }
}
