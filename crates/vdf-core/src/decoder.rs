//! Binary VDF decoder — converts a tagged byte stream into a [`VdfValue`] tree.
//!
//! The decoder is a recursive descent over a single forward cursor:
//!
//! - read a tag byte; [`OBJECT_END`] closes the current object
//! - read the property name up to [`PROPERTY_NAME_END`]
//! - read the payload for the tag (nested object, string, or 4-byte integer)
//! - insert into the object under construction (a repeated key overwrites
//!   the earlier value but keeps its position)
//!
//! Once an object is complete, array inference runs over its keys. The top
//! level is an unwrapped field sequence that ends at its own [`OBJECT_END`]
//! or at the end of the buffer. Nesting is capped at [`MAX_DEPTH`].
//!
//! # Example
//! ```
//! use vdf_core::{decode, DecoderConfig, VdfValue};
//!
//! // { "name": "Game", "tags": { "0": "favorite" } }
//! let bytes = b"\x01name\x00Game\x00\x00tags\x00\x010\x00favorite\x00\x08";
//! let value = decode(bytes, &DecoderConfig::default()).unwrap();
//! assert_eq!(value.get("name"), Some(&VdfValue::from("Game")));
//! assert_eq!(
//!     value.get("tags"),
//!     Some(&VdfValue::Array(vec![VdfValue::from("favorite")]))
//! );
//! ```

use chrono::DateTime;

use crate::config::DecoderConfig;
use crate::error::{Result, VdfError};
use crate::format::{
    MAX_DEPTH, OBJECT_END, PROPERTY_NAME_END, STRING_END, TAG_INT, TAG_OBJECT, TAG_STRING,
};
use crate::types::{VdfObject, VdfValue};

/// Decode a binary VDF buffer into a value tree.
///
/// An empty buffer decodes to an empty object. Fails with
/// [`VdfError::MalformedInput`] on an unknown tag or a truncated field, and
/// with [`VdfError::InvalidText`] when a key or string is not UTF-8.
/// Objects nested more than [`MAX_DEPTH`] levels deep are rejected as
/// malformed.
pub fn decode(buffer: &[u8], config: &DecoderConfig) -> Result<VdfValue> {
    let mut parser = Parser::new(buffer, config);
    let value = parser.read_object()?;
    if parser.cursor < buffer.len() {
        tracing::debug!(
            offset = parser.cursor,
            ignored = buffer.len() - parser.cursor,
            "trailing bytes after top-level end-of-object"
        );
    }
    Ok(value)
}

/// Decode with [`DecoderConfig::default`].
pub fn decode_default(buffer: &[u8]) -> Result<VdfValue> {
    decode(buffer, &DecoderConfig::default())
}

/// Cursor state for one decode call.
struct Parser<'a> {
    buffer: &'a [u8],
    cursor: usize,
    /// Number of enclosing objects, not counting the top level.
    depth: usize,
    config: &'a DecoderConfig,
}

impl<'a> Parser<'a> {
    fn new(buffer: &'a [u8], config: &'a DecoderConfig) -> Self {
        Self {
            buffer,
            cursor: 0,
            depth: 0,
            config,
        }
    }

    /// Read fields until an end-of-object tag or the end of the buffer, then
    /// apply array inference to the result.
    ///
    /// Nested calls consume their own [`OBJECT_END`]. Running out of buffer
    /// between fields is not an error at any depth.
    fn read_object(&mut self) -> Result<VdfValue> {
        let mut obj = VdfObject::new();

        while self.cursor < self.buffer.len() {
            let tag_offset = self.cursor;
            let tag = self.buffer[self.cursor];
            self.cursor += 1;

            if tag == OBJECT_END {
                break;
            }

            let key = self.read_str(PROPERTY_NAME_END, "property name")?;

            let value = match tag {
                TAG_OBJECT => self.read_nested(tag_offset)?,
                TAG_STRING => VdfValue::String(self.read_str(STRING_END, "string value")?),
                TAG_INT => {
                    let raw = self.read_int()?;
                    self.coerce_int(&key, raw)
                }
                other => {
                    return Err(VdfError::malformed(
                        tag_offset,
                        format!("unrecognised type 0x{other:02x}"),
                    ));
                }
            };

            obj.insert(key, value);
        }

        if self.config.convert_arrays && looks_like_array(&obj) {
            return Ok(VdfValue::Array(obj.into_values().collect()));
        }
        Ok(VdfValue::Object(obj))
    }

    fn read_nested(&mut self, tag_offset: usize) -> Result<VdfValue> {
        if self.depth >= MAX_DEPTH {
            return Err(VdfError::malformed(
                tag_offset,
                format!("nesting deeper than {MAX_DEPTH} objects"),
            ));
        }
        self.depth += 1;
        let value = self.read_object();
        self.depth -= 1;
        value
    }

    /// Read UTF-8 bytes up to `terminator` and step past it.
    fn read_str(&mut self, terminator: u8, what: &'static str) -> Result<String> {
        let start = self.cursor;
        let rest = &self.buffer[start..];
        let len = rest.iter().position(|&b| b == terminator).ok_or_else(|| {
            VdfError::malformed(start, format!("unterminated {what}"))
        })?;

        let text = std::str::from_utf8(&rest[..len]).map_err(|source| VdfError::InvalidText {
            offset: start,
            what,
            source,
        })?;
        self.cursor = start + len + 1;
        Ok(text.to_string())
    }

    fn read_int(&mut self) -> Result<i32> {
        let start = self.cursor;
        let bytes: [u8; 4] = self
            .buffer
            .get(start..start + 4)
            .and_then(|slice| slice.try_into().ok())
            .ok_or_else(|| {
                VdfError::malformed(
                    start,
                    format!(
                        "integer needs 4 bytes, {} remaining",
                        self.buffer.len() - start
                    ),
                )
            })?;
        self.cursor += 4;
        Ok(i32::from_le_bytes(bytes))
    }

    /// Date properties win over boolean coercion. A zero date means "never"
    /// and decodes as `false`.
    fn coerce_int(&self, key: &str, raw: i32) -> VdfValue {
        if self.config.is_date_property(key) {
            if raw == 0 {
                return VdfValue::Boolean(false);
            }
            return DateTime::from_timestamp(i64::from(raw), 0)
                .map(VdfValue::Timestamp)
                .unwrap_or(VdfValue::Integer(raw));
        }
        if self.config.convert_booleans && (raw == 0 || raw == 1) {
            return VdfValue::Boolean(raw == 1);
        }
        VdfValue::Integer(raw)
    }
}

/// An object reads as an array when it has keys and every key starts with
/// an ASCII digit. Indices are not checked for order or gaps.
pub fn looks_like_array(obj: &VdfObject) -> bool {
    !obj.is_empty() && obj.keys().all(|key| is_numeric_key(key))
}

/// True when `key` begins with one or more decimal digits (`"0"`, `"12"`,
/// `"3abc"`).
pub fn is_numeric_key(key: &str) -> bool {
    key.as_bytes().first().is_some_and(u8::is_ascii_digit)
}
