//! Binary VDF encoder — converts a [`VdfValue`] tree (or a JSON value) into bytes.
//!
//! Each entry of a composite is tagged from its value:
//!
//! - strings (and JSON `null`, written as an empty string) → [`TAG_STRING`]
//! - integers, booleans and timestamps → [`TAG_INT`], as a little-endian `i32`
//! - objects and arrays → [`TAG_OBJECT`], closed by [`OBJECT_END`]
//!
//! Array entries are keyed by their stringified index. Only composites can
//! be encoded at the top level.
//!
//! # Example
//! ```
//! use vdf_core::{encode, VdfObject, VdfValue};
//!
//! let mut obj = VdfObject::new();
//! obj.insert("AppName", "Game");
//! let bytes = encode(&VdfValue::Object(obj)).unwrap();
//! assert_eq!(bytes, b"\x01AppName\x00Game\x00\x08");
//! ```

use serde_json::Value;

use crate::error::{Result, VdfError};
use crate::format::{OBJECT_END, PROPERTY_NAME_END, STRING_END, TAG_INT, TAG_OBJECT, TAG_STRING};
use crate::types::VdfValue;

/// Writer growth unit in bytes.
pub const ALLOC_BLOCK: usize = 256;

/// Encode a value tree into a binary VDF buffer.
///
/// The output is sized exactly by a measuring pass before anything is
/// written; on error no bytes are returned.
pub fn encode(value: &VdfValue) -> Result<Vec<u8>> {
    if !value.is_composite() {
        return Err(VdfError::UnsupportedValue(format!(
            "top-level value must be an object or array, got {}",
            kind_name(value)
        )));
    }
    let mut writer = Writer::with_capacity(encoded_len(value));
    write_value(&mut writer, value)?;
    Ok(writer.into_bytes())
}

/// Encode a JSON value tree. Numbers must be integers that fit in an `i32`.
pub fn encode_json(value: &Value) -> Result<Vec<u8>> {
    encode(&VdfValue::try_from(value)?)
}

/// Exact byte length of `value` once encoded. Scalars that cannot be
/// encoded count as zero; `encode` reports them.
pub fn encoded_len(value: &VdfValue) -> usize {
    match value {
        VdfValue::Object(obj) => {
            obj.iter()
                .map(|(key, v)| entry_len(key.len(), v))
                .sum::<usize>()
                + 1
        }
        VdfValue::Array(items) => {
            items
                .iter()
                .enumerate()
                .map(|(i, v)| entry_len(decimal_len(i), v))
                .sum::<usize>()
                + 1
        }
        VdfValue::String(s) => s.len() + 1,
        VdfValue::Integer(_) | VdfValue::Boolean(_) | VdfValue::Timestamp(_) => 4,
    }
}

/// tag + key + terminator + payload
fn entry_len(key_len: usize, value: &VdfValue) -> usize {
    1 + key_len + 1 + encoded_len(value)
}

fn decimal_len(mut n: usize) -> usize {
    let mut len = 1;
    while n >= 10 {
        n /= 10;
        len += 1;
    }
    len
}

fn write_value(writer: &mut Writer, value: &VdfValue) -> Result<()> {
    match value {
        VdfValue::Object(obj) => {
            for (key, item) in obj {
                write_entry(writer, key, item)?;
            }
            writer.u8(OBJECT_END);
        }
        VdfValue::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                write_entry(writer, &index.to_string(), item)?;
            }
            writer.u8(OBJECT_END);
        }
        VdfValue::String(s) => {
            check_terminator_free(s, "string")?;
            writer.terminated(s.as_bytes(), STRING_END);
        }
        VdfValue::Integer(_) | VdfValue::Boolean(_) | VdfValue::Timestamp(_) => {
            let n = value.as_wire_int().ok_or_else(|| {
                VdfError::UnsupportedValue(format!("{value:?} does not fit in a 32-bit integer"))
            })?;
            writer.i32_le(n);
        }
    }
    Ok(())
}

fn write_entry(writer: &mut Writer, key: &str, value: &VdfValue) -> Result<()> {
    check_terminator_free(key, "key")?;
    writer.u8(tag_for(value));
    writer.terminated(key.as_bytes(), PROPERTY_NAME_END);
    write_value(writer, value)
}

fn tag_for(value: &VdfValue) -> u8 {
    match value {
        VdfValue::Object(_) | VdfValue::Array(_) => TAG_OBJECT,
        VdfValue::String(_) => TAG_STRING,
        VdfValue::Integer(_) | VdfValue::Boolean(_) | VdfValue::Timestamp(_) => TAG_INT,
    }
}

/// A NUL inside a key or string would end the span early on decode.
fn check_terminator_free(s: &str, what: &str) -> Result<()> {
    if s.as_bytes().contains(&STRING_END) {
        return Err(VdfError::UnsupportedValue(format!(
            "{what} {s:?} contains a NUL byte"
        )));
    }
    Ok(())
}

fn kind_name(value: &VdfValue) -> &'static str {
    match value {
        VdfValue::Object(_) => "object",
        VdfValue::Array(_) => "array",
        VdfValue::String(_) => "string",
        VdfValue::Integer(_) => "integer",
        VdfValue::Boolean(_) => "boolean",
        VdfValue::Timestamp(_) => "timestamp",
    }
}

/// Append-only byte buffer with a write cursor.
///
/// When an append does not fit in the remaining capacity, the buffer grows
/// by the smallest whole number of [`ALLOC_BLOCK`]-sized blocks that covers
/// it.
pub(crate) struct Writer {
    buf: Vec<u8>,
    cursor: usize,
    alloc_size: usize,
}

impl Writer {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0u8; capacity],
            cursor: 0,
            alloc_size: ALLOC_BLOCK,
        }
    }

    fn ensure_capacity(&mut self, additional: usize) {
        let remaining = self.buf.len() - self.cursor;
        if remaining >= additional {
            return;
        }
        let blocks = blocks_for(additional - remaining, self.alloc_size);
        self.buf.resize(self.buf.len() + blocks * self.alloc_size, 0);
    }

    fn u8(&mut self, byte: u8) {
        self.ensure_capacity(1);
        self.buf[self.cursor] = byte;
        self.cursor += 1;
    }

    fn bytes(&mut self, bytes: &[u8]) {
        self.ensure_capacity(bytes.len());
        self.buf[self.cursor..self.cursor + bytes.len()].copy_from_slice(bytes);
        self.cursor += bytes.len();
    }

    fn terminated(&mut self, bytes: &[u8], terminator: u8) {
        self.ensure_capacity(bytes.len() + 1);
        self.bytes(bytes);
        self.u8(terminator);
    }

    fn i32_le(&mut self, n: i32) {
        self.bytes(&n.to_le_bytes());
    }

    /// The written bytes, without the unused tail.
    pub(crate) fn into_bytes(mut self) -> Vec<u8> {
        self.buf.truncate(self.cursor);
        self.buf
    }
}

/// Smallest number of `block`-sized blocks covering `needed`, at least one.
fn blocks_for(needed: usize, block: usize) -> usize {
    needed.div_ceil(block).max(1)
}
