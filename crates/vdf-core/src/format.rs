//! Wire constants of the binary VDF format.
//!
//! A stream is a sequence of fields, each `tag | key | 0x00 | payload`.
//! Strings are terminated by the same `0x00` byte as keys; objects are closed
//! by [`OBJECT_END`]. The encoder closes the top level with [`OBJECT_END`]
//! too, as Steam writes it; the decoder stops at either that byte or the end
//! of the buffer.

/// Nested object: payload is a field sequence closed by [`OBJECT_END`].
pub const TAG_OBJECT: u8 = 0x00;
/// String: payload is UTF-8 closed by [`STRING_END`].
pub const TAG_STRING: u8 = 0x01;
/// Integer: payload is 4 bytes, little-endian `i32`.
pub const TAG_INT: u8 = 0x02;

/// Closes an object's field sequence. Only read in tag position.
pub const OBJECT_END: u8 = 0x08;
/// Terminates strings.
pub const STRING_END: u8 = 0x00;
/// Terminates property names.
pub const PROPERTY_NAME_END: u8 = 0x00;

/// Deepest object nesting the decoder accepts below the top level.
pub const MAX_DEPTH: usize = 512;

/// Property names decoded as timestamps by default.
pub const DATE_PROPERTIES: &[&str] = &["LastPlayTime"];
