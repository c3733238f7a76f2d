//! # vdf-core
//!
//! Pure-Rust encoder and decoder for Steam's **binary VDF** format, the
//! tagged object stream behind `userdata/<id>/config/shortcuts.vdf`.
//!
//! The raw format carries only nested objects, NUL-terminated strings and
//! little-endian 32-bit integers. Decoding layers three coercions on top,
//! controlled by [`DecoderConfig`]: date properties become timestamps, 0/1
//! integers become booleans, and objects keyed `"0"`, `"1"`, ... become
//! arrays. Encoding folds them back.
//!
//! ## Quick start
//!
//! ```rust
//! use vdf_core::{decode, encode_json, DecoderConfig};
//! use serde_json::json;
//!
//! let input = json!({"shortcuts": [{"AppName": "Game", "IsHidden": false}]});
//! let bytes = encode_json(&input).unwrap();
//!
//! let value = decode(&bytes, &DecoderConfig::default()).unwrap();
//! assert_eq!(value.to_json(), input);
//! ```
//!
//! ## Modules
//!
//! - [`decoder`] — bytes → [`VdfValue`]
//! - [`encoder`] — [`VdfValue`] / JSON → bytes
//! - [`convert`] — [`VdfValue`] ↔ `serde_json::Value`, JSON text helpers
//! - [`config`] — [`DecoderConfig`]
//! - [`format`] — tag and terminator bytes
//! - [`fs`] — `decode_file` / `encode_to_file`
//! - [`error`] — Error types for decode/encode failures

pub mod config;
pub mod convert;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod format;
pub mod fs;
pub mod types;

pub use config::DecoderConfig;
pub use convert::{json_to_vdf, vdf_to_json};
pub use decoder::{decode, decode_default};
pub use encoder::{encode, encode_json, encoded_len};
pub use error::{Result, VdfError};
pub use fs::{decode_file, encode_json_to_file, encode_to_file};
pub use types::{VdfObject, VdfValue};
