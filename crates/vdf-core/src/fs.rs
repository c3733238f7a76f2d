//! File helpers around the codec. The codec itself does no I/O.

use std::path::Path;

use serde_json::Value;

use crate::config::DecoderConfig;
use crate::decoder::decode;
use crate::encoder::{encode, encode_json};
use crate::error::Result;
use crate::types::VdfValue;

/// Read the whole file at `path` and decode it.
pub fn decode_file(path: impl AsRef<Path>, config: &DecoderConfig) -> Result<VdfValue> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "read VDF file");
    decode(&data, config)
}

/// Encode `value` and write the bytes to `path`. Nothing is written if
/// encoding fails.
pub fn encode_to_file(value: &VdfValue, path: impl AsRef<Path>) -> Result<()> {
    write_bytes(&encode(value)?, path.as_ref())
}

/// Encode a JSON tree and write the bytes to `path`.
pub fn encode_json_to_file(value: &Value, path: impl AsRef<Path>) -> Result<()> {
    write_bytes(&encode_json(value)?, path.as_ref())
}

fn write_bytes(bytes: &[u8], path: &Path) -> Result<()> {
    std::fs::write(path, bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote VDF file");
    Ok(())
}
