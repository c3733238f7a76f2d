//! Error types for VDF encoding and decoding operations.

use thiserror::Error;

/// Errors that can occur during VDF encoding or decoding.
#[derive(Error, Debug)]
pub enum VdfError {
    /// The byte stream is not valid VDF: an unknown tag byte, or the buffer
    /// ended before a key, string, or integer was complete.
    #[error("malformed VDF at byte {offset}: {message}")]
    MalformedInput { offset: usize, message: String },

    /// A key or string span was not valid UTF-8.
    #[error("malformed VDF at byte {offset}: invalid UTF-8 in {what}")]
    InvalidText {
        offset: usize,
        what: &'static str,
        #[source]
        source: std::str::Utf8Error,
    },

    /// The value tree contains something the format cannot carry.
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    /// JSON text could not be parsed (`json_to_vdf`) or rendered (`vdf_to_json`).
    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Reading or writing a VDF file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VdfError {
    pub(crate) fn malformed(offset: usize, message: impl Into<String>) -> Self {
        VdfError::MalformedInput {
            offset,
            message: message.into(),
        }
    }

    /// True for the decode-side failures (`MalformedInput` and `InvalidText`).
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            VdfError::MalformedInput { .. } | VdfError::InvalidText { .. }
        )
    }
}

/// Convenience alias used throughout vdf-core.
pub type Result<T> = std::result::Result<T, VdfError>;
