//! Base64 transport wrapper around the binary form.

use crate::error::{CodecError, CodecResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Encode binary log bytes as standard, padded base64
#[must_use]
pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode base64 transport text back into binary log bytes.
///
/// ASCII whitespace (line wrapping from mail or terminals) is ignored.
///
/// # Errors
///
/// Returns [`CodecError::InvalidBase64`] for characters outside the standard
/// alphabet or bad padding
pub fn from_base64(text: &str) -> CodecResult<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD
        .decode(compact.as_bytes())
        .map_err(|err| CodecError::InvalidBase64 {
            reason: err.to_string(),
        })
}
