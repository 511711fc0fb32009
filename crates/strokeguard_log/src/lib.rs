//! STROKEGUARD Stroke Log Codec
//!
//! Stateless transforms between a [`StrokeLog`](strokeguard_core::StrokeLog)
//! and its wire forms: a line-oriented text log, a compact binary log, and a
//! base64 wrapper around the binary bytes.
//!
//! # Binary format
//!
//! ```text
//! 0x01 radius:u8 len:u8 <len bytes ASCII "x,y">   circle
//! 0x02 len:u8 <len bytes color>                    color change
//! ```
//!
//! Unknown op-code bytes are skipped one byte at a time.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod binary;
pub mod cursor;
pub mod error;
pub mod format;
pub mod text;
pub mod transport;

pub use binary::{decode_binary, encode_binary, MAX_PAYLOAD_LEN, OP_CIRCLE, OP_SET_COLOR};
pub use cursor::ByteCursor;
pub use error::{CodecError, CodecResult};
pub use format::{encode, ExportFormat, Exported};
pub use text::{decode_text, encode_text};
pub use transport::{from_base64, to_base64};

/// Largest radius representable in the binary form
pub const MAX_RADIUS: u32 = u8::MAX as u32;

/// Check that a color token survives both encodings.
///
/// The text form separates fields with spaces, so a token must be non-empty
/// and free of whitespace.
///
/// # Errors
///
/// Returns [`CodecError::InvalidColor`] otherwise
pub fn check_color(color: &str) -> CodecResult<()> {
    if color.is_empty() || color.chars().any(char::is_whitespace) {
        return Err(CodecError::InvalidColor {
            color: color.to_string(),
        });
    }
    Ok(())
}

/// Check that a radius fits the single radius byte.
///
/// # Errors
///
/// Returns [`CodecError::RadiusOutOfRange`] if `radius > 255`
pub fn check_radius(radius: u32) -> CodecResult<()> {
    if radius > MAX_RADIUS {
        return Err(CodecError::RadiusOutOfRange { radius });
    }
    Ok(())
}
