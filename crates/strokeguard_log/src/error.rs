//! Codec error types.

/// Codec result type
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors produced while encoding or decoding a stroke log.
///
/// Decode errors come from untrusted input and are always recoverable: the
/// caller rejects that one blob and carries on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// A record runs past the end of the byte stream
    #[error("truncated stream at offset {offset}: needed {needed} bytes, {available} available")]
    TruncatedStream {
        /// Offset of the read that failed
        offset: usize,
        /// Bytes the record declared
        needed: usize,
        /// Bytes left in the stream
        available: usize,
    },

    /// Transport text is not valid base64
    #[error("invalid base64: {reason}")]
    InvalidBase64 {
        /// Decoder message
        reason: String,
    },

    /// Radius does not fit the single radius byte
    #[error("radius {radius} out of range (max 255)")]
    RadiusOutOfRange {
        /// Offending radius
        radius: u32,
    },

    /// A length-prefixed payload exceeds 255 bytes
    #[error("payload of {len} bytes exceeds the 255 byte limit")]
    PayloadTooLong {
        /// Payload length
        len: usize,
    },

    /// A circle position is not two finite decimals
    #[error("invalid position: {text:?}")]
    InvalidPosition {
        /// Position as found (or formatted)
        text: String,
    },

    /// A color token cannot be carried by the log
    #[error("invalid color: {color:?}")]
    InvalidColor {
        /// Offending color
        color: String,
    },

    /// A recognized text command has missing or unparseable fields
    #[error("malformed line {line}: {reason}")]
    MalformedLine {
        /// 1-based line number
        line: usize,
        /// What was wrong
        reason: String,
    },
}
