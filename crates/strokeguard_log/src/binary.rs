//! Compact binary form of a stroke log.
//!
//! Positions travel as ASCII decimal text (`"x,y"`) formatted exactly as the
//! text form formats them, so both forms carry identical digits.

use crate::cursor::ByteCursor;
use crate::error::{CodecError, CodecResult};
use crate::text::format_position;
use crate::{check_color, check_radius};
use strokeguard_core::{Accuracy, StrokeCommand, StrokeLog};
use tracing::{debug, trace};

/// Op-code of a circle record
pub const OP_CIRCLE: u8 = 0x01;

/// Op-code of a color change record
pub const OP_SET_COLOR: u8 = 0x02;

/// Largest length-prefixed payload
pub const MAX_PAYLOAD_LEN: usize = u8::MAX as usize;

/// Encode a log into binary records.
///
/// # Errors
///
/// Returns error if a radius exceeds 255, a payload exceeds 255 bytes, a
/// color is not representable, or a coordinate is not finite
pub fn encode_binary(log: &StrokeLog, accuracy: Accuracy) -> CodecResult<Vec<u8>> {
    let mut out = Vec::new();
    for command in log {
        encode_record(command, accuracy, &mut out)?;
    }
    Ok(out)
}

/// Append one command's record to `out`.
///
/// # Errors
///
/// As [`encode_binary`]; nothing is appended on error
pub fn encode_record(command: &StrokeCommand, accuracy: Accuracy, out: &mut Vec<u8>) -> CodecResult<()> {
    match command {
        StrokeCommand::Circle { radius, x, y } => {
            check_radius(*radius)?;
            let (x, y) = format_position(*x, *y, accuracy)?;
            let payload = format!("{},{}", x, y);
            let len = payload_len(payload.len())?;
            out.push(OP_CIRCLE);
            out.push(*radius as u8);
            out.push(len);
            out.extend_from_slice(payload.as_bytes());
        }
        StrokeCommand::SetColor { color } => {
            check_color(color)?;
            let len = payload_len(color.len())?;
            out.push(OP_SET_COLOR);
            out.push(len);
            out.extend_from_slice(color.as_bytes());
        }
    }
    Ok(())
}

/// Decode binary records into a log.
///
/// Unknown op-codes are skipped one byte at a time.
///
/// # Errors
///
/// Returns [`CodecError::TruncatedStream`] if a record runs past the end,
/// [`CodecError::InvalidPosition`] for a malformed position payload, and
/// [`CodecError::InvalidColor`] for a color that is not UTF-8
pub fn decode_binary(bytes: &[u8]) -> CodecResult<StrokeLog> {
    let mut log = StrokeLog::new();
    let mut cursor = ByteCursor::new(bytes);
    let mut skipped = 0usize;

    while !cursor.is_end() {
        let offset = cursor.pos();
        match cursor.read_u8()? {
            OP_CIRCLE => {
                let radius = cursor.read_u8()?;
                let len = cursor.read_u8()?;
                let payload = cursor.read_slice(usize::from(len))?;
                let (x, y) = parse_position(payload)?;
                log.push(StrokeCommand::circle(u32::from(radius), x, y));
            }
            OP_SET_COLOR => {
                let len = cursor.read_u8()?;
                let payload = cursor.read_slice(usize::from(len))?;
                let color = std::str::from_utf8(payload).map_err(|_| CodecError::InvalidColor {
                    color: String::from_utf8_lossy(payload).into_owned(),
                })?;
                log.push(StrokeCommand::set_color(color));
            }
            opcode => {
                trace!(offset, opcode, "skipping unknown op-code");
                skipped += 1;
            }
        }
    }

    debug!(commands = log.len(), skipped, bytes = bytes.len(), "decoded binary log");
    Ok(log)
}

fn payload_len(len: usize) -> CodecResult<u8> {
    u8::try_from(len).map_err(|_| CodecError::PayloadTooLong { len })
}

fn parse_position(payload: &[u8]) -> CodecResult<(f64, f64)> {
    let invalid = || CodecError::InvalidPosition {
        text: String::from_utf8_lossy(payload).into_owned(),
    };

    if !payload.is_ascii() {
        return Err(invalid());
    }
    let text = std::str::from_utf8(payload).map_err(|_| invalid())?;
    let (x, y) = text.split_once(',').ok_or_else(invalid)?;
    let parse = |s: &str| s.parse::<f64>().ok().filter(|v| v.is_finite());
    match (parse(x), parse(y)) {
        (Some(x), Some(y)) => Ok((x, y)),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_circle_record() {
        let log: StrokeLog = vec![StrokeCommand::circle(5, 10.0, 12.5)].into();
        let bytes = encode_binary(&log, Accuracy::new(1)).unwrap();
        let mut expected = vec![OP_CIRCLE, 5, 9];
        expected.extend_from_slice(b"10.0,12.5");
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_encode_color_record() {
        let log: StrokeLog = vec![StrokeCommand::set_color("red")].into();
        let bytes = encode_binary(&log, Accuracy::new(2)).unwrap();
        assert_eq!(bytes, vec![OP_SET_COLOR, 3, b'r', b'e', b'd']);
    }

    #[test]
    fn test_encode_rejects_large_radius() {
        let log: StrokeLog = vec![StrokeCommand::circle(256, 1.0, 1.0)].into();
        assert_eq!(
            encode_binary(&log, Accuracy::new(2)),
            Err(CodecError::RadiusOutOfRange { radius: 256 })
        );
    }

    #[test]
    fn test_encode_rejects_long_payload() {
        let color = "a".repeat(256);
        let log: StrokeLog = vec![StrokeCommand::set_color(color)].into();
        assert_eq!(
            encode_binary(&log, Accuracy::new(2)),
            Err(CodecError::PayloadTooLong { len: 256 })
        );
    }

    #[test]
    fn test_encode_record_leaves_buffer_untouched_on_error() {
        let mut out = vec![9];
        let result = encode_record(&StrokeCommand::circle(999, 0.0, 0.0), Accuracy::new(2), &mut out);
        assert!(result.is_err());
        assert_eq!(out, vec![9]);
    }

    #[test]
    fn test_decode_binary() {
        let mut bytes = vec![OP_SET_COLOR, 5];
        bytes.extend_from_slice(b"black");
        bytes.extend_from_slice(&[OP_CIRCLE, 5, 11]);
        bytes.extend_from_slice(b"10.00,10.00");
        let log = decode_binary(&bytes).unwrap();
        assert_eq!(
            log,
            vec![
                StrokeCommand::set_color("black"),
                StrokeCommand::circle(5, 10.0, 10.0),
            ]
            .into()
        );
    }

    #[test]
    fn test_decode_skips_unknown_opcodes() {
        let mut bytes = vec![0x00, 0x7f, 0xff, OP_SET_COLOR, 1, b'r', 0x03];
        bytes.extend_from_slice(&[OP_CIRCLE, 2, 3]);
        bytes.extend_from_slice(b"1,2");
        let log = decode_binary(&bytes).unwrap();
        assert_eq!(
            log,
            vec![StrokeCommand::set_color("r"), StrokeCommand::circle(2, 1.0, 2.0)].into()
        );
    }

    #[test]
    fn test_decode_truncated_payload() {
        let mut bytes = vec![OP_CIRCLE, 5, 10];
        bytes.extend_from_slice(b"1,2");
        assert_eq!(
            decode_binary(&bytes),
            Err(CodecError::TruncatedStream {
                offset: 3,
                needed: 10,
                available: 3
            })
        );
    }

    #[test]
    fn test_decode_truncated_header() {
        assert!(matches!(
            decode_binary(&[OP_CIRCLE, 5]),
            Err(CodecError::TruncatedStream { offset: 2, .. })
        ));
        assert!(matches!(
            decode_binary(&[OP_SET_COLOR]),
            Err(CodecError::TruncatedStream { offset: 1, .. })
        ));
    }

    #[test]
    fn test_decode_invalid_position() {
        for payload in [&b"12"[..], b"a,b", b"1,2,3", b",", b"NaN,1", b"inf,2"] {
            let mut bytes = vec![OP_CIRCLE, 1, payload.len() as u8];
            bytes.extend_from_slice(payload);
            assert!(
                matches!(decode_binary(&bytes), Err(CodecError::InvalidPosition { .. })),
                "payload {:?}",
                payload
            );
        }
    }

    #[test]
    fn test_decode_invalid_color() {
        let bytes = vec![OP_SET_COLOR, 2, 0xff, 0xfe];
        assert!(matches!(decode_binary(&bytes), Err(CodecError::InvalidColor { .. })));
    }

    #[test]
    fn test_decode_empty() {
        assert!(decode_binary(&[]).unwrap().is_empty());
    }

    proptest::proptest! {
        #[test]
        fn prop_binary_roundtrip_at_accuracy(
            commands in proptest::collection::vec(
                prop_oneof![
                    (0u32..=255, -100_000i32..100_000, -100_000i32..100_000)
                        .prop_map(|(r, x, y)| StrokeCommand::circle(r, f64::from(x) / 1000.0, f64::from(y) / 1000.0)),
                    "[a-z#0-9()]{1,12}".prop_map(|c| StrokeCommand::set_color(c)),
                ],
                0..32,
            )
        ) {
            let log: StrokeLog = commands.into();
            let bytes = encode_binary(&log, Accuracy::new(3)).unwrap();
            prop_assert_eq!(decode_binary(&bytes).unwrap(), log);
        }

        #[test]
        fn prop_binary_decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
            let _ = decode_binary(&bytes);
        }
    }
}
