//! Line-oriented text form of a stroke log.
//!
//! ```text
//! SETCOLOR <color>
//! CIRCLE <radius> <x> <y>
//! ```
//!
//! Every line ends with `\n`. Lines starting with any other token are skipped
//! so that newer writers can add commands without breaking older readers.

use crate::error::{CodecError, CodecResult};
use crate::{check_color, check_radius};
use strokeguard_core::{format_fixed, Accuracy, StrokeCommand, StrokeLog};
use tracing::{debug, trace};

/// Leading token of a color change line
pub const SET_COLOR_TOKEN: &str = "SETCOLOR";

/// Leading token of a circle line
pub const CIRCLE_TOKEN: &str = "CIRCLE";

/// Render one command as a text line, without the trailing newline.
///
/// # Errors
///
/// Returns error if the color is not representable, the radius exceeds 255,
/// or a coordinate is not finite
pub fn encode_line(command: &StrokeCommand, accuracy: Accuracy) -> CodecResult<String> {
    match command {
        StrokeCommand::SetColor { color } => {
            check_color(color)?;
            Ok(format!("{} {}", SET_COLOR_TOKEN, color))
        }
        StrokeCommand::Circle { radius, x, y } => {
            check_radius(*radius)?;
            let (x, y) = format_position(*x, *y, accuracy)?;
            Ok(format!("{} {} {} {}", CIRCLE_TOKEN, radius, x, y))
        }
    }
}

/// Encode a log as text, one newline-terminated line per command.
///
/// # Errors
///
/// Returns error if any command cannot be represented
pub fn encode_text(log: &StrokeLog, accuracy: Accuracy) -> CodecResult<String> {
    let mut out = String::new();
    for command in log {
        out.push_str(&encode_line(command, accuracy)?);
        out.push('\n');
    }
    Ok(out)
}

/// Decode a text log.
///
/// # Errors
///
/// Returns [`CodecError::MalformedLine`] if a `SETCOLOR` or `CIRCLE` line is
/// missing fields or carries unparseable numbers,
/// [`CodecError::RadiusOutOfRange`] for radii above 255, and
/// [`CodecError::InvalidColor`] for a color the encoder would refuse.
///
/// A trailing `\r` on a line is dropped, so CRLF files decode like LF files.
pub fn decode_text(text: &str) -> CodecResult<StrokeLog> {
    let mut log = StrokeLog::new();

    for (index, line) in text.split('\n').enumerate() {
        let line_no = index + 1;
        let line = line.strip_suffix('\r').unwrap_or(line);
        let mut tokens = line.split(' ');
        match tokens.next() {
            Some(SET_COLOR_TOKEN) => {
                let color = tokens
                    .next()
                    .filter(|c| !c.is_empty())
                    .ok_or_else(|| malformed(line_no, "missing color"))?;
                check_color(color)?;
                log.push(StrokeCommand::set_color(color));
            }
            Some(CIRCLE_TOKEN) => {
                let radius = tokens
                    .next()
                    .ok_or_else(|| malformed(line_no, "missing radius"))?;
                let radius: u32 = radius
                    .parse()
                    .map_err(|_| malformed(line_no, &format!("bad radius {radius:?}")))?;
                check_radius(radius)?;
                let x = parse_coordinate(tokens.next(), line_no, "x")?;
                let y = parse_coordinate(tokens.next(), line_no, "y")?;
                log.push(StrokeCommand::circle(radius, x, y));
            }
            Some("") | None => {}
            Some(other) => {
                trace!(line = line_no, token = other, "skipping unknown command");
            }
        }
    }

    debug!(commands = log.len(), "decoded text log");
    Ok(log)
}

/// Format a coordinate pair, rejecting non-finite values.
pub(crate) fn format_position(x: f64, y: f64, accuracy: Accuracy) -> CodecResult<(String, String)> {
    if !x.is_finite() || !y.is_finite() {
        return Err(CodecError::InvalidPosition {
            text: format!("{},{}", x, y),
        });
    }
    Ok((format_fixed(x, accuracy), format_fixed(y, accuracy)))
}

fn parse_coordinate(token: Option<&str>, line: usize, axis: &str) -> CodecResult<f64> {
    let token = token.ok_or_else(|| malformed(line, &format!("missing {axis}")))?;
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| malformed(line, &format!("bad {axis} {token:?}")))
}

fn malformed(line: usize, reason: &str) -> CodecError {
    CodecError::MalformedLine {
        line,
        reason: reason.to_string(),
    }
}
