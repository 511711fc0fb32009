//! Accuracy setting and fixed-point formatting.
//!
//! Every coordinate that leaves the engine goes through [`format_fixed`], so the
//! text and binary encodings always agree on the digits they carry.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest supported number of fractional digits
pub const MAX_ACCURACY: u8 = 20;

/// Number of fractional digits used when formatting coordinates.
///
/// Always within `0..=MAX_ACCURACY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "u8")]
pub struct Accuracy(u8);

impl Accuracy {
    /// Create an accuracy, clamping to [`MAX_ACCURACY`]
    #[must_use]
    pub const fn new(digits: u8) -> Self {
        if digits > MAX_ACCURACY {
            Self(MAX_ACCURACY)
        } else {
            Self(digits)
        }
    }

    /// Validate a raw numeric accuracy.
    ///
    /// # Errors
    ///
    /// Returns error if the value is non-finite, fractional or negative.
    /// Values above [`MAX_ACCURACY`] are clamped, not rejected.
    pub fn from_f64(value: f64) -> ConfigResult<Self> {
        if !value.is_finite() {
            return Err(ConfigError::NonFiniteAccuracy { value });
        }
        if value.fract() != 0.0 {
            return Err(ConfigError::FractionalAccuracy { value });
        }
        if value < 0.0 {
            return Err(ConfigError::NegativeAccuracy { value });
        }
        let digits = value.min(f64::from(MAX_ACCURACY)) as u8;
        Ok(Self(digits))
    }

    /// Validate an accuracy that may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingAccuracy`] for `None`, otherwise as
    /// [`Accuracy::from_f64`].
    pub fn from_option(value: Option<f64>) -> ConfigResult<Self> {
        match value {
            Some(v) => Self::from_f64(v),
            None => Err(ConfigError::MissingAccuracy),
        }
    }

    /// Number of fractional digits
    #[must_use]
    pub const fn digits(self) -> u8 {
        self.0
    }
}

impl Default for Accuracy {
    fn default() -> Self {
        Self(2)
    }
}

impl TryFrom<f64> for Accuracy {
    type Error = ConfigError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_f64(value)
    }
}

impl From<Accuracy> for u8 {
    fn from(accuracy: Accuracy) -> Self {
        accuracy.0
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Format `value` with exactly `accuracy` fractional digits.
///
/// Exact ties round half away from zero and negative zero prints without a
/// sign. Non-finite values print as `NaN`, `Infinity` or `-Infinity`.
#[must_use]
pub fn format_fixed(value: f64, accuracy: Accuracy) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let value = if value == 0.0 { 0.0 } else { value };
    let digits = usize::from(accuracy.digits());

    if is_exact_tie(value, accuracy.digits()) {
        // The expansion terminates at digits + 1, so this rendering is exact.
        let exact = format!("{:.*}", digits + 1, value);
        return round_half_away(&exact);
    }

    format!("{:.*}", digits, value)
}

/// Whether `value` lies exactly halfway between two `digits`-place decimals.
fn is_exact_tie(value: f64, digits: u8) -> bool {
    let bits = value.abs().to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased - 1075)
    };

    if exponent >= 0 || mantissa == 0 {
        return false;
    }

    // mantissa * 10^20 stays below 2^120
    let shift = exponent.unsigned_abs();
    if shift > 120 {
        return false;
    }

    let scaled = u128::from(mantissa) * 10u128.pow(u32::from(digits));
    let modulus = 1u128 << shift;
    scaled % modulus == modulus >> 1
}

/// Drop the trailing `5` of an exact rendering and bump the magnitude by one
/// unit in the last remaining place.
fn round_half_away(exact: &str) -> String {
    let mut bytes = exact.as_bytes()[..exact.len() - 1].to_vec();
    if bytes.last() == Some(&b'.') {
        bytes.pop();
    }

    let start = usize::from(bytes.first() == Some(&b'-'));
    let mut idx = bytes.len();
    loop {
        if idx == start {
            bytes.insert(start, b'1');
            break;
        }
        idx -= 1;
        match bytes[idx] {
            b'.' => continue,
            b'9' => bytes[idx] = b'0',
            d => {
                bytes[idx] = d + 1;
                break;
            }
        }
    }

    bytes.into_iter().map(char::from).collect()
}
