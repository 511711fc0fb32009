//! Export format selection.

use crate::binary::encode_binary;
use crate::error::CodecResult;
use crate::text::encode_text;
use crate::transport::to_base64;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use strokeguard_core::{Accuracy, StrokeLog};

/// Wire form requested by a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Base64 of the binary form
    #[default]
    Base64,
    /// Raw binary records
    Binary,
    /// Line-oriented text log
    Text,
}

impl ExportFormat {
    /// Parse a format name.
    ///
    /// Names are trimmed and case-insensitive. `log`, `raw` and `text` all
    /// select [`ExportFormat::Text`], which is also the fallback for unknown
    /// names.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "base64" => Self::Base64,
            "binary" => Self::Binary,
            _ => Self::Text,
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base64 => write!(f, "base64"),
            Self::Binary => write!(f, "binary"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// An encoded stroke log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exported {
    /// Base64 transport text
    Base64(String),
    /// Binary records
    Binary(Vec<u8>),
    /// Text log
    Text(String),
}

impl Exported {
    /// Format this export was produced in
    #[must_use]
    pub const fn format(&self) -> ExportFormat {
        match self {
            Self::Base64(_) => ExportFormat::Base64,
            Self::Binary(_) => ExportFormat::Binary,
            Self::Text(_) => ExportFormat::Text,
        }
    }

    /// Raw bytes of the export
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Base64(s) | Self::Text(s) => s.into_bytes(),
            Self::Binary(b) => b,
        }
    }
}

/// Encode a log in the requested format.
///
/// # Errors
///
/// Returns error if any command cannot be represented
pub fn encode(log: &StrokeLog, accuracy: Accuracy, format: ExportFormat) -> CodecResult<Exported> {
    Ok(match format {
        ExportFormat::Base64 => Exported::Base64(to_base64(&encode_binary(log, accuracy)?)),
        ExportFormat::Binary => Exported::Binary(encode_binary(log, accuracy)?),
        ExportFormat::Text => Exported::Text(encode_text(log, accuracy)?),
    })
}
