//! Configuration error types for STROKEGUARD.

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while building configuration.
///
/// These are fatal at construction time: a surface is never built from a
/// configuration that failed to validate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Accuracy was not supplied
    #[error("accuracy is required")]
    MissingAccuracy,

    /// Accuracy is NaN or infinite
    #[error("accuracy must be finite, got {value}")]
    NonFiniteAccuracy {
        /// Raw value supplied
        value: f64,
    },

    /// Accuracy has a fractional part
    #[error("accuracy must be an integer, got {value}")]
    FractionalAccuracy {
        /// Raw value supplied
        value: f64,
    },

    /// Accuracy is below zero
    #[error("accuracy cannot be negative, got {value}")]
    NegativeAccuracy {
        /// Raw value supplied
        value: f64,
    },

    /// Canvas has a zero-sized dimension
    #[error("invalid canvas dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// Configuration document could not be parsed
    #[error("parse error: {message}")]
    Parse {
        /// Parser message
        message: String,
    },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            message: err.to_string(),
        }
    }
}
