//! STROKEGUARD Core Types
//!
//! This crate contains pure types and logic with no I/O: the stroke command
//! model, the validated accuracy setting, the fixed-point number formatter
//! shared by every encoding, and canvas configuration.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod command;
pub mod config;
pub mod error;
pub mod number;

// Re-exports
pub use command::{Point, StrokeCommand, StrokeLog};
pub use config::CanvasConfig;
pub use error::{ConfigError, ConfigResult};
pub use number::{format_fixed, Accuracy, MAX_ACCURACY};
