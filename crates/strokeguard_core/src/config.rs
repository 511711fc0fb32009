//! Canvas configuration.

use crate::error::{ConfigError, ConfigResult};
use crate::number::Accuracy;
use serde::{Deserialize, Serialize};

/// Configuration for a drawing surface and its replay engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCanvasConfig")]
pub struct CanvasConfig {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    /// Fractional digits used when logging coordinates
    pub accuracy: Accuracy,
    /// Initial brush radius
    pub brush_size: u32,
    /// Initial brush color
    pub default_color: String,
    /// Fill used when the surface is wiped
    pub background: String,
}

impl CanvasConfig {
    /// Create a configuration with default brush and colors
    #[must_use]
    pub fn new(width: u32, height: u32, accuracy: Accuracy) -> Self {
        Self {
            width,
            height,
            accuracy,
            brush_size: default_brush_size(),
            default_color: default_color(),
            background: default_background(),
        }
    }

    /// Set the initial brush radius
    #[must_use]
    pub fn with_brush_size(mut self, brush_size: u32) -> Self {
        self.brush_size = brush_size;
        self
    }

    /// Set the initial brush color
    #[must_use]
    pub fn with_default_color(mut self, color: impl Into<String>) -> Self {
        self.default_color = color.into();
        self
    }

    /// Set the wipe color
    #[must_use]
    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }

    /// Parse and validate a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns error if the document is malformed, the accuracy is missing or
    /// invalid, or a dimension is zero.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let raw: RawCanvasConfig = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    /// Check dimensions.
    ///
    /// # Errors
    ///
    /// Returns error if width or height is zero
    pub fn validate(&self) -> ConfigResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self::new(800, 600, Accuracy::default())
    }
}

/// Unvalidated form of [`CanvasConfig`] as it appears on disk
#[derive(Debug, Clone, Deserialize)]
struct RawCanvasConfig {
    #[serde(default = "default_width")]
    width: u32,
    #[serde(default = "default_height")]
    height: u32,
    accuracy: Option<f64>,
    #[serde(default = "default_brush_size")]
    brush_size: u32,
    #[serde(default = "default_color")]
    default_color: String,
    #[serde(default = "default_background")]
    background: String,
}

impl TryFrom<RawCanvasConfig> for CanvasConfig {
    type Error = ConfigError;

    fn try_from(raw: RawCanvasConfig) -> Result<Self, Self::Error> {
        let config = Self {
            width: raw.width,
            height: raw.height,
            accuracy: Accuracy::from_option(raw.accuracy)?,
            brush_size: raw.brush_size,
            default_color: raw.default_color,
            background: raw.background,
        };
        config.validate()?;
        Ok(config)
    }
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

fn default_brush_size() -> u32 {
    5
}

fn default_color() -> String {
    "black".to_string()
}

fn default_background() -> String {
    "#FFFFFF".to_string()
}
