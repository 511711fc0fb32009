//! Replay engine: paints circles, keeps the brush and records the log.

use crate::state::{BrushState, DedupState};
use crate::surface::RasterSurface;
use strokeguard_core::{Accuracy, CanvasConfig, Point, StrokeCommand, StrokeLog};
use strokeguard_log::{
    check_color, check_radius, decode_binary, decode_text, encode, encode_binary, encode_text,
    from_base64, to_base64, CodecError, ExportFormat, Exported,
};
use tracing::{debug, trace};

/// Replay result type
pub type ReplayResult<T> = Result<T, ReplayError>;

/// Replay engine error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    /// A command or export could not be represented
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A log handed to `replay` contains an unrepresentable command
    #[error("invalid command at index {index}: {source}")]
    InvalidLog {
        /// Position of the command in the log
        index: usize,
        /// What was wrong with it
        source: CodecError,
    },
}

/// Replay engine over a raster surface.
///
/// Every live paint also goes to the optional mirror surface, which is how a
/// private working surface is kept in sync with a public display.
pub struct ReplayEngine<S: RasterSurface> {
    surface: S,
    mirror: Option<Box<dyn RasterSurface>>,
    brush: BrushState,
    background: String,
    accuracy: Accuracy,
    log: StrokeLog,
    dedup: DedupState,
}

impl<S: RasterSurface> ReplayEngine<S> {
    /// Create an engine with the default brush and background
    #[must_use]
    pub fn new(surface: S, accuracy: Accuracy) -> Self {
        let defaults = CanvasConfig::default();
        Self {
            surface,
            mirror: None,
            brush: BrushState::new(defaults.brush_size, defaults.default_color),
            background: defaults.background,
            accuracy,
            log: StrokeLog::new(),
            dedup: DedupState::new(),
        }
    }

    /// Create an engine from canvas configuration
    #[must_use]
    pub fn from_config(surface: S, config: &CanvasConfig) -> Self {
        Self {
            surface,
            mirror: None,
            brush: BrushState::new(config.brush_size, config.default_color.clone()),
            background: config.background.clone(),
            accuracy: config.accuracy,
            log: StrokeLog::new(),
            dedup: DedupState::new(),
        }
    }

    /// Attach a mirror surface
    #[must_use]
    pub fn with_mirror(mut self, mirror: Box<dyn RasterSurface>) -> Self {
        self.mirror = Some(mirror);
        self
    }

    /// Borrow the owned surface
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Current brush radius
    #[must_use]
    pub fn brush_size(&self) -> u32 {
        self.brush.radius
    }

    /// Current brush color
    #[must_use]
    pub fn color(&self) -> &str {
        &self.brush.color
    }

    /// Accuracy used by the exports
    #[must_use]
    pub fn accuracy(&self) -> Accuracy {
        self.accuracy
    }

    /// Change the brush color and log it.
    ///
    /// Color changes are never deduplicated.
    ///
    /// # Errors
    ///
    /// Returns error if the color cannot be carried by the log; the brush is
    /// left unchanged
    pub fn set_color(&mut self, color: impl Into<String>) -> ReplayResult<()> {
        let color = color.into();
        check_color(&color)?;
        self.log.push(StrokeCommand::set_color(color.clone()));
        self.brush.color = color;
        Ok(())
    }

    /// Change the brush radius used by [`place_at_brush`](Self::place_at_brush)
    pub fn set_brush_size(&mut self, radius: u32) {
        self.brush.radius = radius;
    }

    /// Start a new stroke: the next placement is always logged
    pub fn reset_stroke_boundary(&mut self) {
        self.dedup.reset();
    }

    /// Paint a circle and log it unless it repeats the last logged position.
    ///
    /// Returns whether a command was appended to the log.
    ///
    /// # Errors
    ///
    /// Returns error if `radius > 255` or a coordinate is not finite; nothing
    /// is painted or logged in that case
    pub fn place_circle(&mut self, radius: u32, x: f64, y: f64) -> ReplayResult<bool> {
        check_radius(radius)?;
        let point = Point::new(x, y);
        if !point.is_finite() {
            return Err(CodecError::InvalidPosition {
                text: format!("{},{}", x, y),
            }
            .into());
        }

        self.surface.fill_circle(x, y, radius, &self.brush.color);
        if let Some(mirror) = self.mirror.as_mut() {
            mirror.fill_circle(x, y, radius, &self.brush.color);
        }

        if self.dedup.observe(point) {
            self.log.push(StrokeCommand::circle(radius, x, y));
            Ok(true)
        } else {
            trace!(x, y, "duplicate position not logged");
            Ok(false)
        }
    }

    /// Place a circle using the current brush radius
    ///
    /// # Errors
    ///
    /// As [`place_circle`](Self::place_circle)
    pub fn place_at_brush(&mut self, x: f64, y: f64) -> ReplayResult<bool> {
        self.place_circle(self.brush.radius, x, y)
    }

    /// Wipe the surface, empty the log and reset the dedup point
    pub fn clear(&mut self) {
        self.surface.clear(&self.background);
        if let Some(mirror) = self.mirror.as_mut() {
            mirror.clear(&self.background);
        }
        self.log.clear();
        self.dedup.reset();
        debug!("surface cleared");
    }

    /// Clear, then apply every command of `log` in order.
    ///
    /// The whole log is checked before anything is touched, so a rejected log
    /// leaves the surface and the recorded log as they were.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::InvalidLog`] naming the first bad command
    pub fn replay(&mut self, log: &StrokeLog) -> ReplayResult<()> {
        for (index, command) in log.iter().enumerate() {
            check_command(command).map_err(|source| ReplayError::InvalidLog { index, source })?;
        }

        self.clear();
        for command in log {
            match command {
                StrokeCommand::SetColor { color } => self.set_color(color.as_str())?,
                StrokeCommand::Circle { radius, x, y } => {
                    self.place_circle(*radius, *x, *y)?;
                }
            }
        }

        debug!(
            commands = log.len(),
            logged = self.log.len(),
            "replay finished"
        );
        Ok(())
    }

    /// Decode a text log and replay it
    ///
    /// # Errors
    ///
    /// Returns error if the text does not decode or the log is invalid
    pub fn load_text(&mut self, text: &str) -> ReplayResult<()> {
        let log = decode_text(text)?;
        self.replay(&log)
    }

    /// Decode a binary log and replay it
    ///
    /// # Errors
    ///
    /// Returns error if the bytes do not decode or the log is invalid
    pub fn load_binary(&mut self, bytes: &[u8]) -> ReplayResult<()> {
        let log = decode_binary(bytes)?;
        self.replay(&log)
    }

    /// Decode a base64 binary log and replay it
    ///
    /// # Errors
    ///
    /// Returns error if the text is not base64, the bytes do not decode, or
    /// the log is invalid
    pub fn load_base64(&mut self, text: &str) -> ReplayResult<()> {
        let bytes = from_base64(text)?;
        self.load_binary(&bytes)
    }

    /// The recorded log
    #[must_use]
    pub fn export_log(&self) -> &StrokeLog {
        &self.log
    }

    /// The recorded log as text
    ///
    /// # Errors
    ///
    /// Returns error if a command cannot be represented
    pub fn export_text(&self) -> ReplayResult<String> {
        Ok(encode_text(&self.log, self.accuracy)?)
    }

    /// The recorded log as binary records
    ///
    /// # Errors
    ///
    /// Returns error if a command cannot be represented
    pub fn export_binary(&self) -> ReplayResult<Vec<u8>> {
        Ok(encode_binary(&self.log, self.accuracy)?)
    }

    /// The recorded log as base64 transport text
    ///
    /// # Errors
    ///
    /// Returns error if a command cannot be represented
    pub fn export_base64(&self) -> ReplayResult<String> {
        Ok(to_base64(&self.export_binary()?))
    }

    /// The recorded log in the requested format
    ///
    /// # Errors
    ///
    /// Returns error if a command cannot be represented
    pub fn export(&self, format: ExportFormat) -> ReplayResult<Exported> {
        Ok(encode(&self.log, self.accuracy, format)?)
    }

    /// Number of logged commands
    #[must_use]
    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// Check if nothing has been logged
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }
}

fn check_command(command: &StrokeCommand) -> Result<(), CodecError> {
    match command {
        StrokeCommand::SetColor { color } => check_color(color),
        StrokeCommand::Circle { radius, x, y } => {
            check_radius(*radius)?;
            if !x.is_finite() || !y.is_finite() {
                return Err(CodecError::InvalidPosition {
                    text: format!("{},{}", x, y),
                });
            }
            Ok(())
        }
    }
}
