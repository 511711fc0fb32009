//! Stroke commands and the ordered log that replays them.

use serde::{Deserialize, Serialize};

/// A position on the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal surface coordinate
    pub x: f64,
    /// Vertical surface coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Point at fraction `t` of the way from `self` to `other`
    #[must_use]
    pub fn lerp(self, other: Point, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Whether both coordinates are finite
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A single replayable drawing command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StrokeCommand {
    /// Change the color used by every following circle.
    ///
    /// The token is carried verbatim; whether it is acceptable is a policy
    /// decision.
    SetColor {
        /// Color token (named color, `#rrggbb[aa]`, `rgb(...)`)
        color: String,
    },
    /// Paint a filled circle
    Circle {
        /// Radius in surface units
        radius: u32,
        /// Center x
        x: f64,
        /// Center y
        y: f64,
    },
}

impl StrokeCommand {
    /// Create a color change
    #[must_use]
    pub fn set_color(color: impl Into<String>) -> Self {
        Self::SetColor {
            color: color.into(),
        }
    }

    /// Create a circle placement
    #[must_use]
    pub const fn circle(radius: u32, x: f64, y: f64) -> Self {
        Self::Circle { radius, x, y }
    }

    /// Check if this is a color change
    #[must_use]
    pub const fn is_set_color(&self) -> bool {
        matches!(self, Self::SetColor { .. })
    }

    /// Check if this is a circle placement
    #[must_use]
    pub const fn is_circle(&self) -> bool {
        matches!(self, Self::Circle { .. })
    }

    /// Circle center, if this is a circle
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match self {
            Self::Circle { x, y, .. } => Some(Point::new(*x, *y)),
            Self::SetColor { .. } => None,
        }
    }
}

/// Ordered sequence of stroke commands.
///
/// Order is significant: a color change applies to every circle after it
/// until the next color change.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrokeLog {
    commands: Vec<StrokeCommand>,
}

impl StrokeLog {
    /// Create an empty log
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Append a command
    pub fn push(&mut self, command: StrokeCommand) {
        self.commands.push(command);
    }

    /// Remove every command
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Commands in replay order
    #[must_use]
    pub fn commands(&self) -> &[StrokeCommand] {
        &self.commands
    }

    /// Iterate commands in replay order
    pub fn iter(&self) -> std::slice::Iter<'_, StrokeCommand> {
        self.commands.iter()
    }

    /// Number of commands
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the log is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of color changes
    #[must_use]
    pub fn set_color_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_set_color()).count()
    }

    /// Number of circle placements
    #[must_use]
    pub fn circle_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_circle()).count()
    }

    /// Consume into the underlying commands
    #[must_use]
    pub fn into_commands(self) -> Vec<StrokeCommand> {
        self.commands
    }
}

impl From<Vec<StrokeCommand>> for StrokeLog {
    fn from(commands: Vec<StrokeCommand>) -> Self {
        Self { commands }
    }
}

impl FromIterator<StrokeCommand> for StrokeLog {
    fn from_iter<I: IntoIterator<Item = StrokeCommand>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a StrokeLog {
    type Item = &'a StrokeCommand;
    type IntoIter = std::slice::Iter<'a, StrokeCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

impl IntoIterator for StrokeLog {
    type Item = StrokeCommand;
    type IntoIter = std::vec::IntoIter<StrokeCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}
