//! Mutable engine state: the brush and the dedup point.

use serde::{Deserialize, Serialize};
use strokeguard_core::Point;

/// Current brush
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrushState {
    /// Radius used by live placements
    pub radius: u32,
    /// Color of every following circle
    pub color: String,
}

impl BrushState {
    /// Create a new brush
    #[must_use]
    pub fn new(radius: u32, color: impl Into<String>) -> Self {
        Self {
            radius,
            color: color.into(),
        }
    }
}

/// Last logged circle position within the current stroke.
///
/// A circle is logged only when its position differs from this point.
/// Positions are compared by exact coordinate inequality; coordinates that
/// differ by less than the log accuracy still count as distinct.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DedupState {
    last: Option<Point>,
}

impl DedupState {
    /// Create an empty dedup state
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Forget the last point
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Last logged point
    #[must_use]
    pub const fn last(&self) -> Option<Point> {
        self.last
    }

    /// Whether `point` would be logged
    #[must_use]
    pub fn is_new(&self, point: Point) -> bool {
        match self.last {
            Some(last) => last.x != point.x || last.y != point.y,
            None => true,
        }
    }

    /// Record `point` if new; returns whether it should be logged
    pub fn observe(&mut self, point: Point) -> bool {
        if self.is_new(point) {
            self.last = Some(point);
            true
        } else {
            false
        }
    }
}
