//! Raster surface capability.
//!
//! Pixel rasterization lives outside this workspace; the engine only needs a
//! target that can fill a circle and wipe itself.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// A 2D target the engine paints onto
pub trait RasterSurface {
    /// Fill a circle of `radius` centered at `(x, y)` with `color`
    fn fill_circle(&mut self, x: f64, y: f64, radius: u32, color: &str);

    /// Fill the whole surface with `background`
    fn clear(&mut self, background: &str);
}

impl<T: RasterSurface + ?Sized> RasterSurface for Box<T> {
    fn fill_circle(&mut self, x: f64, y: f64, radius: u32, color: &str) {
        (**self).fill_circle(x, y, radius, color);
    }

    fn clear(&mut self, background: &str) {
        (**self).clear(background);
    }
}

impl<T: RasterSurface + ?Sized> RasterSurface for &mut T {
    fn fill_circle(&mut self, x: f64, y: f64, radius: u32, color: &str) {
        (**self).fill_circle(x, y, radius, color);
    }

    fn clear(&mut self, background: &str) {
        (**self).clear(background);
    }
}

/// Shared handle, for a display that is also read elsewhere on the same thread
impl<T: RasterSurface> RasterSurface for Rc<RefCell<T>> {
    fn fill_circle(&mut self, x: f64, y: f64, radius: u32, color: &str) {
        self.borrow_mut().fill_circle(x, y, radius, color);
    }

    fn clear(&mut self, background: &str) {
        self.borrow_mut().clear(background);
    }
}

/// A paint call received by a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PaintOp {
    /// A filled circle
    Circle {
        /// Center x
        x: f64,
        /// Center y
        y: f64,
        /// Radius
        radius: u32,
        /// Fill color
        color: String,
    },
    /// A full wipe
    Clear {
        /// Fill color
        background: String,
    },
}

/// Surface that records every paint call in order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    ops: Vec<PaintOp>,
}

impl RecordingSurface {
    /// Create a new recording surface
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    /// Surface size
    #[must_use]
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Every recorded call
    #[must_use]
    pub fn ops(&self) -> &[PaintOp] {
        &self.ops
    }

    /// Number of circles painted
    #[must_use]
    pub fn paint_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, PaintOp::Circle { .. }))
            .count()
    }

    /// Number of wipes
    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, PaintOp::Clear { .. }))
            .count()
    }

    /// Circles painted since the most recent wipe
    #[must_use]
    pub fn visible_circles(&self) -> Vec<&PaintOp> {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, PaintOp::Clear { .. }))
            .map_or(0, |i| i + 1);
        self.ops[start..].iter().collect()
    }

    /// Forget recorded calls
    pub fn reset(&mut self) {
        self.ops.clear();
    }
}

impl RasterSurface for RecordingSurface {
    fn fill_circle(&mut self, x: f64, y: f64, radius: u32, color: &str) {
        self.ops.push(PaintOp::Circle {
            x,
            y,
            radius,
            color: color.to_string(),
        });
    }

    fn clear(&mut self, background: &str) {
        self.ops.push(PaintOp::Clear {
            background: background.to_string(),
        });
    }
}

/// Throwaway surface that only counts calls.
///
/// Used as the scratch target when decoding untrusted logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NullSurface {
    paints: usize,
    clears: usize,
}

impl NullSurface {
    /// Create a new null surface
    #[must_use]
    pub const fn new() -> Self {
        Self { paints: 0, clears: 0 }
    }

    /// Circles received
    #[must_use]
    pub const fn paint_count(&self) -> usize {
        self.paints
    }

    /// Wipes received
    #[must_use]
    pub const fn clear_count(&self) -> usize {
        self.clears
    }
}

impl RasterSurface for NullSurface {
    fn fill_circle(&mut self, _x: f64, _y: f64, _radius: u32, _color: &str) {
        self.paints += 1;
    }

    fn clear(&mut self, _background: &str) {
        self.clears += 1;
    }
}
