//! Pointer-to-engine orchestration.
//!
//! A stroke runs from `Down` to the next `Up`, `Leave` or `Cancel`. Moves
//! outside a stroke are ignored. Each move inside a stroke places circles
//! from the previous sample to the new one, no more than
//! [`MAX_SAMPLE_SPACING`] units apart.

use crate::error::{CaptureError, CaptureResult};
use crate::event::{InputSource, PointerEvent};
use strokeguard_core::Point;
use strokeguard_replay::{RasterSurface, ReplayEngine};
use tracing::{debug, trace};

/// Largest gap between two interpolated circle centers
pub const MAX_SAMPLE_SPACING: f64 = 2.0;

/// Most interpolation steps a single move may take
pub const MAX_INTERPOLATION_STEPS: usize = 1 << 16;

/// Evenly spaced points from `from` to `to`, both endpoints included.
///
/// Uses `ceil(distance / 2)` steps. When the two points coincide the only
/// point produced is `to`. A non-finite distance also yields only `to`, which
/// the engine then refuses.
///
/// # Errors
///
/// Returns [`CaptureError::MoveTooLong`] if the move needs more than
/// [`MAX_INTERPOLATION_STEPS`] steps
pub fn interpolate(from: Point, to: Point) -> CaptureResult<impl Iterator<Item = Point>> {
    let distance = from.distance_to(to);
    let steps = if distance.is_finite() {
        (distance / MAX_SAMPLE_SPACING).ceil()
    } else {
        0.0
    };
    if steps > MAX_INTERPOLATION_STEPS as f64 {
        return Err(CaptureError::MoveTooLong {
            steps: steps as u64,
            max: MAX_INTERPOLATION_STEPS,
        });
    }
    let steps = steps as usize;

    Ok((0..=steps).map(move |i| {
        if i == steps {
            to
        } else {
            from.lerp(to, i as f64 / steps as f64)
        }
    }))
}

/// Drives a [`ReplayEngine`] from pointer events
pub struct CaptureOrchestrator<S: RasterSurface> {
    engine: ReplayEngine<S>,
    last: Option<Point>,
}

impl<S: RasterSurface> CaptureOrchestrator<S> {
    /// Create a new orchestrator around `engine`
    #[must_use]
    pub fn new(engine: ReplayEngine<S>) -> Self {
        Self { engine, last: None }
    }

    /// Borrow the engine
    #[must_use]
    pub fn engine(&self) -> &ReplayEngine<S> {
        &self.engine
    }

    /// Mutably borrow the engine (brush controls, exports)
    pub fn engine_mut(&mut self) -> &mut ReplayEngine<S> {
        &mut self.engine
    }

    /// Release the engine
    #[must_use]
    pub fn into_engine(self) -> ReplayEngine<S> {
        self.engine
    }

    /// Check if a stroke is in progress
    #[must_use]
    pub const fn is_drawing(&self) -> bool {
        self.last.is_some()
    }

    /// Begin a stroke at `(x, y)` and place its first circle
    ///
    /// # Errors
    ///
    /// Returns error if the engine refuses the placement
    pub fn on_stroke_start(&mut self, x: f64, y: f64) -> CaptureResult<()> {
        let point = Point::new(x, y);
        self.engine.reset_stroke_boundary();
        self.engine.place_at_brush(point.x, point.y)?;
        self.last = Some(point);
        trace!(x, y, "stroke started");
        Ok(())
    }

    /// Extend the current stroke to `(x, y)`; ignored when not drawing
    ///
    /// # Errors
    ///
    /// Returns error if the engine refuses a placement
    pub fn on_stroke_move(&mut self, x: f64, y: f64) -> CaptureResult<()> {
        let Some(last) = self.last else {
            return Ok(());
        };
        let point = Point::new(x, y);
        for sample in interpolate(last, point)? {
            self.engine.place_at_brush(sample.x, sample.y)?;
        }
        self.last = Some(point);
        Ok(())
    }

    /// Finish the current stroke
    pub fn on_stroke_end(&mut self) {
        if self.last.take().is_some() {
            trace!("stroke ended");
        }
    }

    /// Dispatch one event
    ///
    /// # Errors
    ///
    /// Returns error if the engine refuses a placement
    pub fn handle(&mut self, event: PointerEvent) -> CaptureResult<()> {
        match event {
            PointerEvent::Down { x, y } => self.on_stroke_start(x, y),
            PointerEvent::Move { x, y } => self.on_stroke_move(x, y),
            PointerEvent::Up | PointerEvent::Leave | PointerEvent::Cancel => {
                self.on_stroke_end();
                Ok(())
            }
        }
    }

    /// Pump every event from `source`, returning how many were handled
    ///
    /// # Errors
    ///
    /// Stops at the first event the engine refuses
    pub fn drive(&mut self, source: &mut impl InputSource) -> CaptureResult<usize> {
        let mut handled = 0;
        while let Some(event) = source.next_event() {
            self.handle(event)?;
            handled += 1;
        }
        debug!(events = handled, logged = self.engine.len(), "input drained");
        Ok(handled)
    }

    /// Wipe the engine and forget the last sample
    pub fn clear(&mut self) {
        self.engine.clear();
        self.last = None;
    }
}
