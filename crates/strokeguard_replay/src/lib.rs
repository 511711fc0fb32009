//! STROKEGUARD Replay Engine
//!
//! Owns a raster surface plus the current brush, paints circles onto it and
//! records the stroke log as a side effect. The same engine reconstructs a
//! drawing from a decoded log.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine;
pub mod state;
pub mod surface;

pub use engine::{ReplayEngine, ReplayError, ReplayResult};
pub use state::{BrushState, DedupState};
pub use surface::{NullSurface, PaintOp, RasterSurface, RecordingSurface};
