//! STROKEGUARD Capture Orchestrator
//!
//! Turns surface-local pointer events into circle placements on a
//! [`ReplayEngine`](strokeguard_replay::ReplayEngine), filling the gap between
//! consecutive samples so that a stroke stays continuous.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod event;
pub mod orchestrator;

pub use error::{CaptureError, CaptureResult};
pub use event::{InputSource, PointerEvent};
pub use orchestrator::{interpolate, CaptureOrchestrator, MAX_INTERPOLATION_STEPS, MAX_SAMPLE_SPACING};
