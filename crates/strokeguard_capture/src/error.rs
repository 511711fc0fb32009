//! Capture errors.

use strokeguard_replay::ReplayError;
use thiserror::Error;

/// Capture result type
pub type CaptureResult<T> = Result<T, CaptureError>;

/// Reasons a pointer event could not be applied
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// The engine refused a placement
    #[error(transparent)]
    Replay(#[from] ReplayError),

    /// A single move would need more interpolation steps than allowed
    #[error("move needs {steps} interpolation steps, limit is {max}")]
    MoveTooLong {
        /// Steps the move would need, saturated at `u64::MAX`
        steps: u64,
        /// Configured limit
        max: usize,
    },
}
