//! Ingestion errors.
//!
//! A rejected log is not an error; see [`IngestOutcome`](crate::IngestOutcome).

use strokeguard_log::CodecError;
use strokeguard_replay::ReplayError;
use thiserror::Error;

/// Ingestion result type
pub type IngestResult<T> = Result<T, IngestError>;

/// Reasons a blob could not be evaluated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    /// Blob exceeds the configured size limit
    #[error("blob of {len} bytes exceeds limit of {max}")]
    BlobTooLarge {
        /// Blob length
        len: usize,
        /// Configured limit
        max: usize,
    },

    /// Blob is not a well-formed stroke log
    #[error("malformed blob: {0}")]
    Codec(#[from] CodecError),

    /// Decoded log could not be applied
    #[error("replay failed: {0}")]
    Replay(ReplayError),
}

impl From<ReplayError> for IngestError {
    fn from(err: ReplayError) -> Self {
        match err {
            ReplayError::Codec(codec) => Self::Codec(codec),
            other => Self::Replay(other),
        }
    }
}
