//! STROKEGUARD Ingestion
//!
//! Decode-validate-replay pipeline for stroke logs received from untrusted
//! parties. A blob is decoded into a scratch engine, validated as text, and
//! only then replayed onto the trusted engine. The trusted surface is never
//! touched by a blob that fails to decode or is rejected.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod display;
pub mod error;
pub mod pipeline;

pub use config::{IngestConfig, DEFAULT_MAX_BLOB_LEN};
pub use display::TrustedDisplay;
pub use error::{IngestError, IngestResult};
pub use pipeline::{ingest_untrusted, Blob, BlobFormat, IngestOutcome};
