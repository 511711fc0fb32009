//! Ingestion limits.

use serde::{Deserialize, Serialize};
use strokeguard_core::{Accuracy, ConfigError};

/// Default upper bound on an incoming blob, in bytes
pub const DEFAULT_MAX_BLOB_LEN: usize = 1024 * 1024;

/// Configuration for untrusted ingestion.
///
/// When read from JSON the accuracy is required; only `maxBlobLen` has a
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawIngestConfig")]
pub struct IngestConfig {
    /// Digits used when the scratch engine exports text for validation
    pub accuracy: Accuracy,
    /// Blobs longer than this are refused before decoding
    pub max_blob_len: usize,
}

impl IngestConfig {
    /// Create a new config
    #[must_use]
    pub const fn new(accuracy: Accuracy) -> Self {
        Self {
            accuracy,
            max_blob_len: DEFAULT_MAX_BLOB_LEN,
        }
    }

    /// Set the blob size limit
    #[must_use]
    pub const fn with_max_blob_len(mut self, max_blob_len: usize) -> Self {
        self.max_blob_len = max_blob_len;
        self
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self::new(Accuracy::default())
    }
}

/// Unvalidated form of [`IngestConfig`] as it appears on disk
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawIngestConfig {
    accuracy: Option<f64>,
    #[serde(default = "default_max_blob_len")]
    max_blob_len: usize,
}

fn default_max_blob_len() -> usize {
    DEFAULT_MAX_BLOB_LEN
}

impl TryFrom<RawIngestConfig> for IngestConfig {
    type Error = ConfigError;

    fn try_from(raw: RawIngestConfig) -> Result<Self, Self::Error> {
        Ok(Self::new(Accuracy::from_option(raw.accuracy)?).with_max_blob_len(raw.max_blob_len))
    }
}
