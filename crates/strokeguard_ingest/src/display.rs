//! Trusted display: a replay engine guarded by a validation policy.

use crate::config::IngestConfig;
use crate::error::IngestResult;
use crate::pipeline::{ingest_untrusted, Blob, IngestOutcome};
use strokeguard_policy::ValidationPolicy;
use strokeguard_replay::{RasterSurface, ReplayEngine};

/// Surface that only ever shows validated logs.
///
/// The policy and limits are fixed at construction.
pub struct TrustedDisplay<S: RasterSurface> {
    engine: ReplayEngine<S>,
    policy: ValidationPolicy,
    config: IngestConfig,
}

impl<S: RasterSurface> TrustedDisplay<S> {
    /// Create a new trusted display
    #[must_use]
    pub fn new(engine: ReplayEngine<S>, policy: ValidationPolicy) -> Self {
        let config = IngestConfig::new(engine.accuracy());
        Self {
            engine,
            policy,
            config,
        }
    }

    /// Replace the ingestion limits
    #[must_use]
    pub fn with_config(mut self, config: IngestConfig) -> Self {
        self.config = config;
        self
    }

    /// The trusted engine
    #[must_use]
    pub fn engine(&self) -> &ReplayEngine<S> {
        &self.engine
    }

    /// The policy in force
    #[must_use]
    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// The ingestion limits
    #[must_use]
    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Evaluate `blob` and show it if accepted
    ///
    /// # Errors
    ///
    /// See [`ingest_untrusted`]
    pub fn ingest(&mut self, blob: Blob<'_>) -> IngestResult<IngestOutcome> {
        ingest_untrusted(blob, &self.policy, &self.config, &mut self.engine)
    }

    /// Evaluate base64 transport text
    ///
    /// # Errors
    ///
    /// See [`ingest_untrusted`]
    pub fn load_base64(&mut self, text: &str) -> IngestResult<IngestOutcome> {
        self.ingest(Blob::Base64(text))
    }

    /// Evaluate raw binary records
    ///
    /// # Errors
    ///
    /// See [`ingest_untrusted`]
    pub fn load_binary(&mut self, bytes: &[u8]) -> IngestResult<IngestOutcome> {
        self.ingest(Blob::Binary(bytes))
    }

    /// Wipe the display
    pub fn clear(&mut self) {
        self.engine.clear();
    }
}
