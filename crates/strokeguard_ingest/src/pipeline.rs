//! Decode-validate-replay pipeline.

use crate::config::IngestConfig;
use crate::error::{IngestError, IngestResult};
use serde::{Deserialize, Serialize};
use strokeguard_log::decode_text;
use strokeguard_policy::{HumanizationValidator, ValidationPolicy, ValidationReport, Verdict};
use strokeguard_replay::{NullSurface, RasterSurface, ReplayEngine};
use tracing::{debug, warn};

/// Wire form of an incoming blob
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlobFormat {
    /// Base64 text wrapping binary records
    #[default]
    Base64,
    /// Raw binary records
    Binary,
}

/// Borrowed incoming blob
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blob<'a> {
    /// Base64 transport text
    Base64(&'a str),
    /// Raw binary records
    Binary(&'a [u8]),
}

impl<'a> Blob<'a> {
    /// Wrap raw bytes as a blob of the given format.
    ///
    /// # Errors
    ///
    /// Returns error if `format` is base64 and `bytes` is not UTF-8
    pub fn from_bytes(bytes: &'a [u8], format: BlobFormat) -> IngestResult<Self> {
        match format {
            BlobFormat::Binary => Ok(Self::Binary(bytes)),
            BlobFormat::Base64 => std::str::from_utf8(bytes).map(Self::Base64).map_err(|e| {
                IngestError::Codec(strokeguard_log::CodecError::InvalidBase64 {
                    reason: e.to_string(),
                })
            }),
        }
    }

    /// Wire form
    #[must_use]
    pub const fn format(&self) -> BlobFormat {
        match self {
            Self::Base64(_) => BlobFormat::Base64,
            Self::Binary(_) => BlobFormat::Binary,
        }
    }

    /// Length in bytes
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::Base64(text) => text.len(),
            Self::Binary(bytes) => bytes.len(),
        }
    }

    /// Check if the blob is empty
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome of evaluating a well-formed blob
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestOutcome {
    /// Accept or reject
    pub verdict: Verdict,
    /// Full validation report
    pub report: ValidationReport,
}

impl IngestOutcome {
    /// Check if the log was accepted and replayed
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        self.verdict.is_accepted()
    }
}

/// Evaluate an untrusted blob and, if accepted, replay it onto `trusted`.
///
/// The blob is decoded into a scratch engine over a [`NullSurface`], whose
/// text export is validated against `policy`. Only an accepted log is
/// replayed, and it is the validated text that gets replayed. On rejection or
/// error the trusted engine is left exactly as it was.
///
/// # Errors
///
/// Returns [`IngestError::BlobTooLarge`] before decoding an oversized blob,
/// and [`IngestError::Codec`] if the blob does not decode
pub fn ingest_untrusted<S: RasterSurface>(
    blob: Blob<'_>,
    policy: &ValidationPolicy,
    config: &IngestConfig,
    trusted: &mut ReplayEngine<S>,
) -> IngestResult<IngestOutcome> {
    let format = blob.format();
    if blob.len() > config.max_blob_len {
        warn!(len = blob.len(), max = config.max_blob_len, ?format, "blob too large");
        return Err(IngestError::BlobTooLarge {
            len: blob.len(),
            max: config.max_blob_len,
        });
    }

    let text = decode_to_text(blob, config).inspect_err(|err| {
        warn!(error = %err, ?format, "blob failed to decode");
    })?;

    let report = HumanizationValidator::new(policy.clone()).validate_text(&text)?;
    let verdict = report.verdict();
    if let Verdict::Rejected(reason) = &verdict {
        warn!(%reason, ?format, "blob rejected");
        return Ok(IngestOutcome { verdict, report });
    }

    let log = decode_text(&text)?;
    trusted.replay(&log)?;
    debug!(commands = log.len(), ?format, "blob accepted");
    Ok(IngestOutcome { verdict, report })
}

fn decode_to_text(blob: Blob<'_>, config: &IngestConfig) -> IngestResult<String> {
    let mut scratch = ReplayEngine::new(NullSurface::new(), config.accuracy);
    match blob {
        Blob::Base64(text) => scratch.load_base64(text)?,
        Blob::Binary(bytes) => scratch.load_binary(bytes)?,
    }
    Ok(scratch.export_text()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use strokeguard_core::{Accuracy, StrokeCommand, StrokeLog};
    use strokeguard_log::{encode_binary, to_base64, CodecError};
    use strokeguard_policy::RejectionReason;
    use strokeguard_replay::{PaintOp, RecordingSurface, ReplayError};

    fn trusted() -> ReplayEngine<RecordingSurface> {
        let mut engine = ReplayEngine::new(RecordingSurface::new(100, 100), Accuracy::new(2));
        engine.set_color("blue").unwrap();
        engine.place_circle(5, 50.0, 50.0).unwrap();
        engine
    }

    fn drawing(color: &str, radius: u32) -> StrokeLog {
        vec![
            StrokeCommand::set_color(color),
            StrokeCommand::circle(radius, 10.0, 10.0),
            StrokeCommand::circle(radius, 12.0, 10.0),
        ]
        .into()
    }

    fn base64_of(log: &StrokeLog) -> String {
        to_base64(&encode_binary(log, Accuracy::new(2)).unwrap())
    }

    #[test]
    fn test_accepted_blob_replaces_trusted_drawing() {
        let log = drawing("black", 5);
        let blob = base64_of(&log);
        let mut engine = trusted();

        let outcome = ingest_untrusted(
            Blob::Base64(&blob),
            &ValidationPolicy::default(),
            &IngestConfig::default(),
            &mut engine,
        )
        .unwrap();

        assert!(outcome.is_accepted());
        assert_eq!(engine.export_log(), &log);
        assert_eq!(engine.color(), "black");
        assert_eq!(engine.surface().visible_circles().len(), 2);
    }

    #[test]
    fn test_binary_blob_accepted() {
        let log = drawing("red", 5);
        let bytes = encode_binary(&log, Accuracy::new(2)).unwrap();
        let mut engine = trusted();
        let outcome = ingest_untrusted(
            Blob::Binary(&bytes),
            &ValidationPolicy::default(),
            &IngestConfig::default(),
            &mut engine,
        )
        .unwrap();
        assert!(outcome.is_accepted());
        assert_eq!(engine.export_log(), &log);
    }

    #[test]
    fn test_rejected_blob_leaves_trusted_untouched() {
        let blob = base64_of(&drawing("#ff0000", 5));
        let mut engine = trusted();
        let before_log = engine.export_log().clone();
        let before_ops = engine.surface().ops().to_vec();

        let outcome = ingest_untrusted(
            Blob::Base64(&blob),
            &ValidationPolicy::new(1, false),
            &IngestConfig::default(),
            &mut engine,
        )
        .unwrap();

        assert_eq!(
            outcome.verdict,
            Verdict::Rejected(RejectionReason::ExactColorRejected {
                color: "#ff0000".to_string()
            })
        );
        assert_eq!(engine.export_log(), &before_log);
        assert_eq!(engine.surface().ops(), before_ops.as_slice());
    }

    #[test]
    fn test_thin_brush_rejected() {
        let blob = base64_of(&drawing("black", 1));
        let mut engine = trusted();
        let outcome = ingest_untrusted(
            Blob::Base64(&blob),
            &ValidationPolicy::new(5, false),
            &IngestConfig::default(),
            &mut engine,
        )
        .unwrap();
        assert!(matches!(
            outcome.verdict,
            Verdict::Rejected(RejectionReason::BrushTooSmall { radius: 1, minimum: 5 })
        ));
        assert_eq!(engine.len(), 2);
    }

    #[test]
    fn test_truncated_blob_is_codec_error() {
        let mut bytes = vec![0x01, 5, 10];
        bytes.extend_from_slice(b"1,2");
        let mut engine = trusted();
        let before_log = engine.export_log().clone();

        let err = ingest_untrusted(
            Blob::Binary(&bytes),
            &ValidationPolicy::default(),
            &IngestConfig::default(),
            &mut engine,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            IngestError::Codec(CodecError::TruncatedStream { needed: 10, available: 3, .. })
        ));
        assert_eq!(engine.export_log(), &before_log);
        assert_eq!(engine.surface().clear_count(), 0);
    }

    #[test]
    fn test_invalid_base64_is_codec_error() {
        let mut engine = trusted();
        let err = ingest_untrusted(
            Blob::Base64("not*base64"),
            &ValidationPolicy::default(),
            &IngestConfig::default(),
            &mut engine,
        )
        .unwrap_err();
        assert!(matches!(err, IngestError::Codec(CodecError::InvalidBase64 { .. })));
        assert_eq!(engine.len(), 2);
    }

    #[test]
    fn test_oversized_blob_refused() {
        let blob = base64_of(&drawing("black", 5));
        let mut engine = trusted();
        let err = ingest_untrusted(
            Blob::Base64(&blob),
            &ValidationPolicy::default(),
            &IngestConfig::default().with_max_blob_len(4),
            &mut engine,
        )
        .unwrap_err();
        assert_eq!(err, IngestError::BlobTooLarge { len: blob.len(), max: 4 });
    }

    #[test]
    fn test_unrepresentable_color_is_replay_error() {
        let bytes = [0x02, 3, b'a', b' ', b'b'];
        let mut engine = trusted();
        let err = ingest_untrusted(
            Blob::Binary(&bytes),
            &ValidationPolicy::default(),
            &IngestConfig::default(),
            &mut engine,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            IngestError::Replay(ReplayError::InvalidLog { index: 0, .. })
        ));
        assert_eq!(engine.len(), 2);
    }

    #[test]
    fn test_scratch_accuracy_rounds_before_validation() {
        let log: StrokeLog = vec![StrokeCommand::circle(5, 1.234, 5.678)].into();
        let bytes = encode_binary(&log, Accuracy::new(3)).unwrap();
        let mut engine = trusted();
        ingest_untrusted(
            Blob::Binary(&bytes),
            &ValidationPolicy::default(),
            &IngestConfig::new(Accuracy::new(1)),
            &mut engine,
        )
        .unwrap();
        assert_eq!(
            engine.surface().ops().last(),
            Some(&PaintOp::Circle {
                x: 1.2,
                y: 5.7,
                radius: 5,
                color: "blue".to_string()
            })
        );
    }

    #[test]
    fn test_blob_from_bytes() {
        assert_eq!(
            Blob::from_bytes(b"AQ==", BlobFormat::Base64).unwrap(),
            Blob::Base64("AQ==")
        );
        assert_eq!(Blob::from_bytes(&[1, 2], BlobFormat::Binary).unwrap().len(), 2);
        assert!(Blob::from_bytes(&[0xff], BlobFormat::Base64).is_err());
    }

    proptest::proptest! {
        #[test]
        fn prop_garbage_never_partially_applied(bytes in proptest::collection::vec(any::<u8>(), 0..128)) {
            let mut engine = trusted();
            let before = engine.export_log().clone();
            let result = ingest_untrusted(
                Blob::Binary(&bytes),
                &ValidationPolicy::default(),
                &IngestConfig::default(),
                &mut engine,
            );
            let accepted = matches!(&result, Ok(outcome) if outcome.is_accepted());
            if !accepted {
                prop_assert_eq!(engine.export_log(), &before);
            }
        }
    }
}
