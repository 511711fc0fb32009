//! Subcommand bodies, kept free of terminal I/O.

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use std::path::Path;
use strokeguard_core::Accuracy;
use strokeguard_ingest::{Blob, BlobFormat, IngestConfig, IngestOutcome, TrustedDisplay};
use strokeguard_log::{
    decode_binary, decode_text, encode as encode_log, encode_text, from_base64, ExportFormat,
};
use strokeguard_policy::{LogStats, ValidationPolicy};
use strokeguard_replay::{NullSurface, ReplayEngine};
use tracing::info;

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).wrap_err_with(|| format!("reading {}", path.display()))
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).wrap_err_with(|| format!("reading {}", path.display()))
}

/// Text log file to blob bytes
pub fn encode(input: &Path, format: ExportFormat, accuracy: f64) -> Result<Vec<u8>> {
    let accuracy = Accuracy::from_f64(accuracy)?;
    let log = decode_text(&read_text(input)?)?;
    let exported = encode_log(&log, accuracy, format)?;
    info!(commands = log.len(), %format, "encoded log");
    Ok(exported.into_bytes())
}

/// Blob file to text log
pub fn decode(input: &Path, format: BlobFormat, accuracy: f64) -> Result<String> {
    let accuracy = Accuracy::from_f64(accuracy)?;
    let bytes = read_bytes(input)?;
    let log = match Blob::from_bytes(&bytes, format)? {
        Blob::Base64(text) => decode_binary(&from_base64(text)?)?,
        Blob::Binary(bytes) => decode_binary(bytes)?,
    };
    info!(commands = log.len(), "decoded blob");
    Ok(encode_text(&log, accuracy)?)
}

/// Run a blob file through the untrusted pipeline
pub fn verify(
    input: &Path,
    format: BlobFormat,
    policy: Option<&Path>,
    accuracy: f64,
) -> Result<IngestOutcome> {
    let accuracy = Accuracy::from_f64(accuracy)?;
    let policy = match policy {
        Some(path) => ValidationPolicy::from_json(&read_text(path)?)?,
        None => ValidationPolicy::default(),
    };
    let bytes = read_bytes(input)?;

    let mut trusted = TrustedDisplay::new(ReplayEngine::new(NullSurface::new(), accuracy), policy)
        .with_config(IngestConfig::new(accuracy));
    let outcome = trusted.ingest(Blob::from_bytes(&bytes, format)?)?;
    let replayed = trusted.engine().len();
    info!(accepted = outcome.is_accepted(), replayed, "verification finished");
    Ok(outcome)
}

/// Statistics for a text log file
pub fn stats(input: &Path) -> Result<LogStats> {
    let log = decode_text(&read_text(input)?)?;
    Ok(LogStats::compute(&log))
}
