//! STROKEGUARD CLI
//!
//! Encode, decode, verify and inspect stroke logs from the command line.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::Result;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use strokeguard_ingest::BlobFormat;
use strokeguard_log::ExportFormat;
use tracing_subscriber::EnvFilter;

/// Exit status of `verify` when the log is rejected
const EXIT_REJECTED: u8 = 2;

#[derive(Parser)]
#[command(name = "strokeguard")]
#[command(about = "STROKEGUARD - stroke log codec and humanization validator", long_about = None)]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Wire form of a blob
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum WireFormat {
    /// Base64 transport text
    Base64,
    /// Raw binary records
    Binary,
}

impl From<WireFormat> for BlobFormat {
    fn from(format: WireFormat) -> Self {
        match format {
            WireFormat::Base64 => Self::Base64,
            WireFormat::Binary => Self::Binary,
        }
    }
}

impl From<WireFormat> for ExportFormat {
    fn from(format: WireFormat) -> Self {
        match format {
            WireFormat::Base64 => Self::Base64,
            WireFormat::Binary => Self::Binary,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a text log as a binary or base64 blob
    Encode {
        /// Text log
        #[arg(short, long)]
        input: PathBuf,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Blob format
        #[arg(short, long, value_enum, default_value_t = WireFormat::Base64)]
        format: WireFormat,
        /// Fractional digits for coordinates
        #[arg(short, long, default_value_t = 2.0)]
        accuracy: f64,
    },
    /// Decode a blob into a text log
    Decode {
        /// Blob file
        #[arg(short, long)]
        input: PathBuf,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Blob format
        #[arg(short, long, value_enum, default_value_t = WireFormat::Base64)]
        format: WireFormat,
        /// Fractional digits for coordinates
        #[arg(short, long, default_value_t = 2.0)]
        accuracy: f64,
    },
    /// Run an untrusted blob through the validator
    Verify {
        /// Blob file
        #[arg(short, long)]
        input: PathBuf,
        /// Blob format
        #[arg(short, long, value_enum, default_value_t = WireFormat::Base64)]
        format: WireFormat,
        /// Validation policy (JSON)
        #[arg(short, long)]
        policy: Option<PathBuf>,
        /// Fractional digits for coordinates
        #[arg(short, long, default_value_t = 2.0)]
        accuracy: f64,
    },
    /// Print statistics for a text log
    Stats {
        /// Text log
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("strokeguard=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn emit(output: Option<PathBuf>, bytes: &[u8]) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, bytes)?,
        None => std::io::stdout().write_all(bytes)?,
    }
    Ok(())
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.json);

    match cli.command {
        Commands::Encode {
            input,
            output,
            format,
            accuracy,
        } => {
            let bytes = commands::encode(&input, format.into(), accuracy)?;
            emit(output, &bytes)?;
        }
        Commands::Decode {
            input,
            output,
            format,
            accuracy,
        } => {
            let text = commands::decode(&input, format.into(), accuracy)?;
            emit(output, text.as_bytes())?;
        }
        Commands::Verify {
            input,
            format,
            policy,
            accuracy,
        } => {
            let outcome = commands::verify(&input, format.into(), policy.as_deref(), accuracy)?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            eprintln!("{}", outcome.report.summary());
            if !outcome.is_accepted() {
                return Ok(ExitCode::from(EXIT_REJECTED));
            }
        }
        Commands::Stats { input } => {
            let stats = commands::stats(&input)?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(ExitCode::SUCCESS)
}
