// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::io::IsTerminal as _;
use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use sonarcodec::{CodecError, SessionConfig, WireOrder, XseReader, XseRecord};

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Flags shared by every subcommand.
#[derive(Args, Clone, Debug, Default)]
pub struct GlobalOpts {
    /// Session configuration file (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Files use byte-swapped (little-endian) markers and fields
    #[arg(long, global = true)]
    pub swapped: bool,

    /// Largest frame to buffer, in bytes
    #[arg(long, global = true, value_name = "BYTES")]
    pub max_frame_size: Option<usize>,

    /// Log decoder activity at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalOpts {
    /// Build the session configuration: file first, then flag overrides.
    pub fn session_config(&self) -> Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::load(path)?,
            None => SessionConfig::default(),
        };
        if self.swapped {
            config.wire_order = WireOrder::Swapped;
        }
        if let Some(size) = self.max_frame_size {
            config.max_frame_size = size;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Install the stderr log subscriber.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Format Unix seconds as a UTC timestamp.
pub fn format_timestamp(secs: f64) -> String {
    let whole = secs.floor();
    let micros = ((secs - whole) * 1_000_000.0).round() as u32;
    let datetime =
        chrono::DateTime::<chrono::Utc>::from_timestamp(whole as i64, micros.min(999_999) * 1000);

    match datetime {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S%.3f UTC").to_string(),
        None => format!("{secs:.3} s"),
    }
}

/// Format a span in seconds to a human-readable string.
pub fn format_duration(secs: f64) -> String {
    let total = secs.max(0.0);
    let whole = total as u64;
    if whole >= 3600 {
        format!("{}h {}m", whole / 3600, (whole % 3600) / 60)
    } else if whole >= 60 {
        format!("{}m {}s", whole / 60, whole % 60)
    } else {
        format!("{total:.3}s")
    }
}

/// Print a value as one line of JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

/// Open an XSE file for reading.
pub fn open_reader(path: &Path, config: SessionConfig) -> Result<XseReader> {
    Ok(XseReader::open(path, config)?)
}

/// Read the next record, skipping frames the scanner gave up on.
///
/// Returns `Ok(None)` at end of stream.
pub fn next_record<'r>(reader: &'r mut XseReader) -> Result<Option<&'r XseRecord>> {
    loop {
        match reader.read_ping() {
            Ok(_) => return Ok(Some(reader.record())),
            Err(CodecError::Eof) => return Ok(None),
            Err(e @ CodecError::Unintelligible { .. }) => {
                let fields: Vec<String> = e
                    .log_fields()
                    .into_iter()
                    .map(|(key, value)| format!("{key}={value}"))
                    .collect();
                warn!(path = %reader.path(), details = %fields.join(" "), "skipping unreadable frame");
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Progress spinner, shown only when stderr is a terminal.
pub struct Spinner {
    inner: Option<indicatif::ProgressBar>,
}

impl Spinner {
    pub fn new(prefix: impl Into<String>) -> Self {
        let inner = if std::io::stderr().is_terminal() {
            let pb = indicatif::ProgressBar::new_spinner();
            if let Ok(style) =
                indicatif::ProgressStyle::default_spinner().template("{spinner:.green} {prefix} {pos} records {msg}")
            {
                pb.set_style(style);
            }
            pb.set_prefix(prefix.into());
            Some(pb)
        } else {
            None
        };

        Self { inner }
    }

    pub fn inc(&self) {
        if let Some(pb) = &self.inner {
            pb.inc(1);
        }
    }

    pub fn finish_with_message(&self, msg: String) {
        if let Some(pb) = &self.inner {
            pb.finish_with_message(msg);
        }
    }
}
