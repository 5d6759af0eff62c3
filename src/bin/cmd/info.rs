// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Info command - summarize an XSE file.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Args;

use crate::common::{format_duration, format_timestamp, next_record, open_reader, Result};
use sonarcodec::io::detection::detect_format;
use sonarcodec::{RecordKind, SessionConfig, XseRecord};

/// Show record counts, ping times and array sizes.
#[derive(Args, Clone, Debug)]
pub struct InfoCmd {
    /// Input file
    #[arg(value_name = "FILE")]
    input: PathBuf,
}

/// Running totals over a file.
#[derive(Debug, Default)]
struct Summary {
    kinds: BTreeMap<&'static str, u64>,
    pings: u64,
    first_ping: Option<f64>,
    last_ping: Option<f64>,
    max_beams: usize,
    max_samples: usize,
}

impl Summary {
    fn add(&mut self, record: &XseRecord) {
        *self.kinds.entry(record.kind.name()).or_default() += 1;
        if record.kind != RecordKind::Data {
            return;
        }
        self.pings += 1;
        if let Some(t) = record.time_d() {
            if self.first_ping.is_none() {
                self.first_ping = Some(t);
            }
            self.last_ping = Some(t);
        }
        if record.multibeam_present {
            self.max_beams = self.max_beams.max(record.multibeam.num_beams());
        }
        if record.sidescan_present {
            let ss = &record.sidescan;
            let samples = [
                ss.amp_vs_time.as_ref().map(|s| s.samples.len()),
                ss.amp_vs_lateral.as_ref().map(|s| s.samples.len()),
                ss.signal.as_ref().map(|s| s.samples.len()),
            ]
            .into_iter()
            .flatten()
            .max()
            .unwrap_or(0);
            self.max_samples = self.max_samples.max(samples);
        }
    }
}

impl InfoCmd {
    pub fn run(self, config: SessionConfig) -> Result<()> {
        let format = detect_format(&self.input)?;
        let mut reader = open_reader(&self.input, config)?;

        let mut summary = Summary::default();
        while let Some(record) = next_record(&mut reader)? {
            summary.add(record);
        }

        println!("=== {} ===", self.input.display());
        println!("Format: {format}");
        println!("Records: {}", reader.records_read());
        for (kind, count) in &summary.kinds {
            println!("  {kind}: {count}");
        }
        println!("Pings: {}", summary.pings);
        if let (Some(start), Some(end)) = (summary.first_ping, summary.last_ping) {
            println!("First ping: {}", format_timestamp(start));
            println!("Last ping: {}", format_timestamp(end));
            println!("Duration: {}", format_duration(end - start));
        }
        println!("Max beams: {}", summary.max_beams);
        println!("Max sidescan samples: {}", summary.max_samples);
        if reader.bytes_skipped() > 0 {
            println!("Bytes skipped: {}", reader.bytes_skipped());
        }

        Ok(())
    }
}
