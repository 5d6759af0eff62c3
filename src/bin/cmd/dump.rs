// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Dump command - list records one per line.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::common::{format_timestamp, next_record, open_reader, print_json, Result};
use sonarcodec::{RecordKind, SessionConfig, XseRecord};

/// Print records as text or JSON.
#[derive(Args, Clone, Debug)]
pub struct DumpCmd {
    /// Input file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Stop after this many records
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Emit one JSON object per record
    #[arg(long)]
    json: bool,

    /// With --json, serialize every decoded field
    #[arg(long, requires = "json")]
    full: bool,
}

/// One-line view of a record.
#[derive(Debug, Serialize)]
struct DumpLine<'a> {
    index: usize,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ping: Option<i32>,
    beams: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<&'a str>,
}

impl<'a> DumpLine<'a> {
    fn new(index: usize, record: &'a XseRecord) -> Self {
        Self {
            index,
            kind: record.kind.name(),
            time: record.time_d(),
            ping: record.ping_number(),
            beams: if record.multibeam_present {
                record.multibeam.num_beams()
            } else {
                0
            },
            comment: (record.kind == RecordKind::Comment).then_some(record.comment.text.as_str()),
        }
    }

    fn to_text(&self) -> String {
        let mut line = format!("{:>6} {:<16}", self.index, self.kind);
        if let Some(time) = self.time {
            line.push_str(&format!(" {}", format_timestamp(time)));
        }
        if let Some(ping) = self.ping {
            line.push_str(&format!(" ping={ping} beams={}", self.beams));
        }
        if let Some(text) = self.comment {
            line.push_str(&format!(" \"{text}\""));
        }
        line
    }
}

impl DumpCmd {
    pub fn run(self, config: SessionConfig) -> Result<()> {
        let mut reader = open_reader(&self.input, config)?;
        let limit = self.limit.unwrap_or(usize::MAX);

        let mut index = 0;
        while index < limit {
            let Some(record) = next_record(&mut reader)? else {
                break;
            };
            if self.full {
                print_json(record)?;
            } else {
                let line = DumpLine::new(index, record);
                if self.json {
                    print_json(&line)?;
                } else {
                    println!("{}", line.to_text());
                }
            }
            index += 1;
        }

        Ok(())
    }
}
