// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Copy command - decode every record and encode it again.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::common::{next_record, open_reader, Result, Spinner};
use sonarcodec::{SessionConfig, XseWriter};

/// Re-encode a file record by record.
#[derive(Args, Clone, Debug)]
pub struct CopyCmd {
    /// Input file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,
}

impl CopyCmd {
    pub fn run(self, config: SessionConfig) -> Result<()> {
        if self.input == self.output {
            anyhow::bail!("input and output must be different files");
        }

        // pings are written back as decoded, without backfilled navigation
        let read_config = SessionConfig {
            interpolate_navigation: false,
            ..config.clone()
        };
        let mut reader = open_reader(&self.input, read_config)?;
        let mut writer = XseWriter::create(&self.output, config)?;
        let spinner = Spinner::new("copying");

        while let Some(record) = next_record(&mut reader)? {
            writer.write_ping(record)?;
            spinner.inc();
        }
        writer.flush()?;

        spinner.finish_with_message(format!("-> {}", self.output.display()));
        info!(
            records = writer.records_written(),
            bytes = writer.bytes_written(),
            "copy finished"
        );
        println!(
            "Copied {} records ({} bytes) to {}",
            writer.records_written(),
            writer.bytes_written(),
            self.output.display()
        );

        Ok(())
    }
}
