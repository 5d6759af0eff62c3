// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Comment command - write comment records to a new file.

use std::path::PathBuf;

use clap::Args;

use crate::common::Result;
use sonarcodec::{SessionConfig, XseRecord, XseWriter};

/// Create a file holding one comment record per argument.
#[derive(Args, Clone, Debug)]
pub struct CommentCmd {
    /// Output file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Comment texts, one record each
    #[arg(value_name = "TEXT", required = true)]
    texts: Vec<String>,
}

impl CommentCmd {
    pub fn run(self, config: SessionConfig) -> Result<()> {
        let mut writer = XseWriter::create(&self.output, config)?;
        for text in &self.texts {
            writer.write_ping(&XseRecord::comment(text.as_str()))?;
        }
        writer.flush()?;

        println!(
            "Wrote {} comments to {}",
            writer.records_written(),
            self.output.display()
        );
        Ok(())
    }
}
