// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Sonarcodec CLI
//!
//! Command-line tool for XSE sonar files.
//!
//! ## Usage
//!
//! ```sh
//! # Show file summary
//! sonarcodec info line.xse
//!
//! # Print the first 20 records as JSON
//! sonarcodec dump line.xse --limit 20 --json
//!
//! # Re-encode a byte-swapped file
//! sonarcodec --swapped copy in.xse out.xse
//!
//! # Write comment records
//! sonarcodec comment notes.xse "start of line" "operator: jd"
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{CommentCmd, CopyCmd, DumpCmd, InfoCmd};
use common::{GlobalOpts, Result};

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Sonarcodec - XSE sonar data toolkit
///
/// Read, inspect and re-encode XSE multibeam and sidescan files.
/// Byte order is not detected; pass --swapped for little-endian files.
#[derive(Parser, Clone)]
#[command(name = "sonarcodec")]
#[command(about = "Toolkit for XSE multibeam and sidescan sonar files", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    #[command(flatten)]
    opts: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Summarize a file (record counts, ping times, beam and sample maxima)
    Info(InfoCmd),

    /// Print one line or JSON object per record
    Dump(DumpCmd),

    /// Read every record and write it to a new file
    Copy(CopyCmd),

    /// Write comment records to a new file
    Comment(CommentCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    common::init_tracing(cli.opts.verbose);
    let config = cli.opts.session_config()?;

    match cli.command {
        Commands::Info(cmd) => cmd.run(config),
        Commands::Dump(cmd) => cmd.run(config),
        Commands::Copy(cmd) => cmd.run(config),
        Commands::Comment(cmd) => cmd.run(config),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
