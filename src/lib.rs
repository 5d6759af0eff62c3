// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Sonarcodec
//!
//! Reader and writer for XSE multibeam and sidescan sonar files.
//!
//! The library is organized by layer:
//! - `core/` - error kinds and session configuration
//! - `io/formats/xse/` - the XSE frame codec, ping correlation, derived
//!   quantities and field accessors
//! - `io/` - format detection and the format-neutral reader/writer facade
//! - `navint` - navigation interpolation used to position pings
//!
//! ## Example: Reading pings
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use sonarcodec::io::formats::xse::{RecordKind, XseReader};
//! use sonarcodec::SessionConfig;
//!
//! let mut reader = XseReader::open("line.xse", SessionConfig::default())?;
//! for record in reader.records() {
//!     let record = record?;
//!     if record.kind == RecordKind::Data {
//!         println!("ping {:?}: {} beams", record.ping_number(), record.multibeam.num_beams());
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Copying a file
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use sonarcodec::io::formats::xse::{XseReader, XseWriter};
//! use sonarcodec::SessionConfig;
//!
//! let mut reader = XseReader::open("in.xse", SessionConfig::default())?;
//! let mut writer = XseWriter::create("out.xse", SessionConfig::default())?;
//! while let Ok(record) = reader.read_ping() {
//!     writer.write_ping(record)?;
//! }
//! writer.flush()?;
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{CodecError, Result, SessionConfig, WireOrder};

// I/O types (detection, codec trait, reader/writer facade, formats)
pub mod io;

// Re-export key I/O types
pub use io::formats::xse::{RecordKind, XseCodec, XseReader, XseRecord, XseWriter};
pub use io::metadata::FileFormat;
pub use io::traits::{BeamFlag, SwathCodec, SwathData};
pub use io::{SwathReader, SwathWriter};

// Navigation interpolation
pub mod navint;
pub use navint::NavInterpolator;
