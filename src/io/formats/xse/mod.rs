// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! XSE sonar format.
//!
//! An XSE file is a sequence of frames. Each frame is a fixed header
//! followed by self-describing groups:
//!
//! ```text
//! frame: $HSF count id source sec usec group* #HSF
//! group: $HSG count id payload #HSG
//! ```
//!
//! Multibeam and sidescan frames of the same ping are merged into one
//! survey record by [`correlator::Correlator`]. Byte-swapped files use the
//! reversed markers (`FSH$`, `GSH$`, ...) and are selected with
//! [`WireOrder::Swapped`](crate::core::WireOrder).
//!
//! # Example
//!
//! ```rust,no_run
//! use sonarcodec::io::formats::xse::XseReader;
//! use sonarcodec::SessionConfig;
//!
//! let mut reader = XseReader::open("line.xse", SessionConfig::default())?;
//! while let Ok(record) = reader.read_ping() {
//!     println!("{:?} {:?}", record.kind, record.ping_number());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod access;
pub mod binary;
pub mod constants;
pub mod correlator;
pub mod derive;
pub mod encoder;
pub mod frames;
pub mod group;
pub mod reader;
pub mod record;
pub mod scanner;
pub mod writer;

use std::path::Path;

pub use correlator::{Correlator, Expect};
pub use reader::XseReader;
pub use record::{RecordKind, XseRecord};
pub use writer::XseWriter;

use crate::core::{CodecError, Result, SessionConfig};
use crate::io::metadata::FileFormat;
use crate::io::traits::{SwathCodec, SwathData};

enum Session {
    Read(XseReader),
    Write(XseWriter),
}

/// XSE codec bound to one open file.
pub struct XseCodec {
    lonflip: i32,
    session: Session,
}

impl XseCodec {
    /// Open an existing file for reading.
    pub fn open<P: AsRef<Path>>(path: P, config: SessionConfig) -> Result<Self> {
        Ok(Self {
            lonflip: config.lonflip,
            session: Session::Read(XseReader::open(path, config)?),
        })
    }

    /// Create a file for writing.
    pub fn create<P: AsRef<Path>>(path: P, config: SessionConfig) -> Result<Self> {
        Ok(Self {
            lonflip: config.lonflip,
            session: Session::Write(XseWriter::create(path, config)?),
        })
    }

    pub fn path(&self) -> &str {
        match &self.session {
            Session::Read(r) => r.path(),
            Session::Write(w) => w.path(),
        }
    }
}

impl SwathCodec for XseCodec {
    type Record = XseRecord;

    fn format(&self) -> FileFormat {
        FileFormat::Xse
    }

    fn read_ping(&mut self, record: &mut XseRecord) -> Result<()> {
        match &mut self.session {
            Session::Read(reader) => reader.read_into(record),
            Session::Write(_) => Err(CodecError::unsupported("reading from an output file")),
        }
    }

    fn write_ping(&mut self, record: &XseRecord) -> Result<()> {
        match &mut self.session {
            Session::Write(writer) => writer.write_ping(record),
            Session::Read(_) => Err(CodecError::unsupported("writing to an input file")),
        }
    }

    fn flush(&mut self) -> Result<()> {
        match &mut self.session {
            Session::Write(writer) => writer.flush(),
            Session::Read(_) => Ok(()),
        }
    }

    fn extract(&self, record: &XseRecord) -> Result<SwathData> {
        access::extract(record, self.lonflip)
    }

    fn insert(&self, record: &mut XseRecord, data: &SwathData) -> Result<()> {
        access::insert(record, data)
    }
}
