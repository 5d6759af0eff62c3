// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Unified reader with format detection.
//!
//! The format is detected once when the file is opened and the matching
//! codec handles every later call.
//!
//! # Example
//!
//! ```rust,no_run
//! use sonarcodec::io::SwathReader;
//! use sonarcodec::SessionConfig;
//!
//! let mut reader = SwathReader::open("line.xse", SessionConfig::default())?;
//! while reader.read_ping().is_ok() {
//!     if let Ok(swath) = reader.extract_current() {
//!         println!("{} beams", swath.bath.len());
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::path::Path;

use tracing::debug;

use crate::core::SessionConfig;
use crate::io::detection::detect_format;
use crate::io::formats::xse::{XseCodec, XseRecord};
use crate::io::metadata::FileFormat;
use crate::io::traits::{SwathCodec, SwathData};
use crate::{CodecError, Result};

/// Codec behind a unified reader or writer.
pub type BoxedCodec = Box<dyn SwathCodec<Record = XseRecord>>;

/// Reader that delegates to the codec of the detected format.
pub struct SwathReader {
    path: String,
    format: FileFormat,
    inner: BoxedCodec,
    record: XseRecord,
}

impl SwathReader {
    /// Open a file, detecting its format.
    pub fn open<P: AsRef<Path>>(path: P, config: SessionConfig) -> Result<Self> {
        let format = detect_format(path.as_ref())?;
        Self::open_as(path, format, config)
    }

    /// Open a file as the given format.
    pub fn open_as<P: AsRef<Path>>(
        path: P,
        format: FileFormat,
        config: SessionConfig,
    ) -> Result<Self> {
        let path_ref = path.as_ref();
        debug!(path = %path_ref.display(), format = %format, "opening swath file");
        let inner: BoxedCodec = match format {
            FileFormat::Xse => Box::new(XseCodec::open(path_ref, config)?),
            other => return Err(CodecError::unsupported(format!("reading {other} files"))),
        };
        Ok(Self {
            path: path_ref.to_string_lossy().to_string(),
            format,
            record: inner.allocate_record(),
            inner,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Read the next logical record.
    pub fn read_ping(&mut self) -> Result<&XseRecord> {
        self.inner.read_ping(&mut self.record)?;
        Ok(&self.record)
    }

    /// The record filled by the last successful read.
    pub fn record(&self) -> &XseRecord {
        &self.record
    }

    /// Format-neutral view of a record.
    pub fn extract(&self, record: &XseRecord) -> Result<SwathData> {
        self.inner.extract(record)
    }

    /// Format-neutral view of the last record read.
    pub fn extract_current(&self) -> Result<SwathData> {
        self.inner.extract(&self.record)
    }
}
