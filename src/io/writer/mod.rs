// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Unified writer for swath formats.
//!
//! The output format is fixed when the file is created.

use std::path::Path;

use crate::core::SessionConfig;
use crate::io::formats::xse::{XseCodec, XseRecord};
use crate::io::metadata::FileFormat;
use crate::io::reader::BoxedCodec;
use crate::io::traits::SwathData;
use crate::{CodecError, Result};

/// Writer that delegates to the codec of one format.
pub struct SwathWriter {
    path: String,
    format: FileFormat,
    inner: BoxedCodec,
    records_written: u64,
}

impl SwathWriter {
    /// Create an output file in the given format.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use sonarcodec::io::{FileFormat, SwathWriter};
    /// use sonarcodec::io::formats::xse::XseRecord;
    /// use sonarcodec::SessionConfig;
    ///
    /// let mut writer = SwathWriter::create("notes.xse", FileFormat::Xse, SessionConfig::default())?;
    /// writer.write_ping(&XseRecord::comment("start of line"))?;
    /// writer.finish()?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn create<P: AsRef<Path>>(
        path: P,
        format: FileFormat,
        config: SessionConfig,
    ) -> Result<Self> {
        let path_ref = path.as_ref();
        let inner: BoxedCodec = match format {
            FileFormat::Xse => Box::new(XseCodec::create(path_ref, config)?),
            other => return Err(CodecError::unsupported(format!("writing {other} files"))),
        };
        Ok(Self {
            path: path_ref.to_string_lossy().to_string(),
            format,
            inner,
            records_written: 0,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Fresh, empty record for this format.
    pub fn allocate_record(&self) -> XseRecord {
        self.inner.allocate_record()
    }

    /// Append one record.
    pub fn write_ping(&mut self, record: &XseRecord) -> Result<()> {
        self.inner.write_ping(record)?;
        self.records_written += 1;
        Ok(())
    }

    /// Write a format-neutral view back into a record.
    pub fn insert(&self, record: &mut XseRecord, data: &SwathData) -> Result<()> {
        self.inner.insert(record, data)
    }

    /// Flush buffered output.
    pub fn finish(&mut self) -> Result<()> {
        self.inner.flush()
    }
}
