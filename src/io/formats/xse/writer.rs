// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Write-one-ping session.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::encoder::encode_record;
use super::record::XseRecord;
use crate::core::{CodecError, Result, SessionConfig};

/// XSE output session.
pub struct XseWriter<W: Write = BufWriter<File>> {
    path: String,
    config: SessionConfig,
    sink: W,
    records_written: u64,
    bytes_written: u64,
}

impl XseWriter<BufWriter<File>> {
    /// Create (or truncate) an XSE file.
    pub fn create<P: AsRef<Path>>(path: P, config: SessionConfig) -> Result<Self> {
        let path_ref = path.as_ref();
        let file = File::create(path_ref)?;
        let mut writer = Self::from_sink(BufWriter::new(file), config)?;
        writer.path = path_ref.to_string_lossy().to_string();
        Ok(writer)
    }
}

impl<W: Write> XseWriter<W> {
    /// Write to any byte sink.
    pub fn from_sink(sink: W, config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            path: String::new(),
            config,
            sink,
            records_written: 0,
            bytes_written: 0,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Encode and write one record.
    pub fn write_ping(&mut self, record: &XseRecord) -> Result<()> {
        let bytes = encode_record(record, self.config.wire_order)?;
        self.sink.write_all(&bytes).map_err(|e| {
            CodecError::write_fail(format!(
                "{} bytes for {} record: {e}",
                bytes.len(),
                record.kind.name()
            ))
        })?;
        self.records_written += 1;
        self.bytes_written += bytes.len() as u64;
        Ok(())
    }

    /// Flush buffered output.
    pub fn flush(&mut self) -> Result<()> {
        self.sink
            .flush()
            .map_err(|e| CodecError::write_fail(format!("flush failed: {e}")))
    }

    /// Flush and hand back the sink.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.sink)
    }
}
