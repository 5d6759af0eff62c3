// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Frame scanner.
//!
//! The byte count written after the frame start marker is unreliable in
//! files from the field, so frames are delimited by their markers alone:
//!
//! 1. Slide a 4-byte window one byte at a time until it equals the frame
//!    start marker.
//! 2. Read the declared byte count (kept for diagnostics only).
//! 3. Append one byte at a time until the last four bytes equal the frame
//!    end marker, failing once the buffer reaches the configured maximum.

use std::io::Read;

use byteorder::ReadBytesExt;
use tracing::debug;

use super::binary;
use super::constants::{FrameKind, Marker, CONTROL_HEADER_SIZE, FRAME_HEADER_SIZE, TIME_OFFSET};
use crate::core::{CodecError, Result, WireOrder};

/// Fixed header fields of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Frame id as read from the wire
    pub id: i32,
    /// Sensor source id
    pub source: i32,
    /// Seconds since 1901-01-01
    pub sec: u32,
    /// Microseconds
    pub usec: u32,
    /// Transaction and address, present on control frames only
    pub control: Option<(i32, i32)>,
}

impl FrameHeader {
    /// Frame kind for the id.
    pub fn kind(&self) -> FrameKind {
        FrameKind::from_id(self.id)
    }

    /// Timestamp as Unix seconds.
    pub fn unix_time(&self) -> f64 {
        unix_time(self.sec, self.usec)
    }

    /// Offset of the first byte after the header.
    pub fn body_offset(&self) -> usize {
        if self.control.is_some() {
            CONTROL_HEADER_SIZE
        } else {
            FRAME_HEADER_SIZE
        }
    }

    /// Parse the header from a complete frame buffer.
    pub fn parse(buf: &[u8], order: WireOrder) -> Result<Self> {
        let swap = order.is_swapped();
        if buf.len() < FRAME_HEADER_SIZE {
            return Err(CodecError::unintelligible(
                "frame header",
                format!("frame of {} bytes is shorter than its header", buf.len()),
            ));
        }
        let id = binary::get_i32(buf, 8, swap);
        let source = binary::get_i32(buf, 12, swap);
        let sec = binary::get_u32(buf, 16, swap);
        let usec = binary::get_u32(buf, 20, swap);
        let control = if FrameKind::from_id(id) == FrameKind::Control {
            if buf.len() < CONTROL_HEADER_SIZE {
                return Err(CodecError::unintelligible(
                    "frame header",
                    "control frame too short for transaction and address",
                ));
            }
            Some((
                binary::get_i32(buf, 24, swap),
                binary::get_i32(buf, 28, swap),
            ))
        } else {
            None
        };
        Ok(Self {
            id,
            source,
            sec,
            usec,
            control,
        })
    }
}

/// Convert a 1901-based wire timestamp to Unix seconds.
pub fn unix_time(sec: u32, usec: u32) -> f64 {
    sec as f64 - TIME_OFFSET + 0.000_001 * usec as f64
}

/// Convert Unix seconds to a 1901-based wire timestamp.
pub fn wire_time(time_d: f64) -> (u32, u32) {
    let whole = time_d.floor();
    let sec = (whole + TIME_OFFSET) as u32;
    let usec = ((time_d - whole) * 1_000_000.0).round().min(999_999.0) as u32;
    (sec, usec)
}

/// One complete frame, start marker through end marker.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFrame {
    /// Parsed header
    pub header: FrameHeader,
    /// Byte count declared after the start marker
    pub declared_size: i32,
    /// Frame bytes including both markers
    pub bytes: Vec<u8>,
}

/// Locates frames in a byte stream.
#[derive(Debug, Clone)]
pub struct FrameScanner {
    order: WireOrder,
    max_frame_size: usize,
    frames_read: u64,
    bytes_skipped: u64,
}

impl FrameScanner {
    /// Create a scanner for the given byte order and frame limit.
    pub fn new(order: WireOrder, max_frame_size: usize) -> Self {
        Self {
            order,
            max_frame_size,
            frames_read: 0,
            bytes_skipped: 0,
        }
    }

    /// Number of frames returned so far.
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Number of bytes discarded while resynchronizing.
    pub fn bytes_skipped(&self) -> u64 {
        self.bytes_skipped
    }

    /// Read the next frame.
    ///
    /// Returns [`CodecError::Eof`] if the stream ends anywhere before the end
    /// marker, and [`CodecError::Unintelligible`] if the buffer reaches the
    /// maximum frame size first.
    pub fn read_frame<R: Read>(&mut self, stream: &mut R) -> Result<RawFrame> {
        let start = Marker::FrameStart.bytes(self.order);
        let end = Marker::FrameEnd.bytes(self.order);

        let mut window = [0u8; 4];
        stream.read_exact(&mut window)?;
        let mut skipped = 0u64;
        while window != start {
            window.copy_within(1.., 0);
            window[3] = stream.read_u8()?;
            skipped += 1;
        }
        if skipped > 0 {
            debug!(skipped, "resynchronized to frame start");
            self.bytes_skipped += skipped;
        }

        let mut bytes = Vec::with_capacity(256);
        bytes.extend_from_slice(&window);
        let mut count = [0u8; 4];
        stream.read_exact(&mut count)?;
        bytes.extend_from_slice(&count);
        let declared_size = binary::get_i32(&count, 0, self.order.is_swapped());

        loop {
            let len = bytes.len();
            if len >= 12 && bytes[len - 4..] == end {
                break;
            }
            if len >= self.max_frame_size {
                return Err(CodecError::unintelligible(
                    "frame scanner",
                    format!(
                        "no frame end marker within {} bytes",
                        self.max_frame_size
                    ),
                ));
            }
            bytes.push(stream.read_u8()?);
        }

        let header = FrameHeader::parse(&bytes, self.order)?;
        self.frames_read += 1;
        Ok(RawFrame {
            header,
            declared_size,
            bytes,
        })
    }
}
