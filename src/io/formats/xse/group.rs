// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Group iteration inside a frame buffer.
//!
//! After the frame header, the parser scans one byte at a time for either
//! a group start marker or the frame end marker. Each group start is
//! followed by a byte count and a group id; the frame-specific decoder then
//! consumes exactly the fields it knows through a bounded [`GroupCursor`].

use tracing::debug;

use super::binary;
use super::constants::Marker;
use crate::core::{CodecError, Result, WireOrder};

/// Bounded reader over a frame buffer.
///
/// Every read checks that the requested width fits in the remaining bytes,
/// so the unchecked accessors in [`binary`] are never handed a short slice.
pub struct GroupCursor<'a> {
    data: &'a [u8],
    offset: usize,
    swap: bool,
}

impl<'a> GroupCursor<'a> {
    /// Create a cursor at `offset`.
    pub fn new(data: &'a [u8], offset: usize, order: WireOrder) -> Self {
        Self {
            data,
            offset,
            swap: order.is_swapped(),
        }
    }

    /// Current read position.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Bytes left in the buffer.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    #[inline]
    fn take(&mut self, width: usize) -> Result<usize> {
        if width > self.remaining() {
            return Err(CodecError::buffer_too_short(
                width,
                self.remaining(),
                self.offset as u64,
            ));
        }
        let at = self.offset;
        self.offset += width;
        Ok(at)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        let at = self.take(1)?;
        Ok(self.data[at])
    }

    /// Read an i16 value.
    pub fn read_i16(&mut self) -> Result<i16> {
        let at = self.take(2)?;
        Ok(binary::get_i16(self.data, at, self.swap))
    }

    /// Read an i32 value.
    pub fn read_i32(&mut self) -> Result<i32> {
        let at = self.take(4)?;
        Ok(binary::get_i32(self.data, at, self.swap))
    }

    /// Read a u32 value.
    pub fn read_u32(&mut self) -> Result<u32> {
        let at = self.take(4)?;
        Ok(binary::get_u32(self.data, at, self.swap))
    }

    /// Read an f32 value.
    pub fn read_f32(&mut self) -> Result<f32> {
        let at = self.take(4)?;
        Ok(binary::get_f32(self.data, at, self.swap))
    }

    /// Read an f64 value.
    pub fn read_f64(&mut self) -> Result<f64> {
        let at = self.take(8)?;
        Ok(binary::get_f64(self.data, at, self.swap))
    }

    /// Read a byte slice.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let at = self.take(count)?;
        Ok(&self.data[at..at + count])
    }

    /// Skip bytes.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.take(count).map(|_| ())
    }

    /// Read an element count, treating negative counts as zero.
    pub fn read_count(&mut self) -> Result<usize> {
        Ok(self.read_i32()?.max(0) as usize)
    }
}

/// Header fields that follow a group start marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupHeader {
    /// Group id, scoped to the parent frame kind
    pub id: i32,
    /// Declared byte count (group id plus payload)
    pub byte_count: i32,
    /// Offset of the first payload byte after the group id
    pub payload_offset: usize,
}

impl GroupHeader {
    /// Declared payload length, excluding the group id.
    pub fn payload_len(&self) -> usize {
        (self.byte_count - 4).max(0) as usize
    }
}

/// What a frame decoder did with a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupOutcome {
    /// Fields were consumed through the cursor
    Decoded,
    /// Group id not handled; skip by its declared byte count
    Skipped,
}

/// Walk the groups of a frame, handing each to `decode`.
///
/// `frame_name` is used for error context and logs. A group whose fields
/// run past the end of the frame fails the frame with
/// [`CodecError::Unintelligible`].
pub fn for_each_group<F>(
    frame: &[u8],
    body_offset: usize,
    order: WireOrder,
    frame_name: &str,
    mut decode: F,
) -> Result<()>
where
    F: FnMut(&GroupHeader, &mut GroupCursor<'_>) -> Result<GroupOutcome>,
{
    let group_start = Marker::GroupStart.bytes(order);
    let group_end = Marker::GroupEnd.bytes(order);
    let frame_end = Marker::FrameEnd.bytes(order);
    let len = frame.len();
    let mut pos = body_offset;

    loop {
        let scan_from = pos;
        while pos + 4 <= len
            && frame[pos..pos + 4] != group_start
            && frame[pos..pos + 4] != frame_end
        {
            pos += 1;
        }
        if pos + 4 > len || frame[pos..pos + 4] == frame_end {
            return Ok(());
        }
        if pos > scan_from {
            debug!(
                frame = frame_name,
                skipped = pos - scan_from,
                "resynchronized to group start"
            );
        }
        pos += 4;

        let mut cursor = GroupCursor::new(frame, pos, order);
        let header = cursor
            .read_i32()
            .and_then(|byte_count| {
                let id = cursor.read_i32()?;
                Ok(GroupHeader {
                    id,
                    byte_count,
                    payload_offset: cursor.position(),
                })
            })
            .map_err(|e| CodecError::unintelligible(frame_name, e.to_string()))?;

        let outcome = decode(&header, &mut cursor).map_err(|e| match e {
            CodecError::BufferTooShort { .. } => {
                CodecError::unintelligible(format!("{frame_name} group {}", header.id), e.to_string())
            }
            other => other,
        })?;

        pos = match outcome {
            GroupOutcome::Decoded => cursor.position(),
            GroupOutcome::Skipped => {
                debug!(frame = frame_name, group = header.id, "skipping unknown group");
                let end = header.payload_offset + header.payload_len();
                if end <= len {
                    end
                } else {
                    header.payload_offset
                }
            }
        };
        if pos + 4 <= len && frame[pos..pos + 4] == group_end {
            pos += 4;
        }
    }
}
