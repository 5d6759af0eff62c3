// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Record encoder.
//!
//! Frames are built in a growable buffer. Byte counts are written as
//! placeholders, then patched in place once the payload they cover is
//! known, so no seeking is needed on the output stream.

use super::binary;
use super::constants::{FrameKind, Marker};
use super::frames;
use super::record::{RecordKind, Stamp, XseRecord};
use crate::core::{CodecError, Result, WireOrder};

/// Builds one frame.
pub struct FrameEncoder {
    buf: Vec<u8>,
    order: WireOrder,
    swap: bool,
    frame_count_at: usize,
    group_count_at: Option<usize>,
}

impl FrameEncoder {
    /// Start a frame: marker, placeholder count, id, source and timestamp.
    pub fn begin(order: WireOrder, kind: FrameKind, stamp: &Stamp) -> Self {
        let mut enc = Self {
            buf: Vec::with_capacity(1024),
            order,
            swap: order.is_swapped(),
            frame_count_at: 4,
            group_count_at: None,
        };
        enc.put_bytes(&Marker::FrameStart.bytes(order));
        enc.put_i32(0);
        enc.put_i32(kind.id());
        enc.put_i32(stamp.source);
        enc.put_u32(stamp.sec);
        enc.put_u32(stamp.usec);
        enc
    }

    /// Open a group with the given id.
    pub fn start_group(&mut self, id: i32) {
        debug_assert!(self.group_count_at.is_none(), "group already open");
        self.put_bytes(&Marker::GroupStart.bytes(self.order));
        self.group_count_at = Some(self.buf.len());
        self.put_i32(0);
        self.put_i32(id);
    }

    /// Close the open group, patching its byte count.
    pub fn end_group(&mut self) {
        if let Some(at) = self.group_count_at.take() {
            let count = (self.buf.len() - at - 4) as i32;
            binary::put_i32(&mut self.buf, at, count, self.swap);
            self.put_bytes(&Marker::GroupEnd.bytes(self.order));
        }
    }

    /// Write a complete group.
    pub fn group<F: FnOnce(&mut Self)>(&mut self, id: i32, payload: F) {
        self.start_group(id);
        payload(self);
        self.end_group();
    }

    /// Close the frame and return its bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.end_group();
        let count = (self.buf.len() - self.frame_count_at - 4) as i32;
        binary::put_i32(&mut self.buf, self.frame_count_at, count, self.swap);
        let end = Marker::FrameEnd.bytes(self.order);
        self.put_bytes(&end);
        self.buf
    }

    /// Append raw bytes.
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    fn reserve(&mut self, width: usize) -> usize {
        let at = self.buf.len();
        self.buf.resize(at + width, 0);
        at
    }

    pub fn put_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn put_i16(&mut self, value: i16) {
        let at = self.reserve(2);
        binary::put_i16(&mut self.buf, at, value, self.swap);
    }

    pub fn put_i32(&mut self, value: i32) {
        let at = self.reserve(4);
        binary::put_i32(&mut self.buf, at, value, self.swap);
    }

    pub fn put_u32(&mut self, value: u32) {
        let at = self.reserve(4);
        binary::put_u32(&mut self.buf, at, value, self.swap);
    }

    pub fn put_f32(&mut self, value: f32) {
        let at = self.reserve(4);
        binary::put_f32(&mut self.buf, at, value, self.swap);
    }

    pub fn put_f64(&mut self, value: f64) {
        let at = self.reserve(8);
        binary::put_f64(&mut self.buf, at, value, self.swap);
    }

    /// Write an element count.
    pub fn put_count(&mut self, count: usize) {
        self.put_i32(count as i32);
    }
}

/// Encode a record into the bytes of one or more frames.
///
/// Survey records produce a multibeam frame followed by a sidescan frame,
/// each only when present. Raw records are written back unchanged.
pub fn encode_record(record: &XseRecord, order: WireOrder) -> Result<Vec<u8>> {
    let bytes = match record.kind {
        RecordKind::Comment => frames::comment::encode(&record.comment, order),
        RecordKind::Nav => frames::nav::encode(&record.nav, order),
        RecordKind::VelocityProfile => frames::svp::encode(&record.svp, order),
        RecordKind::Parameter => frames::ship::encode(&record.ship, order),
        RecordKind::RunParameter => frames::seabeam::encode(&record.seabeam, order),
        RecordKind::Data => {
            let mut out = Vec::new();
            if record.multibeam_present {
                out.extend(frames::multibeam::encode(&record.multibeam, order));
            }
            if record.sidescan_present {
                out.extend(frames::sidescan::encode(&record.sidescan, order));
            }
            out
        }
        RecordKind::RawLine => record.raw.clone(),
        RecordKind::None => return Err(CodecError::bad_kind(record.kind.name())),
    };
    Ok(bytes)
}
