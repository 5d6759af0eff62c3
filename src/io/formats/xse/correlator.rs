// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Ping correlation.
//!
//! Multibeam and sidescan results for one ping travel as separate frames,
//! in either order, possibly with unrelated frames in between. The
//! correlator merges them into one survey record:
//!
//! | state             | frame      | condition                        | next              | result   |
//! |-------------------|------------|----------------------------------|-------------------|----------|
//! | any               | non-survey |                                  | unchanged         | return   |
//! | `None`            | sidescan   |                                  | `ExpectMultibeam` | continue |
//! | `ExpectSidescan`  | sidescan   | same ping, amp-vs-lateral        | `None`            | return   |
//! | `ExpectSidescan`  | sidescan   | otherwise                        | unchanged         | continue |
//! | `ExpectSidescan`  | multibeam  | frame saved for the next call    | `None`            | return   |
//! | `ExpectMultibeam` | multibeam  | same ping as the sidescan        | `None`            | return   |
//! | `None`            | multibeam  |                                  | `ExpectSidescan`  | continue |
//! | `ExpectMultibeam` | multibeam  | different ping                   | `ExpectSidescan`  | continue |
//!
//! A saved frame is replayed ahead of any fresh stream read on the next
//! call.

use tracing::debug;

use super::constants::FrameKind;
use super::derive;
use super::frames;
use super::record::{RecordKind, XseRecord};
use super::scanner::RawFrame;
use crate::core::{Result, WireOrder};

/// Which companion frame the current ping is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expect {
    #[default]
    None,
    ExpectSidescan,
    ExpectMultibeam,
}

/// Per-session correlation state.
#[derive(Debug, Clone, Default)]
pub struct CorrelatorState {
    pub expect: Expect,
    /// Frame read ahead of its ping, replayed on the next call
    pub saved: Option<RawFrame>,
    pub last_multibeam_ping: Option<i32>,
    pub last_sidescan_ping: Option<i32>,
}

/// Turns a frame stream into logical records.
#[derive(Debug, Clone)]
pub struct Correlator {
    order: WireOrder,
    state: CorrelatorState,
}

impl Correlator {
    pub fn new(order: WireOrder) -> Self {
        Self {
            order,
            state: CorrelatorState::default(),
        }
    }

    pub fn state(&self) -> &CorrelatorState {
        &self.state
    }

    /// Produce the next record, pulling frames from `next_frame` as needed.
    ///
    /// Errors propagate immediately. The one exception is end of stream
    /// while a survey ping is still waiting for its companion: that ping is
    /// returned as is, and the following call reports the end of stream.
    pub fn read_record<F>(&mut self, record: &mut XseRecord, mut next_frame: F) -> Result<()>
    where
        F: FnMut() -> Result<RawFrame>,
    {
        record.seabeam.clear_groups();
        if self.state.saved.is_some() || self.state.expect == Expect::None {
            record.multibeam_present = false;
            record.sidescan_present = false;
        }

        loop {
            let frame = match self.state.saved.take() {
                Some(frame) => {
                    debug!(kind = frame.header.kind().name(), "replaying saved frame");
                    frame
                }
                None => match next_frame() {
                    Ok(frame) => frame,
                    Err(e) if e.is_eof() && self.pending_ping(record) => {
                        debug!("end of stream with an incomplete ping");
                        self.state.expect = Expect::None;
                        record.kind = RecordKind::Data;
                        return Ok(());
                    }
                    Err(e) => return Err(e),
                },
            };

            if self.process(frame, record)? {
                return Ok(());
            }
        }
    }

    fn pending_ping(&self, record: &XseRecord) -> bool {
        self.state.expect != Expect::None && (record.multibeam_present || record.sidescan_present)
    }

    /// Decode one frame. Returns true when a record is complete.
    fn process(&mut self, frame: RawFrame, record: &mut XseRecord) -> Result<bool> {
        let order = self.order;
        let kind = frame.header.kind();
        match kind {
            FrameKind::Navigation => {
                frames::nav::decode(&frame, order, &mut record.nav)?;
                if frame.header.source > 0 {
                    record.kind = RecordKind::Nav;
                } else {
                    keep_raw(record, frame);
                }
                Ok(true)
            }
            FrameKind::SoundVelocity => {
                frames::svp::decode(&frame, order, &mut record.svp)?;
                record.kind = RecordKind::VelocityProfile;
                Ok(true)
            }
            FrameKind::Ship => {
                frames::ship::decode(&frame, order, &mut record.ship)?;
                record.kind = RecordKind::Parameter;
                Ok(true)
            }
            FrameKind::Comment => {
                frames::comment::decode(&frame, order, &mut record.comment)?;
                record.kind = RecordKind::Comment;
                Ok(true)
            }
            FrameKind::Seabeam => {
                frames::seabeam::decode(&frame, order, &mut record.seabeam)?;
                if record.seabeam.properties.is_some() {
                    record.kind = RecordKind::RunParameter;
                } else {
                    keep_raw(record, frame);
                }
                Ok(true)
            }
            FrameKind::Sidescan => self.process_sidescan(&frame, record),
            FrameKind::Multibeam => self.process_multibeam(frame, record),
            other => {
                debug!(kind = other.name(), id = other.id(), "keeping frame verbatim");
                keep_raw(record, frame);
                Ok(true)
            }
        }
    }

    fn process_sidescan(&mut self, frame: &RawFrame, record: &mut XseRecord) -> Result<bool> {
        frames::sidescan::decode(frame, self.order, &mut record.sidescan)?;
        record.sidescan_present = true;
        record.kind = RecordKind::Data;
        if record.multibeam_present {
            derive::derive_bin_size(&record.multibeam, &mut record.sidescan);
        }
        self.state.last_sidescan_ping = Some(record.sidescan.ping);

        match self.state.expect {
            Expect::ExpectSidescan
                if record.multibeam_present
                    && record.sidescan.ping == record.multibeam.ping
                    && record.sidescan.amp_vs_lateral.is_some() =>
            {
                self.state.expect = Expect::None;
                Ok(true)
            }
            Expect::None => {
                self.state.expect = Expect::ExpectMultibeam;
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    fn process_multibeam(&mut self, frame: RawFrame, record: &mut XseRecord) -> Result<bool> {
        if self.state.expect == Expect::ExpectSidescan {
            debug!(
                ping = record.multibeam.ping,
                "multibeam frame starts the next ping, saving it"
            );
            self.state.saved = Some(frame);
            self.state.expect = Expect::None;
            record.kind = RecordKind::Data;
            return Ok(true);
        }

        frames::multibeam::decode(&frame, self.order, &mut record.multibeam)?;
        derive::derive_bathymetry(&mut record.multibeam, record.nav.speed_ground());
        derive::check_depth(&mut record.multibeam)?;
        record.multibeam_present = true;
        record.kind = RecordKind::Data;
        if record.sidescan_present {
            derive::derive_bin_size(&record.multibeam, &mut record.sidescan);
        }
        self.state.last_multibeam_ping = Some(record.multibeam.ping);

        if self.state.expect == Expect::ExpectMultibeam
            && record.sidescan_present
            && record.sidescan.ping == record.multibeam.ping
        {
            self.state.expect = Expect::None;
            return Ok(true);
        }
        self.state.expect = Expect::ExpectSidescan;
        Ok(false)
    }
}

fn keep_raw(record: &mut XseRecord, frame: RawFrame) {
    record.kind = RecordKind::RawLine;
    record.raw_kind = Some(frame.header.kind());
    record.raw = frame.bytes;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CodecError;
    use crate::io::formats::xse::record::{
        Beam, CommentFields, LateralSeries, MultibeamPing, SidescanPing, Stamp,
    };
    use crate::io::formats::xse::scanner::FrameScanner;
    use std::io::Cursor;

    fn multibeam(ping: i32, laterals: &[f64]) -> Vec<u8> {
        let mut mb = MultibeamPing {
            stamp: Stamp {
                source: 1,
                sec: 3_000_000_000 + ping as u32,
                usec: 0,
            },
            ping,
            beams: laterals
                .iter()
                .map(|&lateral| Beam {
                    lateral,
                    depth: 50.0,
                    ..Beam::default()
                })
                .collect(),
            ..MultibeamPing::default()
        };
        mb.groups.lateral = true;
        mb.groups.depth = true;
        frames::multibeam::encode(&mb, WireOrder::Native)
    }

    fn sidescan(ping: i32, with_avl: bool) -> Vec<u8> {
        let ss = SidescanPing {
            ping,
            amp_vs_lateral: with_avl.then(|| LateralSeries {
                bin_size: 0,
                offset: 0,
                samples: vec![0, 1, 2, 3, 4, 5, 0, 0, 0, 0],
            }),
            ..SidescanPing::default()
        };
        frames::sidescan::encode(&ss, WireOrder::Native)
    }

    fn comment(text: &str) -> Vec<u8> {
        let fields = CommentFields {
            text: text.to_string(),
            ..CommentFields::default()
        };
        frames::comment::encode(&fields, WireOrder::Native)
    }

    struct Harness {
        stream: Cursor<Vec<u8>>,
        scanner: FrameScanner,
        correlator: Correlator,
        record: XseRecord,
    }

    impl Harness {
        fn new(frames: &[Vec<u8>]) -> Self {
            Self {
                stream: Cursor::new(frames.concat()),
                scanner: FrameScanner::new(WireOrder::Native, 32000),
                correlator: Correlator::new(WireOrder::Native),
                record: XseRecord::new(),
            }
        }

        fn next(&mut self) -> Result<RecordKind> {
            let Self {
                stream,
                scanner,
                correlator,
                record,
            } = self;
            correlator.read_record(record, || scanner.read_frame(&mut *stream))?;
            Ok(record.kind)
        }
    }

    #[test]
    fn test_sidescan_then_multibeam_merge() {
        let mut h = Harness::new(&[sidescan(7, true), multibeam(7, &[-20.0, 0.0, 20.0])]);
        assert_eq!(h.next().unwrap(), RecordKind::Data);
        assert!(h.record.multibeam_present);
        assert!(h.record.sidescan_present);
        assert_eq!(h.record.multibeam.ping, 7);
        assert_eq!(h.record.sidescan.ping, 7);
        // bin size derived from the 40 m swath and 5 nonzero samples
        assert_eq!(
            h.record.sidescan.amp_vs_lateral.as_ref().unwrap().bin_size,
            10_000
        );
        assert_eq!(h.correlator.state().expect, Expect::None);
        assert!(h.next().unwrap_err().is_eof());
    }

    #[test]
    fn test_comment_between_companions() {
        let mut h = Harness::new(&[multibeam(3, &[-1.0, 1.0]), comment("hello"), sidescan(3, true)]);
        assert_eq!(h.next().unwrap(), RecordKind::Comment);
        assert_eq!(h.record.comment.text, "hello");
        assert_eq!(h.correlator.state().expect, Expect::ExpectSidescan);

        assert_eq!(h.next().unwrap(), RecordKind::Data);
        assert!(h.record.multibeam_present);
        assert!(h.record.sidescan_present);
        assert_eq!(h.record.multibeam.ping, 3);
        assert_eq!(h.record.sidescan.ping, 3);
        assert!(h.next().unwrap_err().is_eof());
    }

    #[test]
    fn test_next_multibeam_is_saved_and_replayed() {
        let mut h = Harness::new(&[multibeam(1, &[0.0, 1.0]), multibeam(2, &[0.0, 1.0])]);
        assert_eq!(h.next().unwrap(), RecordKind::Data);
        assert_eq!(h.record.multibeam.ping, 1);
        assert!(!h.record.sidescan_present);
        assert!(h.correlator.state().saved.is_some());

        // the saved frame comes back first, then the stream ends mid-ping
        // and the pending ping is handed out before the end of stream
        assert_eq!(h.next().unwrap(), RecordKind::Data);
        assert_eq!(h.record.multibeam.ping, 2);
        assert!(h.correlator.state().saved.is_none());
        assert_eq!(h.correlator.state().expect, Expect::None);
        assert!(h.next().unwrap_err().is_eof());
    }

    #[test]
    fn test_scan_error_mid_ping_keeps_state() {
        let mut stream = Cursor::new([multibeam(6, &[-1.0, 1.0]), sidescan(6, true)].concat());
        let mut scanner = FrameScanner::new(WireOrder::Native, 32000);
        let mut correlator = Correlator::new(WireOrder::Native);
        let mut record = XseRecord::new();
        let mut calls = 0;
        let mut next_frame = || {
            calls += 1;
            if calls == 2 {
                Err(CodecError::unintelligible("sidescan", "frame too large"))
            } else {
                scanner.read_frame(&mut stream)
            }
        };

        let err = correlator.read_record(&mut record, &mut next_frame).unwrap_err();
        assert!(matches!(err, CodecError::Unintelligible { .. }));
        assert_eq!(correlator.state().expect, Expect::ExpectSidescan);
        assert!(record.multibeam_present);

        // the next call picks the ping up where it stopped
        correlator.read_record(&mut record, &mut next_frame).unwrap();
        assert_eq!(record.kind, RecordKind::Data);
        assert!(record.multibeam_present && record.sidescan_present);
        assert_eq!(record.sidescan.ping, 6);
        assert_eq!(correlator.state().expect, Expect::None);
    }

    #[test]
    fn test_end_of_stream_without_pending_ping() {
        let mut h = Harness::new(&[comment("only")]);
        assert_eq!(h.next().unwrap(), RecordKind::Comment);
        assert!(h.next().unwrap_err().is_eof());
        assert_eq!(h.correlator.state().expect, Expect::None);
    }

    #[test]
    fn test_sidescan_without_lateral_group_waits() {
        let mut h = Harness::new(&[
            multibeam(4, &[0.0, 1.0]),
            sidescan(4, false),
            sidescan(4, true),
        ]);
        assert_eq!(h.next().unwrap(), RecordKind::Data);
        assert!(h.record.sidescan.amp_vs_lateral.is_some());
        assert_eq!(h.correlator.state().expect, Expect::None);
    }

    #[test]
    fn test_mismatched_multibeam_keeps_waiting() {
        let mut h = Harness::new(&[
            sidescan(8, true),
            multibeam(9, &[0.0, 1.0]),
            sidescan(9, true),
        ]);
        assert_eq!(h.next().unwrap(), RecordKind::Data);
        assert_eq!(h.record.multibeam.ping, 9);
        assert_eq!(h.record.sidescan.ping, 9);
    }

    #[test]
    fn test_deep_beam_is_unintelligible() {
        let mut mb = MultibeamPing {
            ping: 1,
            beams: vec![Beam {
                depth: 15_000.0,
                ..Beam::default()
            }],
            ..MultibeamPing::default()
        };
        mb.groups.depth = true;
        let mut h = Harness::new(&[frames::multibeam::encode(&mb, WireOrder::Native)]);
        let err = h.next().unwrap_err();
        assert!(matches!(err, CodecError::Unintelligible { .. }));
    }

    #[test]
    fn test_unknown_frame_kept_raw() {
        let mut raw = comment("x");
        // retag as a tide frame
        raw[8..12].copy_from_slice(&3i32.to_be_bytes());
        let mut h = Harness::new(&[raw.clone()]);
        assert_eq!(h.next().unwrap(), RecordKind::RawLine);
        assert_eq!(h.record.raw, raw);
        assert_eq!(h.record.raw_kind, Some(FrameKind::Tide));
    }
}
