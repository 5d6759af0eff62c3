// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Read-one-ping session.
//!
//! Owns the input stream, the frame scanner, the correlator and the
//! record that each call fills in place.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

use super::correlator::Correlator;
use super::record::{DerivedNav, RecordKind, XseRecord};
use super::scanner::FrameScanner;
use crate::core::{Result, SessionConfig};
use crate::navint::NavInterpolator;

/// XSE input session.
pub struct XseReader<R = BufReader<File>> {
    path: String,
    config: SessionConfig,
    stream: R,
    scanner: FrameScanner,
    correlator: Correlator,
    record: XseRecord,
    nav: NavInterpolator,
    records_read: u64,
}

impl XseReader<BufReader<File>> {
    /// Open an XSE file for reading.
    pub fn open<P: AsRef<Path>>(path: P, config: SessionConfig) -> Result<Self> {
        let path_ref = path.as_ref();
        let file = File::open(path_ref)?;
        let mut reader = Self::from_stream(BufReader::new(file), config)?;
        reader.path = path_ref.to_string_lossy().to_string();
        Ok(reader)
    }
}

impl<R: Read> XseReader<R> {
    /// Read from any byte stream.
    pub fn from_stream(stream: R, config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            path: String::new(),
            scanner: FrameScanner::new(config.wire_order, config.max_frame_size),
            correlator: Correlator::new(config.wire_order),
            config,
            stream,
            record: XseRecord::new(),
            nav: NavInterpolator::new(),
            records_read: 0,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// Bytes discarded while resynchronizing on frame markers.
    pub fn bytes_skipped(&self) -> u64 {
        self.scanner.bytes_skipped()
    }

    /// The record filled by the last successful read.
    pub fn record(&self) -> &XseRecord {
        &self.record
    }

    /// Read the next logical record.
    pub fn read_ping(&mut self) -> Result<&XseRecord> {
        let mut record = std::mem::take(&mut self.record);
        let result = self.read_into(&mut record);
        self.record = record;
        result.map(|()| &self.record)
    }

    /// Read the next logical record into a caller-owned record.
    ///
    /// The same record must be passed on every call: an incomplete ping
    /// is carried in it between calls.
    pub fn read_into(&mut self, record: &mut XseRecord) -> Result<()> {
        let Self {
            stream,
            scanner,
            correlator,
            ..
        } = self;
        correlator.read_record(record, || scanner.read_frame(&mut *stream))?;
        self.records_read += 1;
        if self.config.interpolate_navigation {
            backfill_navigation(record, &mut self.nav);
        }
        Ok(())
    }

    /// Iterate over owned copies of the remaining records.
    ///
    /// Stops at end of stream. Other errors are yielded once and iteration
    /// continues with the next frame.
    pub fn records(&mut self) -> Records<'_, R> {
        Records { reader: self }
    }
}

/// Iterator returned by [`XseReader::records`].
pub struct Records<'a, R> {
    reader: &'a mut XseReader<R>,
}

impl<R: Read> Iterator for Records<'_, R> {
    type Item = Result<XseRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_ping() {
            Ok(record) => Some(Ok(record.clone())),
            Err(e) if e.is_eof() => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Feed navigation records into the interpolator and give survey pings
/// that lack derived navigation an interpolated position.
pub fn backfill_navigation(record: &mut XseRecord, nav: &mut NavInterpolator) {
    match record.kind {
        RecordKind::Nav => {
            let time = record.nav.stamp.unix_time();
            if let Some(position) = &record.nav.position {
                nav.add_fix(time, position.x.to_degrees(), position.y.to_degrees());
            }
            let heading = record
                .nav
                .heading
                .or(record.nav.motion_ground.map(|m| m.course))
                .or(record.nav.motion_water.map(|m| m.course));
            if let Some(heading) = heading {
                nav.add_heading(time, heading.to_degrees());
            }
        }
        RecordKind::Data if record.multibeam_present && record.multibeam.derived_nav.is_none() => {
            let time = record.multibeam.stamp.unix_time();
            let heading = nav.interpolate_heading(time).unwrap_or(0.0);
            let speed = 3.6
                * record
                    .nav
                    .log_speed
                    .or(record.nav.motion_ground.map(|m| m.speed))
                    .or(record.nav.motion_water.map(|m| m.speed))
                    .unwrap_or(0.0);
            let fix = nav.interpolate(time, heading, speed);
            if !fix.valid {
                debug!(ping = record.multibeam.ping, "no navigation to interpolate");
                return;
            }
            record.multibeam.derived_nav = Some(DerivedNav {
                lon: fix.lon.to_radians(),
                lat: fix.lat.to_radians(),
                heading: fix.heading.to_radians(),
                speed: fix.speed / 3.6,
            });
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WireOrder;
    use crate::io::formats::xse::encoder::encode_record;
    use crate::io::formats::xse::record::{Beam, Motion, NavPosition, Stamp};
    use std::io::Cursor;

    const BASE_SEC: u32 = 3_000_000_000;

    fn nav_record(sec: u32, lon: f64, lat: f64, heading: f64) -> XseRecord {
        let mut record = XseRecord::new();
        record.kind = RecordKind::Nav;
        record.nav.stamp = Stamp {
            source: 1,
            sec,
            usec: 0,
        };
        record.nav.position = Some(NavPosition {
            description: String::new(),
            x: lon.to_radians(),
            y: lat.to_radians(),
            z: 0.0,
        });
        record.nav.heading = Some(heading.to_radians());
        record.nav.motion_ground = Some(Motion {
            speed: 2.0,
            course: heading.to_radians(),
        });
        record
    }

    fn ping_record(sec: u32, ping: i32) -> XseRecord {
        let mut record = XseRecord::new();
        record.kind = RecordKind::Data;
        record.multibeam_present = true;
        record.multibeam.stamp = Stamp {
            source: 1,
            sec,
            usec: 0,
        };
        record.multibeam.ping = ping;
        record.multibeam.beams = vec![Beam {
            depth: 20.0,
            ..Beam::default()
        }];
        record.multibeam.groups.depth = true;
        record
    }

    fn stream_of(records: &[XseRecord]) -> Cursor<Vec<u8>> {
        let bytes: Vec<u8> = records
            .iter()
            .flat_map(|r| encode_record(r, WireOrder::Native).unwrap())
            .collect();
        Cursor::new(bytes)
    }

    #[test]
    fn test_ping_between_fixes_gets_position() {
        let stream = stream_of(&[
            nav_record(BASE_SEC, 10.0, 50.0, 90.0),
            nav_record(BASE_SEC + 10, 10.01, 50.0, 90.0),
            ping_record(BASE_SEC + 5, 1),
        ]);
        let mut reader = XseReader::from_stream(stream, SessionConfig::default()).unwrap();
        assert_eq!(reader.read_ping().unwrap().kind, RecordKind::Nav);
        assert_eq!(reader.read_ping().unwrap().kind, RecordKind::Nav);
        let record = reader.read_ping().unwrap();
        assert_eq!(record.kind, RecordKind::Data);
        let nav = record.multibeam.derived_nav.unwrap();
        assert!((nav.lon.to_degrees() - 10.005).abs() < 1e-9);
        assert!((nav.lat.to_degrees() - 50.0).abs() < 1e-9);
        assert!((nav.heading.to_degrees() - 90.0).abs() < 1e-9);
        assert!(nav.speed > 0.0);
        assert!(reader.read_ping().unwrap_err().is_eof());
        assert_eq!(reader.records_read(), 3);
    }

    #[test]
    fn test_interpolation_can_be_disabled() {
        let stream = stream_of(&[nav_record(BASE_SEC, 10.0, 50.0, 0.0), ping_record(BASE_SEC + 1, 1)]);
        let config = SessionConfig {
            interpolate_navigation: false,
            ..SessionConfig::default()
        };
        let mut reader = XseReader::from_stream(stream, config).unwrap();
        reader.read_ping().unwrap();
        assert!(reader.read_ping().unwrap().multibeam.derived_nav.is_none());
    }

    #[test]
    fn test_ping_without_navigation_left_alone() {
        let mut record = ping_record(BASE_SEC, 1);
        let mut nav = NavInterpolator::new();
        backfill_navigation(&mut record, &mut nav);
        assert!(record.multibeam.derived_nav.is_none());
    }

    #[test]
    fn test_records_iterator_stops_at_eof() {
        let stream = stream_of(&[
            XseRecord::comment("one"),
            XseRecord::comment("two"),
        ]);
        let mut reader = XseReader::from_stream(stream, SessionConfig::default()).unwrap();
        let texts: Vec<String> = reader
            .records()
            .map(|r| r.unwrap().comment.text)
            .collect();
        assert_eq!(texts, vec!["one", "two"]);
    }
}
