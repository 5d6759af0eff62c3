// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use sonarcodec::io::formats::xse::encoder::encode_record;
use sonarcodec::io::formats::xse::record::{
    Beam, LateralSeries, Motion, NavPosition, SoundVelocityProfile, Stamp,
};
use sonarcodec::io::formats::xse::scanner::wire_time;
use sonarcodec::{RecordKind, WireOrder, XseRecord};

/// 2021-01-01T00:00:00Z
pub const BASE_TIME: f64 = 1_609_459_200.0;

// ============================================================================
// Temporary Files
// ============================================================================

/// Cleanup guard for test temporary files
pub struct CleanupGuard(PathBuf);

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

/// Create a temporary file path with cleanup guard
pub fn temp_path(name: &str) -> (PathBuf, CleanupGuard) {
    let random = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    let dir = std::env::temp_dir().join(format!(
        "sonarcodec_{}_{}_{}",
        name.replace('.', "_"),
        std::process::id(),
        random
    ));
    fs::create_dir_all(&dir).ok();
    let path = dir.join(name);
    (path, CleanupGuard(dir))
}

// ============================================================================
// Record Builders
// ============================================================================

/// Frame stamp for a Unix time.
pub fn stamp(time_d: f64) -> Stamp {
    let (sec, usec) = wire_time(time_d);
    Stamp {
        source: 1,
        sec,
        usec,
    }
}

/// Navigation fix in degrees, heading and course in degrees, speed in m/s.
pub fn nav_record(time_d: f64, lon: f64, lat: f64, heading: f64, speed: f64) -> XseRecord {
    let mut record = XseRecord::new();
    record.kind = RecordKind::Nav;
    record.nav.stamp = stamp(time_d);
    record.nav.position = Some(NavPosition {
        description: "gps".to_string(),
        x: lon.to_radians(),
        y: lat.to_radians(),
        z: 0.0,
    });
    record.nav.heading = Some(heading.to_radians());
    record.nav.motion_ground = Some(Motion {
        speed,
        course: heading.to_radians(),
    });
    record
}

/// Multibeam-only ping with one beam per lateral offset, all at `depth`.
pub fn multibeam_record(time_d: f64, ping: i32, laterals: &[f64], depth: f64) -> XseRecord {
    let mut record = XseRecord::new();
    record.kind = RecordKind::Data;
    record.multibeam_present = true;
    let mb = &mut record.multibeam;
    mb.stamp = stamp(time_d);
    mb.ping = ping;
    mb.beams = laterals
        .iter()
        .enumerate()
        .map(|(i, &lateral)| Beam {
            beam: i as i16 + 1,
            lateral,
            depth,
            quality: 1,
            ..Beam::default()
        })
        .collect();
    mb.groups.beam = true;
    mb.groups.lateral = true;
    mb.groups.depth = true;
    mb.groups.quality = true;
    record
}

/// Multibeam ping with a matching sidescan ping carrying lateral amplitudes.
pub fn survey_record(time_d: f64, ping: i32, laterals: &[f64], samples: &[i16]) -> XseRecord {
    let mut record = multibeam_record(time_d, ping, laterals, 40.0);
    record.sidescan_present = true;
    record.sidescan.stamp = stamp(time_d);
    record.sidescan.ping = ping;
    record.sidescan.amp_vs_lateral = Some(LateralSeries {
        bin_size: 500,
        offset: 0,
        samples: samples.to_vec(),
    });
    record
}

/// Sound-velocity profile with a constant speed.
pub fn svp_record(time_d: f64, depths: &[f64], speed: f64) -> XseRecord {
    let mut record = XseRecord::new();
    record.kind = RecordKind::VelocityProfile;
    record.svp = SoundVelocityProfile {
        stamp: stamp(time_d),
        depth: depths.to_vec(),
        velocity: vec![speed; depths.len()],
        ssv: speed,
        ..SoundVelocityProfile::default()
    };
    record
}

/// Comment record with a timestamp.
pub fn comment_record(time_d: f64, text: &str) -> XseRecord {
    let mut record = XseRecord::comment(text);
    record.comment.stamp = stamp(time_d);
    record
}

// ============================================================================
// Streams
// ============================================================================

/// Encode records back to back.
pub fn encode_all(records: &[XseRecord], order: WireOrder) -> Vec<u8> {
    records
        .iter()
        .flat_map(|r| encode_record(r, order).unwrap())
        .collect()
}

/// Write encoded records to a file.
pub fn write_file(path: &Path, records: &[XseRecord], order: WireOrder) {
    fs::write(path, encode_all(records, order)).unwrap();
}

/// A short survey line: svp, nav, two pings, nav, comment.
pub fn sample_line() -> Vec<XseRecord> {
    vec![
        svp_record(BASE_TIME, &[0.0, 10.0, 100.0], 1500.0),
        nav_record(BASE_TIME, 10.0, 50.0, 90.0, 2.0),
        survey_record(BASE_TIME + 2.0, 1, &[-10.0, 0.0, 10.0], &[0, 3, 5, 7, 0, 0]),
        survey_record(BASE_TIME + 4.0, 2, &[-12.0, 0.0, 12.0], &[1, 2, 3, 4, 5, 6]),
        nav_record(BASE_TIME + 10.0, 10.01, 50.0, 90.0, 2.0),
        comment_record(BASE_TIME + 11.0, "end of line"),
    ]
}
