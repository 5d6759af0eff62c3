// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! XSE decoding integration tests.
//!
//! Tests cover:
//! - Resynchronizing past garbage between frames
//! - Byte-swapped streams
//! - Merging multibeam and sidescan frames into one ping
//! - Oversized frames and truncated streams

mod common;

use std::io::Cursor;

use common::*;
use sonarcodec::{CodecError, RecordKind, SessionConfig, WireOrder, XseReader};

fn reader_for(bytes: Vec<u8>, config: SessionConfig) -> XseReader<Cursor<Vec<u8>>> {
    XseReader::from_stream(Cursor::new(bytes), config).unwrap()
}

// ============================================================================
// Framing
// ============================================================================

#[test]
fn test_garbage_between_frames_is_skipped() {
    let mut bytes = b"junk at start".to_vec();
    bytes.extend(encode_all(&[comment_record(BASE_TIME, "first")], WireOrder::Native));
    bytes.extend(b"\x00\x01$HS-not-a-marker");
    bytes.extend(encode_all(&[comment_record(BASE_TIME, "second")], WireOrder::Native));

    let mut reader = reader_for(bytes, SessionConfig::default());
    assert_eq!(reader.read_ping().unwrap().comment.text, "first");
    assert_eq!(reader.read_ping().unwrap().comment.text, "second");
    assert!(reader.read_ping().unwrap_err().is_eof());
    assert_eq!(reader.bytes_skipped(), 13 + 18);
}

#[test]
fn test_swapped_stream_needs_swapped_config() {
    let bytes = encode_all(&sample_line(), WireOrder::Swapped);
    assert_eq!(&bytes[..4], b"FSH$");

    // wrong order never finds a start marker
    let mut wrong = reader_for(bytes.clone(), SessionConfig::default());
    assert!(wrong.read_ping().unwrap_err().is_eof());

    let mut reader = reader_for(bytes, SessionConfig::swapped());
    let kinds: Vec<RecordKind> = reader.records().map(|r| r.unwrap().kind).collect();
    assert_eq!(
        kinds,
        vec![
            RecordKind::VelocityProfile,
            RecordKind::Nav,
            RecordKind::Data,
            RecordKind::Data,
            RecordKind::Nav,
            RecordKind::Comment,
        ]
    );
}

#[test]
fn test_truncated_frame_is_eof() {
    let mut bytes = encode_all(&[comment_record(BASE_TIME, "cut short")], WireOrder::Native);
    bytes.truncate(bytes.len() - 6);
    let mut reader = reader_for(bytes, SessionConfig::default());
    assert!(matches!(reader.read_ping(), Err(CodecError::Eof)));
}

#[test]
fn test_oversized_frame_is_unintelligible() {
    let long = "x".repeat(150);
    let bytes = encode_all(
        &[
            comment_record(BASE_TIME, &long),
            comment_record(BASE_TIME, "short"),
        ],
        WireOrder::Native,
    );
    let config = SessionConfig {
        max_frame_size: 100,
        ..SessionConfig::default()
    };
    let mut reader = reader_for(bytes, config);
    let err = reader.read_ping().unwrap_err();
    assert!(matches!(err, CodecError::Unintelligible { .. }));
    // the scanner resynchronizes on the next start marker
    assert_eq!(reader.read_ping().unwrap().comment.text, "short");
}

// ============================================================================
// Ping Correlation
// ============================================================================

#[test]
fn test_survey_pings_are_merged() {
    let bytes = encode_all(&sample_line(), WireOrder::Native);
    let config = SessionConfig {
        interpolate_navigation: false,
        ..SessionConfig::default()
    };
    let mut reader = reader_for(bytes, config);

    reader.read_ping().unwrap();
    reader.read_ping().unwrap();
    let record = reader.read_ping().unwrap();
    assert_eq!(record.kind, RecordKind::Data);
    assert!(record.multibeam_present);
    assert!(record.sidescan_present);
    assert_eq!(record.ping_number(), Some(1));
    assert_eq!(record.multibeam.num_beams(), 3);
    assert_eq!(record.sidescan.ping, 1);
    assert_eq!(record.time_d(), Some(BASE_TIME + 2.0));
    // sound velocity persists from the profile frame
    assert_eq!(record.svp.ssv, 1500.0);

    let record = reader.read_ping().unwrap();
    assert_eq!(record.ping_number(), Some(2));
    assert_eq!(
        record.sidescan.amp_vs_lateral.as_ref().unwrap().samples,
        vec![1, 2, 3, 4, 5, 6]
    );
}

#[test]
fn test_multibeam_only_pings() {
    let records = vec![
        multibeam_record(BASE_TIME, 10, &[-5.0, 5.0], 30.0),
        multibeam_record(BASE_TIME + 1.0, 11, &[-5.0, 5.0], 31.0),
        multibeam_record(BASE_TIME + 2.0, 12, &[-5.0, 5.0], 32.0),
    ];
    let mut reader = reader_for(encode_all(&records, WireOrder::Native), SessionConfig::default());
    let pings: Vec<(i32, f64)> = reader
        .records()
        .map(|r| {
            let r = r.unwrap();
            (r.multibeam.ping, r.multibeam.beams[0].depth)
        })
        .collect();
    assert_eq!(pings, vec![(10, 30.0), (11, 31.0), (12, 32.0)]);
}

#[test]
fn test_comment_while_waiting_for_sidescan() {
    let multibeam_only = multibeam_record(BASE_TIME, 5, &[-3.0, 3.0], 20.0);
    let mut sidescan_only = survey_record(BASE_TIME, 5, &[-3.0, 3.0], &[1, 2, 3]);
    sidescan_only.multibeam_present = false;

    let bytes = encode_all(
        &[
            multibeam_only,
            comment_record(BASE_TIME, "note"),
            sidescan_only,
        ],
        WireOrder::Native,
    );

    let mut reader = reader_for(bytes, SessionConfig::default());
    assert_eq!(reader.read_ping().unwrap().kind, RecordKind::Comment);
    let record = reader.read_ping().unwrap();
    assert_eq!(record.kind, RecordKind::Data);
    assert!(record.multibeam_present && record.sidescan_present);
    assert_eq!(record.multibeam.ping, 5);
    assert!(reader.read_ping().unwrap_err().is_eof());
}

#[test]
fn test_correlator_state_is_per_session() {
    let bytes = encode_all(&[multibeam_record(BASE_TIME, 1, &[0.0, 1.0], 10.0)], WireOrder::Native);
    let mut first = reader_for(bytes.clone(), SessionConfig::default());
    let mut second = reader_for(bytes, SessionConfig::default());

    assert_eq!(first.read_ping().unwrap().multibeam.ping, 1);
    assert!(first.read_ping().unwrap_err().is_eof());
    assert_eq!(second.read_ping().unwrap().multibeam.ping, 1);
}

// ============================================================================
// Navigation Backfill
// ============================================================================

#[test]
fn test_pings_get_interpolated_navigation() {
    let records = vec![
        nav_record(BASE_TIME, 10.0, 50.0, 45.0, 2.0),
        nav_record(BASE_TIME + 10.0, 10.01, 50.01, 45.0, 2.0),
        multibeam_record(BASE_TIME + 5.0, 1, &[-1.0, 1.0], 15.0),
    ];
    let mut reader = reader_for(encode_all(&records, WireOrder::Native), SessionConfig::default());
    reader.read_ping().unwrap();
    reader.read_ping().unwrap();
    let nav = reader.read_ping().unwrap().multibeam.derived_nav.unwrap();
    assert!((nav.lon.to_degrees() - 10.005).abs() < 1e-9);
    assert!((nav.lat.to_degrees() - 50.005).abs() < 1e-9);
    assert!((nav.heading.to_degrees() - 45.0).abs() < 1e-9);
}
