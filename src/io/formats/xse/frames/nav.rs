// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Navigation frame.

use super::{read_text, stamp_of, truncate_text};
use crate::core::{Result, WireOrder};
use crate::io::formats::xse::constants::{FrameKind, MAX_DESCRIPTION};
use crate::io::formats::xse::encoder::FrameEncoder;
use crate::io::formats::xse::group::{for_each_group, GroupCursor, GroupOutcome};
use crate::io::formats::xse::record::{
    Attitude, Motion, NavAccuracy, NavFields, NavGeneral, NavGps, NavPosition, NavTrack,
};
use crate::io::formats::xse::scanner::RawFrame;

const GROUP_GENERAL: i32 = 1;
const GROUP_POSITION: i32 = 2;
const GROUP_ACCURACY: i32 = 3;
const GROUP_MOTION_GROUND: i32 = 4;
const GROUP_MOTION_WATER: i32 = 5;
const GROUP_TRACK: i32 = 6;
const GROUP_HRP: i32 = 7;
const GROUP_HEAVE: i32 = 8;
const GROUP_ROLL: i32 = 9;
const GROUP_PITCH: i32 = 10;
const GROUP_HEADING: i32 = 11;
const GROUP_LOG: i32 = 12;
const GROUP_GPS: i32 = 13;

fn read_motion(c: &mut GroupCursor<'_>) -> Result<Motion> {
    Ok(Motion {
        speed: c.read_f64()?,
        course: c.read_f64()?,
    })
}

/// Decode a navigation frame. Every group is cleared first.
pub fn decode(frame: &RawFrame, order: WireOrder, out: &mut NavFields) -> Result<()> {
    out.clear_groups();
    out.stamp = stamp_of(frame);
    for_each_group(
        &frame.bytes,
        frame.header.body_offset(),
        order,
        "navigation",
        |header, c| {
            match header.id {
                GROUP_GENERAL => {
                    out.general = Some(NavGeneral {
                        quality: c.read_i32()?,
                        status: c.read_i32()?,
                    });
                }
                GROUP_POSITION => {
                    let len = c.read_count()?;
                    let description = read_text(c, len, MAX_DESCRIPTION)?;
                    out.position = Some(NavPosition {
                        description,
                        x: c.read_f64()?,
                        y: c.read_f64()?,
                        z: c.read_f64()?,
                    });
                }
                GROUP_ACCURACY => {
                    out.accuracy = Some(NavAccuracy {
                        quality: c.read_i32()?,
                        num_satellites: c.read_u8()?,
                        horizontal_dilution: c.read_f32()?,
                        diff_age: c.read_f32()?,
                        diff_ref: c.read_u32()?,
                    });
                }
                GROUP_MOTION_GROUND => out.motion_ground = Some(read_motion(c)?),
                GROUP_MOTION_WATER => out.motion_water = Some(read_motion(c)?),
                GROUP_TRACK => {
                    out.track = Some(NavTrack {
                        offset_track: c.read_f64()?,
                        offset_sol: c.read_f64()?,
                        offset_eol: c.read_f64()?,
                        distance_sol: c.read_f64()?,
                        azimuth_sol: c.read_f64()?,
                        distance_eol: c.read_f64()?,
                        azimuth_eol: c.read_f64()?,
                    });
                }
                GROUP_HRP => {
                    out.hrp = Some(Attitude {
                        heave: c.read_f64()?,
                        roll: c.read_f64()?,
                        pitch: c.read_f64()?,
                    });
                }
                GROUP_HEAVE => out.heave = Some(c.read_f64()?),
                GROUP_ROLL => out.roll = Some(c.read_f64()?),
                GROUP_PITCH => out.pitch = Some(c.read_f64()?),
                GROUP_HEADING => out.heading = Some(c.read_f64()?),
                GROUP_LOG => out.log_speed = Some(c.read_f64()?),
                GROUP_GPS => {
                    out.gps = Some(NavGps {
                        altitude: c.read_f32()?,
                        geoidal_separation: c.read_f32()?,
                    });
                }
                _ => return Ok(GroupOutcome::Skipped),
            }
            Ok(GroupOutcome::Decoded)
        },
    )
}

/// Encode the groups that are present.
pub fn encode(nav: &NavFields, order: WireOrder) -> Vec<u8> {
    let mut enc = FrameEncoder::begin(order, FrameKind::Navigation, &nav.stamp);
    if let Some(g) = nav.general {
        enc.group(GROUP_GENERAL, |e| {
            e.put_i32(g.quality);
            e.put_i32(g.status);
        });
    }
    if let Some(p) = &nav.position {
        let description = truncate_text(&p.description, MAX_DESCRIPTION).as_bytes();
        enc.group(GROUP_POSITION, |e| {
            e.put_count(description.len());
            e.put_bytes(description);
            e.put_f64(p.x);
            e.put_f64(p.y);
            e.put_f64(p.z);
        });
    }
    if let Some(a) = nav.accuracy {
        enc.group(GROUP_ACCURACY, |e| {
            e.put_i32(a.quality);
            e.put_u8(a.num_satellites);
            e.put_f32(a.horizontal_dilution);
            e.put_f32(a.diff_age);
            e.put_u32(a.diff_ref);
        });
    }
    for (id, motion) in [
        (GROUP_MOTION_GROUND, nav.motion_ground),
        (GROUP_MOTION_WATER, nav.motion_water),
    ] {
        if let Some(m) = motion {
            enc.group(id, |e| {
                e.put_f64(m.speed);
                e.put_f64(m.course);
            });
        }
    }
    if let Some(t) = nav.track {
        enc.group(GROUP_TRACK, |e| {
            for v in [
                t.offset_track,
                t.offset_sol,
                t.offset_eol,
                t.distance_sol,
                t.azimuth_sol,
                t.distance_eol,
                t.azimuth_eol,
            ] {
                e.put_f64(v);
            }
        });
    }
    if let Some(h) = nav.hrp {
        enc.group(GROUP_HRP, |e| {
            e.put_f64(h.heave);
            e.put_f64(h.roll);
            e.put_f64(h.pitch);
        });
    }
    for (id, value) in [
        (GROUP_HEAVE, nav.heave),
        (GROUP_ROLL, nav.roll),
        (GROUP_PITCH, nav.pitch),
        (GROUP_HEADING, nav.heading),
        (GROUP_LOG, nav.log_speed),
    ] {
        if let Some(v) = value {
            enc.group(id, |e| e.put_f64(v));
        }
    }
    if let Some(g) = nav.gps {
        enc.group(GROUP_GPS, |e| {
            e.put_f32(g.altitude);
            e.put_f32(g.geoidal_separation);
        });
    }
    enc.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::formats::xse::record::Stamp;
    use crate::io::formats::xse::scanner::FrameScanner;
    use std::io::Cursor;

    fn decode_bytes(bytes: &[u8], order: WireOrder) -> NavFields {
        let mut scanner = FrameScanner::new(order, 32000);
        let frame = scanner.read_frame(&mut Cursor::new(bytes)).unwrap();
        let mut out = NavFields::default();
        decode(&frame, order, &mut out).unwrap();
        out
    }

    fn sample() -> NavFields {
        NavFields {
            stamp: Stamp {
                source: 2,
                sec: 3_100_000_000,
                usec: 10,
            },
            position: Some(NavPosition {
                description: "DGPS".to_string(),
                x: -1.2,
                y: 0.7,
                z: 3.0,
            }),
            accuracy: Some(NavAccuracy {
                quality: 4,
                num_satellites: 9,
                horizontal_dilution: 1.25,
                diff_age: 2.5,
                diff_ref: 77,
            }),
            motion_ground: Some(Motion {
                speed: 4.0,
                course: 0.5,
            }),
            heading: Some(0.25),
            log_speed: Some(3.5),
            gps: Some(NavGps {
                altitude: 10.0,
                geoidal_separation: -2.0,
            }),
            ..NavFields::default()
        }
    }

    #[test]
    fn test_present_groups_survive() {
        for order in [WireOrder::Native, WireOrder::Swapped] {
            let nav = sample();
            let out = decode_bytes(&encode(&nav, order), order);
            assert_eq!(out, nav);
        }
    }

    #[test]
    fn test_decode_clears_previous_groups() {
        let mut out = sample();
        let bare = NavFields {
            stamp: out.stamp,
            heave: Some(0.1),
            ..NavFields::default()
        };
        let bytes = encode(&bare, WireOrder::Native);
        let mut scanner = FrameScanner::new(WireOrder::Native, 32000);
        let frame = scanner.read_frame(&mut Cursor::new(&bytes)).unwrap();
        decode(&frame, WireOrder::Native, &mut out).unwrap();
        assert!(out.position.is_none());
        assert!(out.motion_ground.is_none());
        assert_eq!(out.heave, Some(0.1));
    }
}
