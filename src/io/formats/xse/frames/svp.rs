// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Sound-velocity frame.
//!
//! Groups are not reset on entry: a profile frame replaces only the arrays
//! it carries.

use super::{read_array, stamp_of};
use crate::core::{Result, WireOrder};
use crate::io::formats::xse::constants::{FrameKind, MAX_SVP};
use crate::io::formats::xse::encoder::FrameEncoder;
use crate::io::formats::xse::group::{for_each_group, GroupOutcome};
use crate::io::formats::xse::record::SoundVelocityProfile;
use crate::io::formats::xse::scanner::RawFrame;

const GROUP_DEPTH: i32 = 2;
const GROUP_VELOCITY: i32 = 3;
const GROUP_CONDUCTIVITY: i32 = 4;
const GROUP_SALINITY: i32 = 5;
const GROUP_TEMPERATURE: i32 = 6;
const GROUP_PRESSURE: i32 = 7;
const GROUP_SSV: i32 = 8;

pub fn decode(frame: &RawFrame, order: WireOrder, out: &mut SoundVelocityProfile) -> Result<()> {
    out.stamp = stamp_of(frame);
    for_each_group(
        &frame.bytes,
        frame.header.body_offset(),
        order,
        "sound-velocity",
        |header, c| {
            let target = match header.id {
                GROUP_DEPTH => &mut out.depth,
                GROUP_VELOCITY => &mut out.velocity,
                GROUP_CONDUCTIVITY => &mut out.conductivity,
                GROUP_SALINITY => &mut out.salinity,
                GROUP_TEMPERATURE => &mut out.temperature,
                GROUP_PRESSURE => &mut out.pressure,
                GROUP_SSV => {
                    out.ssv = c.read_f64()?;
                    return Ok(GroupOutcome::Decoded);
                }
                _ => return Ok(GroupOutcome::Skipped),
            };
            let n = c.read_count()?;
            *target = read_array(c, n, MAX_SVP, ("sound-velocity", header.id), |c| {
                c.read_f64()
            })?;
            Ok(GroupOutcome::Decoded)
        },
    )
}

pub fn encode(svp: &SoundVelocityProfile, order: WireOrder) -> Vec<u8> {
    let mut enc = FrameEncoder::begin(order, FrameKind::SoundVelocity, &svp.stamp);
    for (id, values) in [(GROUP_DEPTH, &svp.depth), (GROUP_VELOCITY, &svp.velocity)] {
        if !values.is_empty() {
            put_series(&mut enc, id, values);
        }
    }
    for (id, values) in [
        (GROUP_CONDUCTIVITY, &svp.conductivity),
        (GROUP_SALINITY, &svp.salinity),
        (GROUP_TEMPERATURE, &svp.temperature),
        (GROUP_PRESSURE, &svp.pressure),
    ] {
        if values.iter().any(|&v| v != 0.0) {
            put_series(&mut enc, id, values);
        }
    }
    if svp.ssv > 0.0 {
        enc.group(GROUP_SSV, |e| e.put_f64(svp.ssv));
    }
    enc.finish()
}

fn put_series(enc: &mut FrameEncoder, id: i32, values: &[f64]) {
    let values = &values[..values.len().min(MAX_SVP)];
    enc.group(id, |e| {
        e.put_count(values.len());
        for &v in values {
            e.put_f64(v);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::formats::xse::record::Stamp;
    use crate::io::formats::xse::scanner::FrameScanner;
    use std::io::Cursor;

    fn decode_into(bytes: &[u8], out: &mut SoundVelocityProfile) {
        let mut scanner = FrameScanner::new(WireOrder::Native, 32000);
        let frame = scanner.read_frame(&mut Cursor::new(bytes)).unwrap();
        decode(&frame, WireOrder::Native, out).unwrap();
    }

    #[test]
    fn test_profile_survives_encoding() {
        let svp = SoundVelocityProfile {
            stamp: Stamp {
                source: 1,
                sec: 3_000_000_000,
                usec: 0,
            },
            depth: vec![0.0, 10.0, 100.0],
            velocity: vec![1500.0, 1495.5, 1490.25],
            temperature: vec![12.0, 11.0, 4.0],
            ssv: 1501.0,
            ..SoundVelocityProfile::default()
        };
        let mut out = SoundVelocityProfile::default();
        decode_into(&encode(&svp, WireOrder::Native), &mut out);
        assert_eq!(out, svp);
    }

    #[test]
    fn test_all_zero_ctd_channel_not_written() {
        let svp = SoundVelocityProfile {
            depth: vec![1.0],
            velocity: vec![1500.0],
            salinity: vec![0.0],
            ..SoundVelocityProfile::default()
        };
        let mut out = SoundVelocityProfile::default();
        decode_into(&encode(&svp, WireOrder::Native), &mut out);
        assert!(out.salinity.is_empty());
        assert_eq!(out.ssv, 0.0);
    }

    #[test]
    fn test_missing_groups_keep_previous_values() {
        let mut out = SoundVelocityProfile {
            temperature: vec![9.0],
            ..SoundVelocityProfile::default()
        };
        let svp = SoundVelocityProfile {
            depth: vec![5.0],
            velocity: vec![1499.0],
            ..SoundVelocityProfile::default()
        };
        decode_into(&encode(&svp, WireOrder::Native), &mut out);
        assert_eq!(out.depth, vec![5.0]);
        assert_eq!(out.temperature, vec![9.0]);
    }
}
