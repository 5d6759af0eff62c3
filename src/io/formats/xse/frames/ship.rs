// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Ship frame: vessel description and sensor installation.
//!
//! Like the sound-velocity frame, groups persist across ship frames.

use super::{read_array, read_text, stamp_of, truncate_text, warn_if_truncated};
use crate::core::{Result, WireOrder};
use crate::io::formats::xse::constants::{FrameKind, MAX_DESCRIPTION, MAX_SENSORS, MAX_TRANSDUCERS};
use crate::io::formats::xse::encoder::FrameEncoder;
use crate::io::formats::xse::group::{for_each_group, GroupCursor, GroupOutcome};
use crate::io::formats::xse::record::{
    NavigationMotion, Sensor, ShipGeneral, ShipOffsets, ShipParameters, Transducer,
    TransducerExtended,
};
use crate::io::formats::xse::scanner::RawFrame;

const GROUP_GENERAL: i32 = 1;
const GROUP_SENSORS: i32 = 4;
const GROUP_PARAMETER: i32 = 8;
const GROUP_NAVIGATION_MOTION: i32 = 9;
const GROUP_TRANSDUCER: i32 = 10;
const GROUP_TRANSDUCER_EXTENDED: i32 = 11;

const EXTENDED_RESERVED: usize = 48;

fn read_f32s<const N: usize>(c: &mut GroupCursor<'_>) -> Result<[f32; N]> {
    let mut out = [0f32; N];
    for v in out.iter_mut() {
        *v = c.read_f32()?;
    }
    Ok(out)
}

fn read_f64s<const N: usize>(c: &mut GroupCursor<'_>) -> Result<[f64; N]> {
    let mut out = [0f64; N];
    for v in out.iter_mut() {
        *v = c.read_f64()?;
    }
    Ok(out)
}

fn read_sensors(c: &mut GroupCursor<'_>) -> Result<Vec<Sensor>> {
    let n = c.read_count()?;
    warn_if_truncated(n, MAX_SENSORS, ("ship", GROUP_SENSORS));
    // ids, kinds and frequencies are stored as three consecutive columns
    let mut columns: [Vec<i32>; 3] = Default::default();
    for column in columns.iter_mut() {
        for i in 0..n {
            let value = c.read_i32()?;
            if i < MAX_SENSORS {
                column.push(value);
            }
        }
    }
    let [ids, kinds, freqs] = columns;
    Ok(ids
        .into_iter()
        .zip(kinds)
        .zip(freqs)
        .map(|((id, kind), frequency)| Sensor {
            id,
            kind,
            frequency,
        })
        .collect())
}

fn read_transducer(c: &mut GroupCursor<'_>) -> Result<Transducer> {
    let sensor_id = c.read_i32()?;
    let frequency = c.read_u32()?;
    let transducer = c.read_u8()?;
    let side = c.read_u8()?;
    let [mounting_roll, mounting_pitch, mounting_azimuth, mounting_distance, x, y, z, roll, pitch, azimuth] =
        read_f64s::<10>(c)?;
    Ok(Transducer {
        sensor_id,
        transducer,
        frequency,
        side,
        mounting_roll,
        mounting_pitch,
        mounting_azimuth,
        mounting_distance,
        x,
        y,
        z,
        roll,
        pitch,
        azimuth,
    })
}

pub fn decode(frame: &RawFrame, order: WireOrder, out: &mut ShipParameters) -> Result<()> {
    out.stamp = stamp_of(frame);
    for_each_group(
        &frame.bytes,
        frame.header.body_offset(),
        order,
        "ship",
        |header, c| {
            match header.id {
                GROUP_GENERAL => {
                    let len = c.read_count()?;
                    let name = read_text(c, len, MAX_DESCRIPTION)?;
                    let [length, beam, draft, height, displacement, weight] = read_f64s::<6>(c)?;
                    out.general = Some(ShipGeneral {
                        name,
                        length,
                        beam,
                        draft,
                        height,
                        displacement,
                        weight,
                    });
                }
                GROUP_SENSORS => out.sensors = read_sensors(c)?,
                GROUP_PARAMETER => {
                    let v = read_f32s::<18>(c)?;
                    out.offsets = Some(ShipOffsets {
                        roll_bias: v[0],
                        pitch_bias: v[1],
                        heading_bias: v[2],
                        time_delay: v[3],
                        trans_x_port: v[4],
                        trans_y_port: v[5],
                        trans_z_port: v[6],
                        trans_x_stbd: v[7],
                        trans_y_stbd: v[8],
                        trans_z_stbd: v[9],
                        trans_err_port: v[10],
                        trans_err_stbd: v[11],
                        nav_x: v[12],
                        nav_y: v[13],
                        nav_z: v[14],
                        hrp_x: v[15],
                        hrp_y: v[16],
                        hrp_z: v[17],
                    });
                }
                GROUP_NAVIGATION_MOTION => {
                    let v = read_f64s::<11>(c)?;
                    out.navigation_motion = Some(NavigationMotion {
                        roll_bias: v[0],
                        pitch_bias: v[1],
                        heave_bias: v[2],
                        heading_bias: v[3],
                        time_delay: v[4],
                        nav_x: v[5],
                        nav_y: v[6],
                        nav_z: v[7],
                        hrp_x: v[8],
                        hrp_y: v[9],
                        hrp_z: v[10],
                    });
                }
                GROUP_TRANSDUCER => {
                    let n = c.read_count()?;
                    out.transducers = read_array(
                        c,
                        n,
                        MAX_TRANSDUCERS,
                        ("ship", GROUP_TRANSDUCER),
                        read_transducer,
                    )?;
                }
                GROUP_TRANSDUCER_EXTENDED => {
                    let n = c.read_count()?;
                    out.transducers_extended = read_array(
                        c,
                        n,
                        MAX_TRANSDUCERS,
                        ("ship", GROUP_TRANSDUCER_EXTENDED),
                        |c| {
                            let item = TransducerExtended {
                                roll: c.read_u8()?,
                                pitch: c.read_u8()?,
                                azimuth: c.read_u8()?,
                            };
                            c.skip(EXTENDED_RESERVED)?;
                            Ok(item)
                        },
                    )?;
                }
                _ => return Ok(GroupOutcome::Skipped),
            }
            Ok(GroupOutcome::Decoded)
        },
    )
}

pub fn encode(ship: &ShipParameters, order: WireOrder) -> Vec<u8> {
    let mut enc = FrameEncoder::begin(order, FrameKind::Ship, &ship.stamp);
    if let Some(g) = &ship.general {
        let name = truncate_text(&g.name, MAX_DESCRIPTION).as_bytes();
        enc.group(GROUP_GENERAL, |e| {
            e.put_count(name.len());
            e.put_bytes(name);
            for v in [g.length, g.beam, g.draft, g.height, g.displacement, g.weight] {
                e.put_f64(v);
            }
        });
    }
    if !ship.sensors.is_empty() {
        let sensors = &ship.sensors[..ship.sensors.len().min(MAX_SENSORS)];
        enc.group(GROUP_SENSORS, |e| {
            e.put_count(sensors.len());
            sensors.iter().for_each(|s| e.put_i32(s.id));
            sensors.iter().for_each(|s| e.put_i32(s.kind));
            sensors.iter().for_each(|s| e.put_i32(s.frequency));
        });
    }
    if let Some(o) = ship.offsets {
        enc.group(GROUP_PARAMETER, |e| {
            for v in [
                o.roll_bias,
                o.pitch_bias,
                o.heading_bias,
                o.time_delay,
                o.trans_x_port,
                o.trans_y_port,
                o.trans_z_port,
                o.trans_x_stbd,
                o.trans_y_stbd,
                o.trans_z_stbd,
                o.trans_err_port,
                o.trans_err_stbd,
                o.nav_x,
                o.nav_y,
                o.nav_z,
                o.hrp_x,
                o.hrp_y,
                o.hrp_z,
            ] {
                e.put_f32(v);
            }
        });
    }
    if let Some(m) = ship.navigation_motion {
        enc.group(GROUP_NAVIGATION_MOTION, |e| {
            for v in [
                m.roll_bias,
                m.pitch_bias,
                m.heave_bias,
                m.heading_bias,
                m.time_delay,
                m.nav_x,
                m.nav_y,
                m.nav_z,
                m.hrp_x,
                m.hrp_y,
                m.hrp_z,
            ] {
                e.put_f64(v);
            }
        });
    }
    if !ship.transducers.is_empty() {
        let items = &ship.transducers[..ship.transducers.len().min(MAX_TRANSDUCERS)];
        enc.group(GROUP_TRANSDUCER, |e| {
            e.put_count(items.len());
            for t in items {
                e.put_i32(t.sensor_id);
                e.put_u32(t.frequency);
                e.put_u8(t.transducer);
                e.put_u8(t.side);
                for v in [
                    t.mounting_roll,
                    t.mounting_pitch,
                    t.mounting_azimuth,
                    t.mounting_distance,
                    t.x,
                    t.y,
                    t.z,
                    t.roll,
                    t.pitch,
                    t.azimuth,
                ] {
                    e.put_f64(v);
                }
            }
        });
    }
    if !ship.transducers_extended.is_empty() {
        let items =
            &ship.transducers_extended[..ship.transducers_extended.len().min(MAX_TRANSDUCERS)];
        enc.group(GROUP_TRANSDUCER_EXTENDED, |e| {
            e.put_count(items.len());
            for t in items {
                e.put_u8(t.roll);
                e.put_u8(t.pitch);
                e.put_u8(t.azimuth);
                e.put_bytes(&[0u8; EXTENDED_RESERVED]);
            }
        });
    }
    enc.finish()
}
