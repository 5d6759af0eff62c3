// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Multibeam frame.
//!
//! Per-beam groups all share one layout: a count, then one value per beam.
//! Values land in `beams[i]` by position; the beam-number group is just
//! another field. Each group resets the beam count to its own. Derived quantities are filled in afterwards by
//! [`derive`](crate::io::formats::xse::derive).

use super::{stamp_of, warn_if_truncated};
use crate::core::{Result, WireOrder};
use crate::io::formats::xse::constants::{FrameKind, MAX_BEAMS};
use crate::io::formats::xse::encoder::FrameEncoder;
use crate::io::formats::xse::group::{for_each_group, GroupCursor, GroupOutcome};
use crate::io::formats::xse::record::{Beam, DerivedNav, MultibeamPing, MultibeamProperties};
use crate::io::formats::xse::scanner::RawFrame;

const GROUP_GENERAL: i32 = 1;
const GROUP_BEAM: i32 = 2;
const GROUP_TT: i32 = 3;
const GROUP_QUALITY: i32 = 4;
const GROUP_AMP: i32 = 5;
const GROUP_DELAY: i32 = 6;
const GROUP_LATERAL: i32 = 7;
const GROUP_ALONG: i32 = 8;
const GROUP_DEPTH: i32 = 9;
const GROUP_ANGLE: i32 = 10;
const GROUP_HEAVE: i32 = 11;
const GROUP_ROLL: i32 = 12;
const GROUP_PITCH: i32 = 13;
const GROUP_GATES: i32 = 14;
const GROUP_NOISE: i32 = 15;
const GROUP_LENGTH: i32 = 16;
const GROUP_HITS: i32 = 17;
const GROUP_HEAVE_RECEIVE: i32 = 18;
const GROUP_AZIMUTH: i32 = 19;
const GROUP_PROPERTIES: i32 = 20;
const GROUP_NORMALIZED_AMP: i32 = 21;
const GROUP_DERIVED_NAV: i32 = 99;

/// Read a per-beam group into `ping.beams` by position.
fn read_beams<T, R, S>(
    c: &mut GroupCursor<'_>,
    ping: &mut MultibeamPing,
    group: i32,
    mut read: R,
    mut set: S,
) -> Result<()>
where
    R: FnMut(&mut GroupCursor<'_>) -> Result<T>,
    S: FnMut(&mut Beam, T),
{
    let n = c.read_count()?;
    warn_if_truncated(n, MAX_BEAMS, ("multibeam", group));
    ping.beams.resize(n.min(MAX_BEAMS), Beam::default());
    for i in 0..n {
        let value = read(c)?;
        if let Some(beam) = ping.beams.get_mut(i) {
            set(beam, value);
        }
    }
    Ok(())
}

/// Decode a multibeam frame. Every group flag is cleared first.
pub fn decode(frame: &RawFrame, order: WireOrder, out: &mut MultibeamPing) -> Result<()> {
    out.clear_groups();
    out.stamp = stamp_of(frame);
    for_each_group(
        &frame.bytes,
        frame.header.body_offset(),
        order,
        "multibeam",
        |header, c| {
            let id = header.id;
            match id {
                GROUP_GENERAL => {
                    out.ping = c.read_i32()?;
                    out.frequency = c.read_f32()?;
                    out.pulse = c.read_f32()?;
                    out.power = c.read_f32()?;
                    out.bandwidth = c.read_f32()?;
                    out.sample = c.read_f32()?;
                    out.swath = c.read_f32()?;
                }
                GROUP_BEAM => {
                    read_beams(c, out, id, |c| c.read_i16(), |b, v| b.beam = v)?;
                    out.groups.beam = true;
                }
                GROUP_TT => {
                    read_beams(c, out, id, |c| c.read_f64(), |b, v| b.tt = v)?;
                    out.groups.tt = true;
                }
                GROUP_QUALITY => {
                    read_beams(c, out, id, |c| c.read_u8(), |b, v| b.quality = v)?;
                    out.groups.quality = true;
                }
                GROUP_AMP => {
                    read_beams(c, out, id, |c| c.read_i16(), |b, v| b.amplitude = v)?;
                    out.groups.amp = true;
                }
                GROUP_DELAY => {
                    read_beams(c, out, id, |c| c.read_f64(), |b, v| b.delay = v)?;
                    out.groups.delay = true;
                }
                GROUP_LATERAL => {
                    read_beams(c, out, id, |c| c.read_f64(), |b, v| b.lateral = v)?;
                    out.groups.lateral = true;
                }
                GROUP_ALONG => {
                    read_beams(c, out, id, |c| c.read_f64(), |b, v| b.along = v)?;
                    out.groups.along = true;
                }
                GROUP_DEPTH => {
                    read_beams(c, out, id, |c| c.read_f64(), |b, v| b.depth = v)?;
                    out.groups.depth = true;
                }
                GROUP_ANGLE => {
                    read_beams(c, out, id, |c| c.read_f64(), |b, v| b.angle = v)?;
                    out.groups.angle = true;
                }
                GROUP_HEAVE => {
                    read_beams(c, out, id, |c| c.read_f64(), |b, v| b.heave = v)?;
                    out.groups.heave = true;
                }
                GROUP_ROLL => {
                    read_beams(c, out, id, |c| c.read_f64(), |b, v| b.roll = v)?;
                    out.groups.roll = true;
                }
                GROUP_PITCH => {
                    read_beams(c, out, id, |c| c.read_f64(), |b, v| b.pitch = v)?;
                    out.groups.pitch = true;
                }
                GROUP_GATES => {
                    read_beams(
                        c,
                        out,
                        id,
                        |c| Ok((c.read_f64()?, c.read_f64()?, c.read_f64()?)),
                        |b, (angle, start, stop)| {
                            b.gate_angle = angle;
                            b.gate_start = start;
                            b.gate_stop = stop;
                        },
                    )?;
                    out.groups.gates = true;
                }
                GROUP_NOISE => {
                    read_beams(c, out, id, |c| c.read_f32(), |b, v| b.noise = v)?;
                    out.groups.noise = true;
                }
                GROUP_LENGTH => {
                    read_beams(c, out, id, |c| c.read_f32(), |b, v| b.length = v)?;
                    out.groups.length = true;
                }
                GROUP_HITS => {
                    read_beams(c, out, id, |c| c.read_u32(), |b, v| b.hits = v)?;
                    out.groups.hits = true;
                }
                GROUP_HEAVE_RECEIVE => {
                    read_beams(c, out, id, |c| c.read_f64(), |b, v| b.heave_receive = v)?;
                    out.groups.heave_receive = true;
                }
                GROUP_AZIMUTH => {
                    read_beams(c, out, id, |c| c.read_f64(), |b, v| b.azimuth = v)?;
                    out.groups.azimuth = true;
                }
                GROUP_NORMALIZED_AMP => {
                    read_beams(c, out, id, |c| c.read_i16(), |b, v| {
                        b.normalized_amplitude = v
                    })?;
                    out.groups.normalized_amplitude = true;
                }
                GROUP_PROPERTIES => {
                    out.properties = Some(MultibeamProperties {
                        beam_width_along: c.read_f32()?,
                        beam_width_across: c.read_f32()?,
                        ping_mode: c.read_i32()?,
                        spacing_mode: c.read_i32()?,
                    });
                }
                GROUP_DERIVED_NAV => {
                    out.derived_nav = Some(DerivedNav {
                        lon: c.read_f64()?,
                        lat: c.read_f64()?,
                        heading: c.read_f64()?,
                        speed: c.read_f64()?,
                    });
                }
                _ => return Ok(GroupOutcome::Skipped),
            }
            Ok(GroupOutcome::Decoded)
        },
    )
}

/// Write one per-beam group when its flag is set.
fn put_beams<F>(enc: &mut FrameEncoder, present: bool, id: i32, beams: &[Beam], mut put: F)
where
    F: FnMut(&mut FrameEncoder, &Beam),
{
    if !present {
        return;
    }
    enc.group(id, |e| {
        e.put_count(beams.len());
        for b in beams {
            put(e, b);
        }
    });
}

pub fn encode(ping: &MultibeamPing, order: WireOrder) -> Vec<u8> {
    let mut enc = FrameEncoder::begin(order, FrameKind::Multibeam, &ping.stamp);
    enc.group(GROUP_GENERAL, |e| {
        e.put_i32(ping.ping);
        for v in [
            ping.frequency,
            ping.pulse,
            ping.power,
            ping.bandwidth,
            ping.sample,
            ping.swath,
        ] {
            e.put_f32(v);
        }
    });

    let g = &ping.groups;
    let beams = &ping.beams[..ping.beams.len().min(MAX_BEAMS)];
    put_beams(&mut enc, g.beam, GROUP_BEAM, beams, |e, b| e.put_i16(b.beam));
    put_beams(&mut enc, g.tt, GROUP_TT, beams, |e, b| e.put_f64(b.tt));
    put_beams(&mut enc, g.quality, GROUP_QUALITY, beams, |e, b| e.put_u8(b.quality));
    put_beams(&mut enc, g.amp, GROUP_AMP, beams, |e, b| e.put_i16(b.amplitude));
    put_beams(&mut enc, g.delay, GROUP_DELAY, beams, |e, b| e.put_f64(b.delay));
    put_beams(&mut enc, g.lateral, GROUP_LATERAL, beams, |e, b| e.put_f64(b.lateral));
    put_beams(&mut enc, g.along, GROUP_ALONG, beams, |e, b| e.put_f64(b.along));
    put_beams(&mut enc, g.depth, GROUP_DEPTH, beams, |e, b| e.put_f64(b.depth));
    put_beams(&mut enc, g.angle, GROUP_ANGLE, beams, |e, b| e.put_f64(b.angle));
    put_beams(&mut enc, g.heave, GROUP_HEAVE, beams, |e, b| e.put_f64(b.heave));
    put_beams(&mut enc, g.roll, GROUP_ROLL, beams, |e, b| e.put_f64(b.roll));
    put_beams(&mut enc, g.pitch, GROUP_PITCH, beams, |e, b| e.put_f64(b.pitch));
    put_beams(&mut enc, g.gates, GROUP_GATES, beams, |e, b| {
        e.put_f64(b.gate_angle);
        e.put_f64(b.gate_start);
        e.put_f64(b.gate_stop);
    });
    put_beams(&mut enc, g.noise, GROUP_NOISE, beams, |e, b| e.put_f32(b.noise));
    put_beams(&mut enc, g.length, GROUP_LENGTH, beams, |e, b| e.put_f32(b.length));
    put_beams(&mut enc, g.hits, GROUP_HITS, beams, |e, b| e.put_u32(b.hits));
    put_beams(&mut enc, g.heave_receive, GROUP_HEAVE_RECEIVE, beams, |e, b| {
        e.put_f64(b.heave_receive)
    });
    put_beams(&mut enc, g.azimuth, GROUP_AZIMUTH, beams, |e, b| e.put_f64(b.azimuth));

    if let Some(p) = ping.properties {
        enc.group(GROUP_PROPERTIES, |e| {
            e.put_f32(p.beam_width_along);
            e.put_f32(p.beam_width_across);
            e.put_i32(p.ping_mode);
            e.put_i32(p.spacing_mode);
        });
    }
    put_beams(&mut enc, g.normalized_amplitude, GROUP_NORMALIZED_AMP, beams, |e, b| {
        e.put_i16(b.normalized_amplitude)
    });
    if let Some(n) = ping.derived_nav {
        enc.group(GROUP_DERIVED_NAV, |e| {
            e.put_f64(n.lon);
            e.put_f64(n.lat);
            e.put_f64(n.heading);
            e.put_f64(n.speed);
        });
    }
    enc.finish()
}
