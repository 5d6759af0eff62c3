// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Sidescan frame.

use super::{read_array, stamp_of, text_from_bytes, truncate_text};
use crate::core::{Result, WireOrder};
use crate::io::formats::xse::constants::{FrameKind, MAX_PULSE_NAME, MAX_SAMPLES};
use crate::io::formats::xse::encoder::FrameEncoder;
use crate::io::formats::xse::group::{for_each_group, GroupCursor, GroupOutcome};
use crate::io::formats::xse::record::{
    ComplexSignal, LateralSeries, PingType, Signal, SidescanPing, TimeSeries, Weighting,
};
use crate::io::formats::xse::scanner::RawFrame;

const GROUP_GENERAL: i32 = 1;
const GROUP_AMP_VS_TIME: i32 = 2;
const GROUP_PHASE_VS_TIME: i32 = 3;
const GROUP_AMP_VS_LATERAL: i32 = 4;
const GROUP_PHASE_VS_LATERAL: i32 = 5;
const GROUP_SIGNAL: i32 = 6;
const GROUP_PING_TYPE: i32 = 7;
const GROUP_COMPLEX_SIGNAL: i32 = 8;
const GROUP_WEIGHTING: i32 = 9;

/// Fixed fields of the ping-type group ahead of the pulse name.
const PING_TYPE_FIXED: usize = 36;

fn read_samples(c: &mut GroupCursor<'_>, group: i32) -> Result<Vec<i16>> {
    let n = c.read_count()?;
    read_array(c, n, MAX_SAMPLES, ("sidescan", group), |c| c.read_i16())
}

fn read_time_series(c: &mut GroupCursor<'_>, group: i32) -> Result<TimeSeries> {
    Ok(TimeSeries {
        sample_us: c.read_i32()?,
        offset: c.read_i32()?,
        samples: read_samples(c, group)?,
    })
}

fn read_lateral_series(c: &mut GroupCursor<'_>, group: i32) -> Result<LateralSeries> {
    Ok(LateralSeries {
        bin_size: c.read_i32()?,
        offset: c.read_i32()?,
        samples: read_samples(c, group)?,
    })
}

/// Decode a sidescan frame. Every group is cleared first.
pub fn decode(frame: &RawFrame, order: WireOrder, out: &mut SidescanPing) -> Result<()> {
    out.clear_groups();
    out.stamp = stamp_of(frame);
    for_each_group(
        &frame.bytes,
        frame.header.body_offset(),
        order,
        "sidescan",
        |header, c| {
            match header.id {
                GROUP_GENERAL => {
                    out.ping = c.read_i32()?;
                    out.frequency = c.read_f32()?;
                    out.pulse = c.read_f32()?;
                    out.power = c.read_f32()?;
                    out.bandwidth = c.read_f32()?;
                    out.sample = c.read_f32()?;
                }
                GROUP_AMP_VS_TIME => out.amp_vs_time = Some(read_time_series(c, header.id)?),
                GROUP_PHASE_VS_TIME => out.phase_vs_time = Some(read_time_series(c, header.id)?),
                GROUP_AMP_VS_LATERAL => {
                    out.amp_vs_lateral = Some(read_lateral_series(c, header.id)?)
                }
                GROUP_PHASE_VS_LATERAL => {
                    out.phase_vs_lateral = Some(read_lateral_series(c, header.id)?)
                }
                GROUP_SIGNAL => {
                    out.signal = Some(Signal {
                        ping: c.read_i32()?,
                        channel: c.read_i32()?,
                        offset: c.read_f64()?,
                        sample: c.read_f64()?,
                        samples: read_samples(c, header.id)?,
                    });
                }
                GROUP_PING_TYPE => {
                    let pulse = c.read_u32()?;
                    let start_frequency = c.read_f64()?;
                    let end_frequency = c.read_f64()?;
                    let duration = c.read_f64()?;
                    let mancode = c.read_i32()?;
                    let pulse_id = c.read_u32()?;
                    let len = header
                        .payload_len()
                        .saturating_sub(PING_TYPE_FIXED)
                        .min(c.remaining());
                    let name = c.read_bytes(len)?;
                    out.ping_type = Some(PingType {
                        pulse,
                        start_frequency,
                        end_frequency,
                        duration,
                        mancode,
                        pulse_id,
                        pulse_name: text_from_bytes(&name[..len.min(MAX_PULSE_NAME)]),
                    });
                }
                GROUP_COMPLEX_SIGNAL => {
                    let ping = c.read_i32()?;
                    let channel = c.read_i32()?;
                    let offset = c.read_f64()?;
                    let sample = c.read_f64()?;
                    let n = c.read_count()?;
                    let samples = read_array(c, n, MAX_SAMPLES, ("sidescan", header.id), |c| {
                        Ok((c.read_i16()?, c.read_i16()?))
                    })?;
                    out.complex_signal = Some(ComplexSignal {
                        ping,
                        channel,
                        offset,
                        sample,
                        samples,
                    });
                }
                GROUP_WEIGHTING => {
                    out.weighting = Some(Weighting {
                        factor_left: c.read_i16()?,
                        samples_left: c.read_u32()?,
                        factor_right: c.read_i16()?,
                        samples_right: c.read_u32()?,
                    });
                }
                _ => return Ok(GroupOutcome::Skipped),
            }
            Ok(GroupOutcome::Decoded)
        },
    )
}

fn put_samples(e: &mut FrameEncoder, samples: &[i16]) {
    let samples = &samples[..samples.len().min(MAX_SAMPLES)];
    e.put_count(samples.len());
    for &s in samples {
        e.put_i16(s);
    }
}

pub fn encode(ping: &SidescanPing, order: WireOrder) -> Vec<u8> {
    let mut enc = FrameEncoder::begin(order, FrameKind::Sidescan, &ping.stamp);
    enc.group(GROUP_GENERAL, |e| {
        e.put_i32(ping.ping);
        for v in [
            ping.frequency,
            ping.pulse,
            ping.power,
            ping.bandwidth,
            ping.sample,
        ] {
            e.put_f32(v);
        }
    });
    for (id, series) in [
        (GROUP_AMP_VS_TIME, &ping.amp_vs_time),
        (GROUP_PHASE_VS_TIME, &ping.phase_vs_time),
    ] {
        if let Some(s) = series {
            enc.group(id, |e| {
                e.put_i32(s.sample_us);
                e.put_i32(s.offset);
                put_samples(e, &s.samples);
            });
        }
    }
    for (id, series) in [
        (GROUP_AMP_VS_LATERAL, &ping.amp_vs_lateral),
        (GROUP_PHASE_VS_LATERAL, &ping.phase_vs_lateral),
    ] {
        if let Some(s) = series {
            enc.group(id, |e| {
                e.put_i32(s.bin_size);
                e.put_i32(s.offset);
                put_samples(e, &s.samples);
            });
        }
    }
    if let Some(s) = &ping.signal {
        enc.group(GROUP_SIGNAL, |e| {
            e.put_i32(s.ping);
            e.put_i32(s.channel);
            e.put_f64(s.offset);
            e.put_f64(s.sample);
            put_samples(e, &s.samples);
        });
    }
    if let Some(p) = &ping.ping_type {
        let name = truncate_text(&p.pulse_name, MAX_PULSE_NAME - 1).as_bytes();
        enc.group(GROUP_PING_TYPE, |e| {
            e.put_u32(p.pulse);
            e.put_f64(p.start_frequency);
            e.put_f64(p.end_frequency);
            e.put_f64(p.duration);
            e.put_i32(p.mancode);
            e.put_u32(p.pulse_id);
            e.put_bytes(name);
            // NUL terminated, with a second NUL after odd-length names
            e.put_u8(0);
            if name.len() % 2 > 0 {
                e.put_u8(0);
            }
        });
    }
    if let Some(s) = &ping.complex_signal {
        let samples = &s.samples[..s.samples.len().min(MAX_SAMPLES)];
        enc.group(GROUP_COMPLEX_SIGNAL, |e| {
            e.put_i32(s.ping);
            e.put_i32(s.channel);
            e.put_f64(s.offset);
            e.put_f64(s.sample);
            e.put_count(samples.len());
            for &(re, im) in samples {
                e.put_i16(re);
                e.put_i16(im);
            }
        });
    }
    if let Some(w) = ping.weighting {
        enc.group(GROUP_WEIGHTING, |e| {
            e.put_i16(w.factor_left);
            e.put_u32(w.samples_left);
            e.put_i16(w.factor_right);
            e.put_u32(w.samples_right);
        });
    }
    enc.finish()
}
