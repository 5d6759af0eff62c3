// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Seabeam frame: run parameters and a few ancillary groups.

use super::{read_array, read_text, stamp_of, truncate_text};
use crate::core::{Result, WireOrder};
use crate::io::formats::xse::constants::{FrameKind, MAX_CENTER, MAX_MESSAGE};
use crate::io::formats::xse::encoder::FrameEncoder;
use crate::io::formats::xse::group::{for_each_group, GroupOutcome};
use crate::io::formats::xse::record::{
    Attitude, SeabeamAncillary, SeabeamCenter, SeabeamMessage, SeabeamProperties,
};
use crate::io::formats::xse::scanner::RawFrame;

const GROUP_PROPERTIES: i32 = 1;
const GROUP_HRP: i32 = 2;
const GROUP_CENTER: i32 = 9;
const GROUP_SPACING_MODE: i32 = 10;
const GROUP_MESSAGE: i32 = 21;

pub fn decode(frame: &RawFrame, order: WireOrder, out: &mut SeabeamAncillary) -> Result<()> {
    out.clear_groups();
    out.stamp = stamp_of(frame);
    for_each_group(
        &frame.bytes,
        frame.header.body_offset(),
        order,
        "seabeam",
        |header, c| {
            match header.id {
                GROUP_PROPERTIES => {
                    out.properties = Some(SeabeamProperties {
                        ping: c.read_i32()?,
                        ping_gain: c.read_f32()?,
                        pulse_width: c.read_f32()?,
                        transmit_power: c.read_f32()?,
                        pixel_width: c.read_f32()?,
                        swath_width: c.read_f32()?,
                        time_slice: c.read_f32()?,
                        depth_mode: c.read_i32()?,
                        beam_mode: c.read_i32()?,
                        ssv: c.read_f32()?,
                        frequency: c.read_f32()?,
                        bandwidth: c.read_f32()?,
                    });
                }
                GROUP_HRP => {
                    out.hrp = Some(Attitude {
                        heave: c.read_f64()?,
                        roll: c.read_f64()?,
                        pitch: c.read_f64()?,
                    });
                }
                GROUP_CENTER => {
                    let center_beam = c.read_i32()?;
                    let n = c.read_count()?;
                    let amplitudes =
                        read_array(c, n, MAX_CENTER, ("seabeam", header.id), |c| c.read_f32())?;
                    out.center = Some(SeabeamCenter {
                        center_beam,
                        amplitudes,
                    });
                }
                GROUP_SPACING_MODE => out.spacing_mode = Some(c.read_i32()?),
                GROUP_MESSAGE => {
                    let id = c.read_i32()?;
                    let len = c.read_count()?;
                    out.message = Some(SeabeamMessage {
                        id,
                        text: read_text(c, len, MAX_MESSAGE)?,
                    });
                }
                _ => return Ok(GroupOutcome::Skipped),
            }
            Ok(GroupOutcome::Decoded)
        },
    )
}

pub fn encode(seabeam: &SeabeamAncillary, order: WireOrder) -> Vec<u8> {
    let mut enc = FrameEncoder::begin(order, FrameKind::Seabeam, &seabeam.stamp);
    if let Some(p) = seabeam.properties {
        enc.group(GROUP_PROPERTIES, |e| {
            e.put_i32(p.ping);
            for v in [
                p.ping_gain,
                p.pulse_width,
                p.transmit_power,
                p.pixel_width,
                p.swath_width,
                p.time_slice,
            ] {
                e.put_f32(v);
            }
            e.put_i32(p.depth_mode);
            e.put_i32(p.beam_mode);
            e.put_f32(p.ssv);
            e.put_f32(p.frequency);
            e.put_f32(p.bandwidth);
        });
    }
    if let Some(h) = seabeam.hrp {
        enc.group(GROUP_HRP, |e| {
            e.put_f64(h.heave);
            e.put_f64(h.roll);
            e.put_f64(h.pitch);
        });
    }
    if let Some(center) = &seabeam.center {
        let amplitudes = &center.amplitudes[..center.amplitudes.len().min(MAX_CENTER)];
        enc.group(GROUP_CENTER, |e| {
            e.put_i32(center.center_beam);
            e.put_count(amplitudes.len());
            for &a in amplitudes {
                e.put_f32(a);
            }
        });
    }
    if let Some(mode) = seabeam.spacing_mode {
        enc.group(GROUP_SPACING_MODE, |e| e.put_i32(mode));
    }
    if let Some(message) = &seabeam.message {
        let text = truncate_text(&message.text, MAX_MESSAGE).as_bytes();
        enc.group(GROUP_MESSAGE, |e| {
            e.put_i32(message.id);
            e.put_count(text.len());
            e.put_bytes(text);
        });
    }
    enc.finish()
}
