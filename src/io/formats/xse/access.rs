// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Field accessors.
//!
//! Flat, swath-oriented views of an [`XseRecord`] and their inverses.
//! Angles are degrees, speeds km/h and positions geographic degrees on
//! this side of the boundary; the record keeps the wire units (radians,
//! m/s).
//!
//! Beams are placed by their beam number (1-based) when the beam group is
//! present and the number is in range, otherwise by their position in the
//! frame.
//!
//! Accessors called on a record of the wrong kind return the
//! [`CodecError::Comment`] or [`CodecError::Other`] signal.

use serde::Serialize;

use super::constants::{COMMENT_LENGTH, MAX_BEAMS, MAX_SVP};
use super::derive::rollpitch_to_takeoff;
use super::record::{
    Attitude, Beam, DerivedNav, LateralSeries, Motion, NavPosition, RecordKind, ShipParameters,
    XseRecord,
};
use super::scanner::wire_time;
use crate::core::{CodecError, Result};
use crate::io::traits::{BeamFlag, SwathData};

/// Nominal null angle of the sonar arrays, degrees.
pub const NULL_ANGLE: f64 = 37.5;
/// Multibeam frequencies at or above this carry a null angle, Hz.
pub const NULL_ANGLE_FREQUENCY: f32 = 50_000.0;

/// Navigation and attitude snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct NavSnapshot {
    pub time_d: f64,
    pub lon: f64,
    pub lat: f64,
    pub speed: f64,
    pub heading: f64,
    pub draft: f64,
    pub roll: f64,
    pub pitch: f64,
    pub heave: f64,
}

/// Ray-tracing inputs for one beam.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BeamTravel {
    /// Two-way travel time, seconds
    pub tt: f64,
    /// Takeoff angle from vertical
    pub angle: f64,
    /// Azimuth of the takeoff from the across-track axis
    pub angle_forward: f64,
    pub angle_null: f64,
    pub heave: f64,
    pub along_offset: f64,
}

/// Travel times of a ping.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TravelTimes {
    pub draft: f64,
    /// Surface sound velocity, m/s
    pub ssv: f64,
    pub beams: Vec<BeamTravel>,
}

/// Across-track extent of a ping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SwathBounds {
    pub min_lateral: f64,
    pub max_lateral: f64,
    pub beams: usize,
}

/// Map a longitude into the range selected by `lonflip`.
///
/// -1 gives [-360, 0], 0 gives [-180, 180] and 1 gives [0, 360].
pub fn apply_lonflip(lon: f64, lonflip: i32) -> f64 {
    let (lo, hi) = match lonflip.signum() {
        -1 => (-360.0, 0.0),
        0 => (-180.0, 180.0),
        _ => (0.0, 360.0),
    };
    if lon > hi {
        lon - 360.0
    } else if lon < lo {
        lon + 360.0
    } else {
        lon
    }
}

fn signal_for(kind: RecordKind) -> CodecError {
    match kind {
        RecordKind::Comment => CodecError::Comment,
        other => CodecError::other(other.name()),
    }
}

/// Swath slot of each decoded beam.
fn beam_slots(record: &XseRecord) -> Vec<usize> {
    let ping = &record.multibeam;
    ping.beams
        .iter()
        .enumerate()
        .map(|(i, beam)| {
            if ping.groups.beam && (1..=MAX_BEAMS as i16).contains(&beam.beam) {
                beam.beam as usize - 1
            } else {
                i
            }
        })
        .collect()
}

fn transducer_z_for(ship: &ShipParameters, lateral: f64) -> f64 {
    let (port, stbd) = ship.transducer_z();
    if lateral < 0.0 {
        port
    } else {
        stbd
    }
}

/// Transducer depth: mean of the array offsets, else the hull draft.
fn draft_of(ship: &ShipParameters) -> f64 {
    if ship.offsets.is_some() {
        ship.draft()
    } else {
        ship.general.as_ref().map(|g| g.draft).unwrap_or(0.0)
    }
}

fn set_draft(ship: &mut ShipParameters, draft: f64) {
    if let Some(offsets) = ship.offsets.as_mut() {
        offsets.trans_z_port = draft as f32;
        offsets.trans_z_stbd = draft as f32;
    } else if let Some(general) = ship.general.as_mut() {
        general.draft = draft;
    }
}

fn derived_lon_lat(record: &XseRecord, lonflip: i32) -> (f64, f64) {
    record
        .multibeam
        .derived_nav
        .map(|n| (apply_lonflip(n.lon.to_degrees(), lonflip), n.lat.to_degrees()))
        .unwrap_or((0.0, 0.0))
}

fn nav_lon_lat(record: &XseRecord, lonflip: i32) -> (f64, f64) {
    record
        .nav
        .position
        .as_ref()
        .map(|p| (apply_lonflip(p.x.to_degrees(), lonflip), p.y.to_degrees()))
        .unwrap_or((0.0, 0.0))
}

/// Heading (radians) of a navigation record by preference.
fn nav_heading(record: &XseRecord) -> f64 {
    let nav = &record.nav;
    nav.heading
        .or(nav.motion_ground.map(|m| m.course))
        .or(nav.motion_water.map(|m| m.course))
        .unwrap_or(0.0)
}

/// Speed (m/s) of a navigation record by preference.
fn nav_speed(record: &XseRecord) -> f64 {
    let nav = &record.nav;
    nav.log_speed
        .or(nav.motion_ground.map(|m| m.speed))
        .or(nav.motion_water.map(|m| m.speed))
        .unwrap_or(0.0)
}

/// Flatten a record into a swath.
pub fn extract(record: &XseRecord, lonflip: i32) -> Result<SwathData> {
    let mut out = SwathData {
        kind: record.kind,
        ..SwathData::default()
    };
    match record.kind {
        RecordKind::Data => {
            out.time_d = record.time_d().unwrap_or(0.0);
            (out.lon, out.lat) = derived_lon_lat(record, lonflip);
            out.heading = record.nav.course_ground().to_degrees();
            out.speed = 1.8 * record.nav.speed_ground();
            if record.multibeam_present {
                extract_bathymetry(record, &mut out);
            }
            if record.sidescan_present {
                extract_sidescan(record, &mut out);
            }
        }
        RecordKind::Nav => {
            out.time_d = record.nav.stamp.unix_time();
            (out.lon, out.lat) = nav_lon_lat(record, lonflip);
            out.heading = record.nav.course_ground().to_degrees();
            out.speed = 1.8 * record.nav.speed_ground();
        }
        RecordKind::Comment => {
            out.time_d = record.comment.stamp.unix_time();
            out.comment = record.comment.text.clone();
        }
        other => return Err(CodecError::other(other.name())),
    }
    Ok(out)
}

fn extract_bathymetry(record: &XseRecord, out: &mut SwathData) {
    let ping = &record.multibeam;
    let slots = beam_slots(record);
    let n = slots.iter().map(|&s| s + 1).max().unwrap_or(0);
    out.beamflag = vec![BeamFlag::Null; n];
    out.bath = vec![0.0; n];
    out.bath_across = vec![0.0; n];
    out.bath_along = vec![0.0; n];
    if ping.groups.amp {
        out.amp = vec![0.0; n];
    }
    for (beam, &j) in ping.beams.iter().zip(&slots) {
        out.beamflag[j] = BeamFlag::from_quality(beam.quality);
        out.bath[j] = beam.depth + beam.heave + transducer_z_for(&record.ship, beam.lateral);
        out.bath_across[j] = beam.lateral;
        out.bath_along[j] = beam.along;
        if ping.groups.amp {
            out.amp[j] = beam.amplitude as f64;
        }
    }
}

fn extract_sidescan(record: &XseRecord, out: &mut SwathData) {
    let Some(avl) = record.sidescan.amp_vs_lateral.as_ref() else {
        return;
    };
    let n = avl.samples.len();
    let along = if record.multibeam_present {
        let dt = record.sidescan.stamp.unix_time() - record.multibeam.stamp.unix_time();
        0.5 * record.nav.speed_ground() * dt
    } else {
        0.0
    };
    out.ss = avl.samples.iter().map(|&s| s as f64).collect();
    out.ss_across = (0..n)
        .map(|i| 0.001 * avl.bin_size as f64 * (i as f64 - (n / 2) as f64))
        .collect();
    out.ss_along = vec![along; n];
}

/// Write a swath back into a record.
pub fn insert(record: &mut XseRecord, data: &SwathData) -> Result<()> {
    record.kind = data.kind;
    match data.kind {
        RecordKind::Data => {
            let (sec, usec) = wire_time(data.time_d);
            for stamp in [&mut record.multibeam.stamp, &mut record.sidescan.stamp] {
                stamp.sec = sec;
                stamp.usec = usec;
            }
            set_derived_position(record, data.lon, data.lat);
            record.nav.motion_ground = Some(Motion {
                speed: data.speed / 1.8,
                course: data.heading.to_radians(),
            });
            if record.multibeam_present {
                insert_bathymetry(record, data);
            }
            if record.sidescan_present {
                insert_sidescan(record, data);
            }
        }
        RecordKind::Nav => {
            let (sec, usec) = wire_time(data.time_d);
            record.nav.stamp.sec = sec;
            record.nav.stamp.usec = usec;
            set_nav_position(record, data.lon, data.lat);
            record.nav.motion_ground = Some(Motion {
                speed: data.speed / 1.8,
                course: data.heading.to_radians(),
            });
        }
        RecordKind::Comment => {
            record.comment.text = data.comment.chars().take(COMMENT_LENGTH - 1).collect();
        }
        other => return Err(CodecError::bad_kind(other.name())),
    }
    Ok(())
}

fn set_derived_position(record: &mut XseRecord, lon: f64, lat: f64) {
    let nav = record.multibeam.derived_nav.get_or_insert(DerivedNav::default());
    nav.lon = lon.to_radians();
    nav.lat = lat.to_radians();
}

fn set_nav_position(record: &mut XseRecord, lon: f64, lat: f64) {
    let position = record.nav.position.get_or_insert_with(NavPosition::default);
    position.x = lon.to_radians();
    position.y = lat.to_radians();
}

fn insert_bathymetry(record: &mut XseRecord, data: &SwathData) {
    let slots = beam_slots(record);
    let ship = &record.ship;
    let ping = &mut record.multibeam;
    for (beam, &j) in ping.beams.iter_mut().zip(&slots) {
        if j >= data.bath.len() {
            continue;
        }
        if let Some(&flag) = data.beamflag.get(j) {
            beam.quality = flag.to_quality(beam.quality);
        }
        if let Some(&across) = data.bath_across.get(j) {
            beam.lateral = across;
        }
        if let Some(&along) = data.bath_along.get(j) {
            beam.along = along;
        }
        if let Some(&amp) = data.amp.get(j) {
            beam.amplitude = amp as i16;
        }
        beam.depth = data.bath[j] - beam.heave - transducer_z_for(ship, beam.lateral);
    }
}

fn insert_sidescan(record: &mut XseRecord, data: &SwathData) {
    let avl = record
        .sidescan
        .amp_vs_lateral
        .get_or_insert_with(LateralSeries::default);
    let n = data.ss.len();
    if n != avl.samples.len() {
        if let Some(bin_size) = bin_size_from_pixels(&data.ss_across) {
            avl.bin_size = bin_size;
        }
    }
    avl.samples = data.ss.iter().map(|&s| s as i16).collect();
}

/// Bin size (mm) implied by the outermost pixel's across-track distance.
fn bin_size_from_pixels(across: &[f64]) -> Option<i32> {
    let half = (across.len() / 2) as i64;
    let (offset, index) = across
        .iter()
        .enumerate()
        .map(|(i, &x)| (x.abs(), i as i64 - half))
        .fold((0.0, 0i64), |best, cur| if cur.0 > best.0 { cur } else { best });
    (offset > 0.0 && index != 0).then(|| (1000.0 * offset / index.abs() as f64) as i32)
}

/// Navigation and attitude of a survey or navigation record.
pub fn extract_nav(record: &XseRecord, lonflip: i32) -> Result<NavSnapshot> {
    let draft = draft_of(&record.ship);
    let nav = &record.nav;
    let centre = record
        .multibeam
        .beams
        .get(record.multibeam.num_beams() / 2)
        .filter(|_| record.multibeam_present);
    let centre_attitude = centre.map(|b| Attitude {
        heave: b.heave,
        roll: b.roll,
        pitch: b.pitch,
    });
    let nav_attitude = nav.hrp.or(match (nav.heave, nav.roll, nav.pitch) {
        (Some(heave), Some(roll), Some(pitch)) => Some(Attitude { heave, roll, pitch }),
        _ => None,
    });

    let (time_d, (lon, lat), heading, speed, attitude) = match record.kind {
        RecordKind::Data => (
            record.time_d().unwrap_or(0.0),
            derived_lon_lat(record, lonflip),
            nav.course_ground().to_degrees(),
            1.8 * nav.speed_ground(),
            centre_attitude.or(nav_attitude),
        ),
        RecordKind::Nav => (
            nav.stamp.unix_time(),
            nav_lon_lat(record, lonflip),
            nav_heading(record).to_degrees(),
            3.6 * nav_speed(record),
            nav_attitude.or(centre_attitude),
        ),
        other => return Err(signal_for(other)),
    };
    let attitude = attitude.unwrap_or_default();
    Ok(NavSnapshot {
        time_d,
        lon,
        lat,
        speed,
        heading,
        draft,
        roll: attitude.roll.to_degrees(),
        pitch: attitude.pitch.to_degrees(),
        heave: attitude.heave,
    })
}

/// Write navigation back into a survey or navigation record.
pub fn insert_nav(record: &mut XseRecord, nav: &NavSnapshot) -> Result<()> {
    let (sec, usec) = wire_time(nav.time_d);
    match record.kind {
        RecordKind::Data => {
            for stamp in [&mut record.multibeam.stamp, &mut record.sidescan.stamp] {
                stamp.sec = sec;
                stamp.usec = usec;
            }
            set_derived_position(record, nav.lon, nav.lat);
            record.nav.motion_ground = Some(Motion {
                speed: nav.speed / 1.8,
                course: nav.heading.to_radians(),
            });
        }
        RecordKind::Nav => {
            record.nav.stamp.sec = sec;
            record.nav.stamp.usec = usec;
            set_nav_position(record, nav.lon, nav.lat);
            record.nav.heading = Some(nav.heading.to_radians());
            record.nav.log_speed = Some(nav.speed / 3.6);
            record.nav.hrp = Some(Attitude {
                heave: nav.heave,
                roll: nav.roll.to_radians(),
                pitch: nav.pitch.to_radians(),
            });
        }
        other => return Err(signal_for(other)),
    }
    set_draft(&mut record.ship, nav.draft);
    Ok(())
}

/// Travel times and takeoff angles of a survey ping.
pub fn ttimes(record: &XseRecord) -> Result<TravelTimes> {
    if record.kind != RecordKind::Data {
        return Err(signal_for(record.kind));
    }
    let ssv = match record.seabeam.properties {
        Some(p) if p.ssv > 0.0 => p.ssv as f64,
        _ => record.svp.ssv,
    };
    let mut out = TravelTimes {
        draft: draft_of(&record.ship),
        ssv,
        beams: Vec::new(),
    };
    if !record.multibeam_present {
        return Ok(out);
    }

    let ping = &record.multibeam;
    let slots = beam_slots(record);
    out.beams = vec![BeamTravel::default(); slots.iter().map(|&s| s + 1).max().unwrap_or(0)];
    let has_null = ping.frequency >= NULL_ANGLE_FREQUENCY || ping.frequency <= 0.0;
    let (err_port, err_stbd) = record
        .ship
        .offsets
        .map(|o| (o.trans_err_port as f64, o.trans_err_stbd as f64))
        .unwrap_or((0.0, 0.0));
    let speed_ground = record.nav.speed_ground();

    for (beam, &j) in ping.beams.iter().zip(&slots) {
        let (angle, angle_forward) =
            rollpitch_to_takeoff(beam.pitch.to_degrees(), 90.0 - beam.angle.to_degrees());
        let angle_null = match (has_null, beam.angle < 0.0) {
            (false, _) => 0.0,
            (true, true) => NULL_ANGLE + err_port.to_degrees(),
            (true, false) => NULL_ANGLE + err_stbd.to_degrees(),
        };
        out.beams[j] = BeamTravel {
            tt: beam.tt,
            angle,
            angle_forward,
            angle_null,
            heave: beam.heave,
            along_offset: 0.5 * speed_ground * beam.delay,
        };
    }
    Ok(out)
}

/// Transducer depth and altitude above the seafloor of a survey ping.
pub fn altitude(record: &XseRecord) -> Result<(f64, f64)> {
    if record.kind != RecordKind::Data {
        return Err(signal_for(record.kind));
    }
    let mut transducer_depth = draft_of(&record.ship);
    let beams = if record.multibeam_present {
        record.multibeam.beams.as_slice()
    } else {
        &[]
    };
    let mut best = 0.0;
    if let Some(centre) = beams.get(beams.len() / 2) {
        transducer_depth -= centre.heave;
        best = if centre.quality == 1 {
            centre.depth
        } else {
            nearest_depth(beams, |q| q == 1).unwrap_or(0.0)
        };
        if best <= 0.0 {
            best = nearest_depth(beams, |q| q < 8).unwrap_or(0.0);
        }
    }
    Ok((transducer_depth, best - transducer_depth))
}

/// Depth of the beam closest to nadir among those whose quality passes.
fn nearest_depth(beams: &[Beam], accept: impl Fn(u8) -> bool) -> Option<f64> {
    beams
        .iter()
        .filter(|b| accept(b.quality))
        .min_by(|a, b| a.lateral.abs().total_cmp(&b.lateral.abs()))
        .map(|b| b.depth)
}

/// Depth/velocity pairs of a sound-velocity record.
pub fn extract_svp(record: &XseRecord) -> Result<Vec<(f64, f64)>> {
    if record.kind != RecordKind::VelocityProfile {
        return Err(signal_for(record.kind));
    }
    let svp = &record.svp;
    Ok(svp
        .depth
        .iter()
        .copied()
        .zip(svp.velocity.iter().copied())
        .collect())
}

/// Replace the profile of a sound-velocity record, keeping at most 200 pairs.
pub fn insert_svp(record: &mut XseRecord, profile: &[(f64, f64)]) -> Result<()> {
    if record.kind != RecordKind::VelocityProfile {
        return Err(signal_for(record.kind));
    }
    let profile = &profile[..profile.len().min(MAX_SVP)];
    record.svp.depth = profile.iter().map(|p| p.0).collect();
    record.svp.velocity = profile.iter().map(|p| p.1).collect();
    Ok(())
}

/// Across-track extent of the current multibeam ping.
pub fn swath_bounds(record: &XseRecord) -> Option<SwathBounds> {
    if !record.multibeam_present || record.multibeam.beams.is_empty() {
        return None;
    }
    let beams = &record.multibeam.beams;
    let (min_lateral, max_lateral) = beams
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), b| {
            (lo.min(b.lateral), hi.max(b.lateral))
        });
    Some(SwathBounds {
        min_lateral,
        max_lateral,
        beams: beams.len(),
    })
}
