// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decoded XSE record.
//!
//! One [`XseRecord`] lives for the whole read session. Each frame decoder
//! refreshes only its own section, which lets a multibeam ping survive an
//! interleaved comment or navigation frame until its sidescan companion
//! arrives. Optional groups are modelled as `Option`s (or empty vectors for
//! count-gated arrays); a `Some` means the group was present in the frame.

use serde::Serialize;

use super::constants::FrameKind;
use super::scanner::unix_time;

/// What kind of logical record was last produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RecordKind {
    /// Nothing decoded yet
    #[default]
    None,
    /// Survey ping (multibeam and/or sidescan)
    Data,
    /// Comment text
    Comment,
    /// Navigation fix
    Nav,
    /// Sound-velocity profile
    VelocityProfile,
    /// Ship and installation parameters
    Parameter,
    /// Seabeam run parameters
    RunParameter,
    /// Frame kept verbatim
    RawLine,
}

impl RecordKind {
    /// Short name for logs and the CLI.
    pub fn name(self) -> &'static str {
        match self {
            RecordKind::None => "none",
            RecordKind::Data => "data",
            RecordKind::Comment => "comment",
            RecordKind::Nav => "nav",
            RecordKind::VelocityProfile => "velocity-profile",
            RecordKind::Parameter => "parameter",
            RecordKind::RunParameter => "run-parameter",
            RecordKind::RawLine => "raw",
        }
    }
}

/// Source id and timestamp from a frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Stamp {
    pub source: i32,
    /// Seconds since 1901-01-01
    pub sec: u32,
    pub usec: u32,
}

impl Stamp {
    /// Timestamp as Unix seconds.
    pub fn unix_time(&self) -> f64 {
        unix_time(self.sec, self.usec)
    }
}

// ============================================================================
// Navigation
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct NavGeneral {
    pub quality: i32,
    pub status: i32,
}

/// Position in radians (x = longitude, y = latitude).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NavPosition {
    pub description: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct NavAccuracy {
    pub quality: i32,
    pub num_satellites: u8,
    pub horizontal_dilution: f32,
    pub diff_age: f32,
    pub diff_ref: u32,
}

/// Speed (m/s) and course (radians).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Motion {
    pub speed: f64,
    pub course: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct NavTrack {
    pub offset_track: f64,
    pub offset_sol: f64,
    pub offset_eol: f64,
    pub distance_sol: f64,
    pub azimuth_sol: f64,
    pub distance_eol: f64,
    pub azimuth_eol: f64,
}

/// Heave (m), roll and pitch (radians).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Attitude {
    pub heave: f64,
    pub roll: f64,
    pub pitch: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct NavGps {
    pub altitude: f32,
    pub geoidal_separation: f32,
}

/// Navigation frame contents.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NavFields {
    pub stamp: Stamp,
    pub general: Option<NavGeneral>,
    pub position: Option<NavPosition>,
    pub accuracy: Option<NavAccuracy>,
    pub motion_ground: Option<Motion>,
    pub motion_water: Option<Motion>,
    pub track: Option<NavTrack>,
    pub hrp: Option<Attitude>,
    pub heave: Option<f64>,
    pub roll: Option<f64>,
    pub pitch: Option<f64>,
    /// Radians
    pub heading: Option<f64>,
    /// Speed log, m/s
    pub log_speed: Option<f64>,
    pub gps: Option<NavGps>,
}

impl NavFields {
    /// Speed over ground in m/s, zero when not reported.
    pub fn speed_ground(&self) -> f64 {
        self.motion_ground.map(|m| m.speed).unwrap_or(0.0)
    }

    /// Course over ground in radians, zero when not reported.
    pub fn course_ground(&self) -> f64 {
        self.motion_ground.map(|m| m.course).unwrap_or(0.0)
    }

    /// Clear every group.
    pub fn clear_groups(&mut self) {
        *self = NavFields {
            stamp: self.stamp,
            ..NavFields::default()
        };
    }
}

// ============================================================================
// Sound velocity
// ============================================================================

/// Sound-velocity frame contents. Depth and velocity share one count, the
/// CTD channels share another.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SoundVelocityProfile {
    pub stamp: Stamp,
    pub depth: Vec<f64>,
    pub velocity: Vec<f64>,
    pub conductivity: Vec<f64>,
    pub salinity: Vec<f64>,
    pub temperature: Vec<f64>,
    pub pressure: Vec<f64>,
    /// Surface sound speed, m/s; zero when absent
    pub ssv: f64,
}

// ============================================================================
// Ship
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ShipGeneral {
    pub name: String,
    pub length: f64,
    pub beam: f64,
    pub draft: f64,
    pub height: f64,
    pub displacement: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Sensor {
    pub id: i32,
    pub kind: i32,
    pub frequency: i32,
}

/// Installation parameters (angles in radians, offsets in metres).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ShipOffsets {
    pub roll_bias: f32,
    pub pitch_bias: f32,
    pub heading_bias: f32,
    pub time_delay: f32,
    pub trans_x_port: f32,
    pub trans_y_port: f32,
    pub trans_z_port: f32,
    pub trans_x_stbd: f32,
    pub trans_y_stbd: f32,
    pub trans_z_stbd: f32,
    pub trans_err_port: f32,
    pub trans_err_stbd: f32,
    pub nav_x: f32,
    pub nav_y: f32,
    pub nav_z: f32,
    pub hrp_x: f32,
    pub hrp_y: f32,
    pub hrp_z: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct NavigationMotion {
    pub roll_bias: f64,
    pub pitch_bias: f64,
    pub heave_bias: f64,
    pub heading_bias: f64,
    pub time_delay: f64,
    pub nav_x: f64,
    pub nav_y: f64,
    pub nav_z: f64,
    pub hrp_x: f64,
    pub hrp_y: f64,
    pub hrp_z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Transducer {
    pub sensor_id: i32,
    pub transducer: u8,
    pub frequency: u32,
    pub side: u8,
    pub mounting_roll: f64,
    pub mounting_pitch: f64,
    pub mounting_azimuth: f64,
    pub mounting_distance: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub roll: f64,
    pub pitch: f64,
    pub azimuth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TransducerExtended {
    pub roll: u8,
    pub pitch: u8,
    pub azimuth: u8,
}

/// Ship frame contents. Groups are kept across ship frames; a later frame
/// replaces only the groups it carries.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ShipParameters {
    pub stamp: Stamp,
    pub general: Option<ShipGeneral>,
    pub sensors: Vec<Sensor>,
    pub offsets: Option<ShipOffsets>,
    pub navigation_motion: Option<NavigationMotion>,
    pub transducers: Vec<Transducer>,
    pub transducers_extended: Vec<TransducerExtended>,
}

impl ShipParameters {
    /// Vertical transducer offsets (port, starboard).
    pub fn transducer_z(&self) -> (f64, f64) {
        self.offsets
            .map(|o| (o.trans_z_port as f64, o.trans_z_stbd as f64))
            .unwrap_or((0.0, 0.0))
    }

    /// Mean transducer depth.
    pub fn draft(&self) -> f64 {
        let (port, stbd) = self.transducer_z();
        0.5 * (port + stbd)
    }
}

// ============================================================================
// Multibeam
// ============================================================================

/// Per-beam values. Angles are radians, times seconds, distances metres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Beam {
    pub beam: i16,
    pub tt: f64,
    pub quality: u8,
    pub amplitude: i16,
    pub delay: f64,
    pub lateral: f64,
    pub along: f64,
    pub depth: f64,
    pub angle: f64,
    pub heave: f64,
    pub roll: f64,
    pub pitch: f64,
    pub gate_angle: f64,
    pub gate_start: f64,
    pub gate_stop: f64,
    pub noise: f32,
    pub length: f32,
    pub hits: u32,
    pub heave_receive: f64,
    pub azimuth: f64,
    pub normalized_amplitude: i16,
}

/// Presence of the per-beam groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BeamGroups {
    pub beam: bool,
    pub tt: bool,
    pub quality: bool,
    pub amp: bool,
    pub delay: bool,
    pub lateral: bool,
    pub along: bool,
    pub depth: bool,
    pub angle: bool,
    pub heave: bool,
    pub roll: bool,
    pub pitch: bool,
    pub gates: bool,
    pub noise: bool,
    pub length: bool,
    pub hits: bool,
    pub heave_receive: bool,
    pub azimuth: bool,
    pub normalized_amplitude: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MultibeamProperties {
    pub beam_width_along: f32,
    pub beam_width_across: f32,
    pub ping_mode: i32,
    pub spacing_mode: i32,
}

/// Navigation attached to a ping (radians, m/s).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DerivedNav {
    pub lon: f64,
    pub lat: f64,
    pub heading: f64,
    pub speed: f64,
}

/// Multibeam frame contents.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MultibeamPing {
    pub stamp: Stamp,
    pub ping: i32,
    pub frequency: f32,
    pub pulse: f32,
    pub power: f32,
    pub bandwidth: f32,
    pub sample: f32,
    pub swath: f32,
    pub groups: BeamGroups,
    /// Beams by array position, at most `MAX_BEAMS`
    pub beams: Vec<Beam>,
    pub properties: Option<MultibeamProperties>,
    pub derived_nav: Option<DerivedNav>,
}

impl MultibeamPing {
    /// Reset every group ahead of a new frame.
    pub fn clear_groups(&mut self) {
        self.groups = BeamGroups::default();
        self.beams.clear();
        self.properties = None;
        self.derived_nav = None;
    }

    /// Grow the beam array to at least `count` entries.
    pub fn ensure_beams(&mut self, count: usize) {
        if self.beams.len() < count {
            self.beams.resize(count, Beam::default());
        }
    }

    /// Number of stored beams.
    pub fn num_beams(&self) -> usize {
        self.beams.len()
    }
}

// ============================================================================
// Sidescan
// ============================================================================

/// Samples against time.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TimeSeries {
    pub sample_us: i32,
    pub offset: i32,
    pub samples: Vec<i16>,
}

/// Samples against lateral distance; `bin_size` is millimetres.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LateralSeries {
    pub bin_size: i32,
    pub offset: i32,
    pub samples: Vec<i16>,
}

impl LateralSeries {
    /// Count of samples that are not zero.
    pub fn nonzero(&self) -> usize {
        self.samples.iter().filter(|&&s| s != 0).count()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Signal {
    pub ping: i32,
    pub channel: i32,
    pub offset: f64,
    pub sample: f64,
    pub samples: Vec<i16>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PingType {
    pub pulse: u32,
    pub start_frequency: f64,
    pub end_frequency: f64,
    pub duration: f64,
    pub mancode: i32,
    pub pulse_id: u32,
    pub pulse_name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ComplexSignal {
    pub ping: i32,
    pub channel: i32,
    pub offset: f64,
    pub sample: f64,
    /// (real, imaginary)
    pub samples: Vec<(i16, i16)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Weighting {
    pub factor_left: i16,
    pub samples_left: u32,
    pub factor_right: i16,
    pub samples_right: u32,
}

/// Sidescan frame contents.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SidescanPing {
    pub stamp: Stamp,
    pub ping: i32,
    pub frequency: f32,
    pub pulse: f32,
    pub power: f32,
    pub bandwidth: f32,
    pub sample: f32,
    pub amp_vs_time: Option<TimeSeries>,
    pub phase_vs_time: Option<TimeSeries>,
    pub amp_vs_lateral: Option<LateralSeries>,
    pub phase_vs_lateral: Option<LateralSeries>,
    pub signal: Option<Signal>,
    pub ping_type: Option<PingType>,
    pub complex_signal: Option<ComplexSignal>,
    pub weighting: Option<Weighting>,
}

impl SidescanPing {
    /// Reset every group ahead of a new frame.
    pub fn clear_groups(&mut self) {
        *self = SidescanPing {
            stamp: self.stamp,
            ..SidescanPing::default()
        };
    }
}

// ============================================================================
// Seabeam
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SeabeamProperties {
    pub ping: i32,
    pub ping_gain: f32,
    pub pulse_width: f32,
    pub transmit_power: f32,
    pub pixel_width: f32,
    pub swath_width: f32,
    pub time_slice: f32,
    pub depth_mode: i32,
    pub beam_mode: i32,
    pub ssv: f32,
    pub frequency: f32,
    pub bandwidth: f32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SeabeamCenter {
    pub center_beam: i32,
    pub amplitudes: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SeabeamMessage {
    pub id: i32,
    pub text: String,
}

/// Seabeam frame contents.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SeabeamAncillary {
    pub stamp: Stamp,
    pub properties: Option<SeabeamProperties>,
    pub hrp: Option<Attitude>,
    pub center: Option<SeabeamCenter>,
    pub spacing_mode: Option<i32>,
    pub message: Option<SeabeamMessage>,
}

impl SeabeamAncillary {
    /// Reset every group.
    pub fn clear_groups(&mut self) {
        *self = SeabeamAncillary {
            stamp: self.stamp,
            ..SeabeamAncillary::default()
        };
    }
}

// ============================================================================
// Comment and the record itself
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CommentFields {
    pub stamp: Stamp,
    pub text: String,
}

/// Merged logical record returned by read-one-ping.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct XseRecord {
    pub kind: RecordKind,
    pub nav: NavFields,
    pub svp: SoundVelocityProfile,
    pub ship: ShipParameters,
    /// True when the current ping carries a multibeam frame
    pub multibeam_present: bool,
    pub multibeam: MultibeamPing,
    /// True when the current ping carries a sidescan frame
    pub sidescan_present: bool,
    pub sidescan: SidescanPing,
    pub seabeam: SeabeamAncillary,
    pub comment: CommentFields,
    /// Complete frame bytes for `RawLine` records
    #[serde(skip)]
    pub raw: Vec<u8>,
    /// Kind of the frame held in `raw`
    #[serde(skip)]
    pub raw_kind: Option<FrameKind>,
}

impl XseRecord {
    /// Fresh, empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Comment record with the given text.
    pub fn comment(text: impl Into<String>) -> Self {
        Self {
            kind: RecordKind::Comment,
            comment: CommentFields {
                stamp: Stamp::default(),
                text: text.into(),
            },
            ..Self::default()
        }
    }

    /// Timestamp (Unix seconds) of the current record, if it has one.
    pub fn time_d(&self) -> Option<f64> {
        match self.kind {
            RecordKind::Data if self.multibeam_present => Some(self.multibeam.stamp.unix_time()),
            RecordKind::Data if self.sidescan_present => Some(self.sidescan.stamp.unix_time()),
            RecordKind::Nav => Some(self.nav.stamp.unix_time()),
            RecordKind::VelocityProfile => Some(self.svp.stamp.unix_time()),
            RecordKind::Parameter => Some(self.ship.stamp.unix_time()),
            RecordKind::RunParameter => Some(self.seabeam.stamp.unix_time()),
            RecordKind::Comment => Some(self.comment.stamp.unix_time()),
            _ => None,
        }
    }

    /// Ping number of a survey record.
    pub fn ping_number(&self) -> Option<i32> {
        if self.kind != RecordKind::Data {
            return None;
        }
        if self.multibeam_present {
            Some(self.multibeam.ping)
        } else if self.sidescan_present {
            Some(self.sidescan.ping)
        } else {
            None
        }
    }
}
