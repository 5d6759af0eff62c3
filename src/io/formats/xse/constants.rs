// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! XSE format constants.
//!
//! Markers, frame ids and storage limits shared by the scanner, the
//! frame decoders and the encoder.

use crate::core::WireOrder;

/// Frame start marker in native order.
pub const FRAME_START: [u8; 4] = *b"$HSF";
/// Frame end marker in native order.
pub const FRAME_END: [u8; 4] = *b"#HSF";
/// Group start marker in native order.
pub const GROUP_START: [u8; 4] = *b"$HSG";
/// Group end marker in native order.
pub const GROUP_END: [u8; 4] = *b"#HSG";

/// Frame header: marker, byte count, id, source, seconds, microseconds.
pub const FRAME_HEADER_SIZE: usize = 24;
/// Control frames carry transaction and address after the common header.
pub const CONTROL_HEADER_SIZE: usize = 32;

/// Seconds between 1901-01-01 and 1970-01-01.
pub const TIME_OFFSET: f64 = 2_177_452_800.0;

/// Beams per multibeam ping.
pub const MAX_BEAMS: usize = 151;
/// Samples per sidescan sub-group.
pub const MAX_SAMPLES: usize = 4096;
/// Points in a sound-velocity profile.
pub const MAX_SVP: usize = 200;
/// Sensors in a ship sensors group.
pub const MAX_SENSORS: usize = 16;
/// Transducers in a ship transducer group.
pub const MAX_TRANSDUCERS: usize = 512;
/// Seabeam centre-beam amplitudes.
pub const MAX_CENTER: usize = 8192;
/// Seabeam message text.
pub const MAX_MESSAGE: usize = 200;
/// Ship name and navigation description text.
pub const MAX_DESCRIPTION: usize = 80;
/// Sidescan ping-type pulse name.
pub const MAX_PULSE_NAME: usize = 64;
/// Comment storage including the terminator.
pub const COMMENT_LENGTH: usize = 200;

/// The four marker kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    FrameStart,
    FrameEnd,
    GroupStart,
    GroupEnd,
}

impl Marker {
    /// Marker bytes as they appear on the wire.
    pub fn bytes(self, order: WireOrder) -> [u8; 4] {
        let mut bytes = match self {
            Marker::FrameStart => FRAME_START,
            Marker::FrameEnd => FRAME_END,
            Marker::GroupStart => GROUP_START,
            Marker::GroupEnd => GROUP_END,
        };
        if order.is_swapped() {
            bytes.reverse();
        }
        bytes
    }
}

/// Frame kinds by wire id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    None,
    Navigation,
    SoundVelocity,
    Tide,
    Ship,
    Sidescan,
    Multibeam,
    SingleBeam,
    Control,
    Bathymetry,
    Product,
    Native,
    Geodetic,
    Seabeam,
    Message,
    Attitude,
    Comment,
    /// Any id not listed above
    Unknown(i32),
}

impl FrameKind {
    /// Map a wire id to a kind.
    pub fn from_id(id: i32) -> Self {
        match id {
            0 => FrameKind::None,
            1 => FrameKind::Navigation,
            2 => FrameKind::SoundVelocity,
            3 => FrameKind::Tide,
            4 => FrameKind::Ship,
            5 => FrameKind::Sidescan,
            6 => FrameKind::Multibeam,
            7 => FrameKind::SingleBeam,
            8 => FrameKind::Control,
            9 => FrameKind::Bathymetry,
            10 => FrameKind::Product,
            11 => FrameKind::Native,
            12 => FrameKind::Geodetic,
            13 => FrameKind::Seabeam,
            14 => FrameKind::Message,
            15 => FrameKind::Attitude,
            99 => FrameKind::Comment,
            other => FrameKind::Unknown(other),
        }
    }

    /// Wire id of this kind.
    pub fn id(self) -> i32 {
        match self {
            FrameKind::None => 0,
            FrameKind::Navigation => 1,
            FrameKind::SoundVelocity => 2,
            FrameKind::Tide => 3,
            FrameKind::Ship => 4,
            FrameKind::Sidescan => 5,
            FrameKind::Multibeam => 6,
            FrameKind::SingleBeam => 7,
            FrameKind::Control => 8,
            FrameKind::Bathymetry => 9,
            FrameKind::Product => 10,
            FrameKind::Native => 11,
            FrameKind::Geodetic => 12,
            FrameKind::Seabeam => 13,
            FrameKind::Message => 14,
            FrameKind::Attitude => 15,
            FrameKind::Comment => 99,
            FrameKind::Unknown(id) => id,
        }
    }

    /// Short lowercase name for logs and the CLI.
    pub fn name(self) -> &'static str {
        match self {
            FrameKind::None => "none",
            FrameKind::Navigation => "navigation",
            FrameKind::SoundVelocity => "sound-velocity",
            FrameKind::Tide => "tide",
            FrameKind::Ship => "ship",
            FrameKind::Sidescan => "sidescan",
            FrameKind::Multibeam => "multibeam",
            FrameKind::SingleBeam => "singlebeam",
            FrameKind::Control => "control",
            FrameKind::Bathymetry => "bathymetry",
            FrameKind::Product => "product",
            FrameKind::Native => "native",
            FrameKind::Geodetic => "geodetic",
            FrameKind::Seabeam => "seabeam",
            FrameKind::Message => "message",
            FrameKind::Attitude => "attitude",
            FrameKind::Comment => "comment",
            FrameKind::Unknown(_) => "unknown",
        }
    }
}
